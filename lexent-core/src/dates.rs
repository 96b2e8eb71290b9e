//! # Datas
//!
//! Dois reconhecedores de datas, ambos validando apenas a sintaxe (não há
//! conversão para valores de calendário):
//!
//! - **ISO-8601** (`dates_iso8601`): `YYYY-MM-DD`, com hora opcional
//!   (`HH:MM`, `HH:MM:SS` ou `HH:MM:SS.fff`) separada por espaços ou tab, e
//!   fuso opcional após um espaço: `Z`, abreviação de 2 a 4 letras (`MDT`) ou
//!   deslocamento com sinal (`-0800`).
//! - **Dia Mês Ano** (`dates_dd_mon_year`): `25 Jan 2017` ou `25 Jan, 2017`.
//!
//! ## Limites validados
//!
//! | Campo               | Intervalo  | Observação                           |
//! |---------------------|------------|--------------------------------------|
//! | mês (ISO)           | 01..=12    |                                      |
//! | dia                 | 1..=31     | sem checagem de tamanho do mês       |
//! | minuto, segundo     | 00..=59    | só quando presentes                  |
//! | hora                | 00..=99    | limitada apenas pelos 2 dígitos      |
//! | hora do offset      | 00..=24    | 24 inclusive                         |
//! | minuto do offset    | 00..=59    |                                      |
//! | mês (Dia Mês Ano)   | Jan..Dec   | tabela fixa, grafia exata            |
//!
//! Um candidato que viola qualquer limite é descartado por inteiro: não há
//! fallback para um prefixo menor (ex: só a data sem a hora inválida).

use crate::recognizer::{Fields, Recognizer};

pub const ISO8601_NAME: &str = "dates_iso8601";
pub const DD_MON_YEAR_NAME: &str = "dates_dd_mon_year";

/// Abreviações de mês aceitas, na ordem do calendário.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const ISO8601_PATTERN: &str = r"(?x)
    \b
    (?P<year>[0-9]{4}) - (?P<month>[0-9]{2}) - (?P<day>[0-9]{2})
    (?:
        [\x20\t]+
        (?P<hour>[0-9]{2}) : (?P<minute>[0-9]{2})
        (?: : (?P<second>[0-9]{2}) (?: \. (?P<fraction>[0-9]+) )? )?
        (?:
            \x20
            (?P<zone>
                Z
              | [A-Z]{2,4}
              | (?P<offset_sign>[+-]) (?P<offset_hour>[0-9]{2}) (?P<offset_minute>[0-9]{2})
            )
        )?
    )?
    \b
";

const DD_MON_YEAR_PATTERN: &str =
    r"\b(?P<day>[0-9]{1,2})\s+(?P<month>[A-Za-z]{3}),?\s+(?P<year>[0-9]{4})\b";

pub fn dates_iso8601() -> Recognizer {
    Recognizer::new(
        ISO8601_NAME,
        "Datas ISO-8601 com hora e fuso opcionais (2015-07-25 18:22:19.123 -0800)",
        ISO8601_PATTERN,
    )
    .expect("padrão embutido válido")
    .with_predicate("month_in_range", |f| in_range(f, "month", 1, 12))
    .with_predicate("day_in_range", |f| in_range(f, "day", 1, 31))
    .with_predicate("minute_in_range", |f| optional_in_range(f, "minute", 0, 59))
    .with_predicate("second_in_range", |f| optional_in_range(f, "second", 0, 59))
    .with_predicate("offset_hour_in_range", |f| {
        optional_in_range(f, "offset_hour", 0, 24)
    })
    .with_predicate("offset_minute_in_range", |f| {
        optional_in_range(f, "offset_minute", 0, 59)
    })
}

pub fn dates_dd_mon_year() -> Recognizer {
    Recognizer::new(
        DD_MON_YEAR_NAME,
        "Datas no formato dia, mês abreviado e ano (25 Jan 2017, 25 Jan, 2017)",
        DD_MON_YEAR_PATTERN,
    )
    .expect("padrão embutido válido")
    .with_predicate("day_in_range", |f| in_range(f, "day", 1, 31))
    .with_predicate("known_month", |f| {
        f.get("month").is_some_and(|m| month_number(m).is_some())
    })
}

/// Número do mês (1..=12) para uma abreviação da tabela.
pub fn month_number(abbreviation: &str) -> Option<u32> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| *m == abbreviation)
        .map(|i| i as u32 + 1)
}

fn in_range(f: &Fields<'_>, name: &str, min: u32, max: u32) -> bool {
    f.number(name).is_some_and(|v| (min..=max).contains(&v))
}

fn optional_in_range(f: &Fields<'_>, name: &str, min: u32, max: u32) -> bool {
    !f.has(name) || in_range(f, name, min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso(text: &str) -> Vec<String> {
        dates_iso8601().find_iter(text).map(|m| m.text).collect()
    }

    fn dmy(text: &str) -> Vec<String> {
        dates_dd_mon_year().find_iter(text).map(|m| m.text).collect()
    }

    #[test]
    fn test_iso_plain_date() {
        assert_eq!(iso("I was born on 2015-07-25."), vec!["2015-07-25"]);
    }

    #[test]
    fn test_iso_month_bounds() {
        assert!(iso("I was born on 2015-00-25.").is_empty());
        assert!(iso("I was born on 2015-13-25.").is_empty());
        assert_eq!(iso("2015-01-25 2015-12-25"), vec!["2015-01-25", "2015-12-25"]);
    }

    #[test]
    fn test_iso_day_bounds() {
        assert!(iso("I was born on 2015-07-00.").is_empty());
        assert!(iso("I was born on 2015-07-32.").is_empty());
        assert_eq!(iso("2015-07-01 and 2015-02-31"), vec!["2015-07-01", "2015-02-31"]);
    }

    #[test]
    fn test_iso_timestamps() {
        assert_eq!(iso("I was born on 2015-07-25 18:22"), vec!["2015-07-25 18:22"]);
        assert_eq!(
            iso("I was born on 2015-07-25 18:22:19"),
            vec!["2015-07-25 18:22:19"]
        );
        assert_eq!(
            iso("I was born on 2015-07-25 18:22:19.123"),
            vec!["2015-07-25 18:22:19.123"]
        );
    }

    #[test]
    fn test_iso_time_separators() {
        assert_eq!(
            iso("I was born on 2015-07-25   18:22:19.123"),
            vec!["2015-07-25   18:22:19.123"]
        );
        assert_eq!(iso("2015-07-25\t18:22"), vec!["2015-07-25\t18:22"]);
    }

    #[test]
    fn test_iso_minute_and_second_bounds() {
        assert!(iso("I was born on 2015-07-25 18:65").is_empty());
        assert!(iso("I was born on 2015-07-25 18:22:69").is_empty());
        assert_eq!(iso("2015-07-25 18:59:59"), vec!["2015-07-25 18:59:59"]);
    }

    #[test]
    fn test_iso_hour_only_bounded_by_digits() {
        assert_eq!(iso("2015-07-25 99:00"), vec!["2015-07-25 99:00"]);
    }

    #[test]
    fn test_iso_zones() {
        for zone in ["MDT", "Z", "-0800", "+0530", "UTC", "EST"] {
            let text = format!("I was born on 2015-07-25 18:22:19.123 {zone}");
            assert_eq!(iso(&text), vec![format!("2015-07-25 18:22:19.123 {zone}")]);
        }
    }

    #[test]
    fn test_iso_offset_bounds() {
        assert!(iso("I was born on 2015-07-25 18:22:19.123 -2700").is_empty());
        assert!(iso("I was born on 2015-07-25 18:22:19.123 -0877").is_empty());
        assert_eq!(iso("2015-07-25 18:22 +2400"), vec!["2015-07-25 18:22 +2400"]);
    }

    #[test]
    fn test_iso_zone_must_be_a_whole_word() {
        assert_eq!(iso("2015-07-25 18:22 Zebra"), vec!["2015-07-25 18:22"]);
    }

    #[test]
    fn test_iso_rejection_resumes_scan() {
        assert_eq!(
            iso("2015-13-01 then 2015-07-25 18:65 then 2016-02-29"),
            vec!["2016-02-29"]
        );
    }

    #[test]
    fn test_iso_fields() {
        let fields = dates_iso8601().find_fields("at 2015-07-25 18:22:19.123 -0800");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0]["month"], "07");
        assert_eq!(fields[0]["fraction"], "123");
        assert_eq!(fields[0]["offset_sign"], "-");
        assert_eq!(fields[0]["zone"], "-0800");
    }

    #[test]
    fn test_dmy_dates() {
        assert_eq!(dmy("I was born on 25 Jan 2017"), vec!["25 Jan 2017"]);
        assert_eq!(dmy("I was born on 25 Jan, 2017"), vec!["25 Jan, 2017"]);
        assert_eq!(dmy("on 1 Dec 1999."), vec!["1 Dec 1999"]);
    }

    #[test]
    fn test_dmy_unknown_month() {
        assert!(dmy("I was born on 25 Man 2017.").is_empty());
        assert!(dmy("I was born on 25 Der 2017.").is_empty());
        assert!(dmy("I was born on 25 jan 2017.").is_empty());
    }

    #[test]
    fn test_dmy_day_bounds() {
        assert!(dmy("I was born on 0 Jan 2017.").is_empty());
        assert!(dmy("I was born on 32 Jan 2017.").is_empty());
        assert_eq!(dmy("31 Feb 2017"), vec!["31 Feb 2017"]);
    }

    #[test]
    fn test_month_table() {
        assert_eq!(month_number("Jan"), Some(1));
        assert_eq!(month_number("Dec"), Some(12));
        assert_eq!(month_number("Man"), None);
    }
}
