//! # Textos de Demonstração
//!
//! Pequeno corpus em inglês (os meses e sufixos reconhecidos são ingleses)
//! usado pelos testes e pelos endpoints de demonstração do servidor web.

/// Texto numérico de referência: contém ordinais, inteiros, um intervalo
/// (`15-20`), um percentual decimal (`77.9%`) e um número seguido de ponto final.
pub const NUM_CORPUS: &str = "
On the 5th of May every year, Mexicans celebrate Cinco de Mayo. This tradition
began in 1845 (the twenty-second anniversary of the Mexican Revolution), and
is the 1st example of a national independence holiday becoming popular in the
Western Hemisphere. (The Fourth of July didn't see regular celebration in the
US until 15-20 years later.) It is celebrated by 77.9% of the population--
trending toward 80.
";

/// Textos rotulados por domínio: `(domínio, texto)`.
pub fn demo_texts() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Números", NUM_CORPUS),
        (
            "Finanças",
            "The 3rd quarter report shows revenue of $12,345,678 against costs of \
             $9,876,543, a margin of 21.8%. The board met on 14 Oct, 2023 and approved \
             a buyback of 250,000 shares starting 2023-11-01.",
        ),
        (
            "Logs",
            "2015-07-25 18:22:19.123 -0800 worker 7 started\n\
             2015-07-25 18:22:20 Z worker 7 failed after 1,024 retries\n\
             2015-07-25\t18:23 MDT worker 8 started (2nd attempt)",
        ),
        (
            "Datas inválidas",
            "Neither 2015-13-25 nor 2015-07-32 nor 2015-07-25 18:65 is valid, and \
             32 Jan 2017 or 25 Der 2017 are not dates either; 31 Dec 1999 is.",
        ),
    ]
}
