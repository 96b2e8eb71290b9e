//! # Inteiros
//!
//! Duas gramáticas convivem:
//!
//! - **Simples**: uma sequência máxima de dígitos (`1845`).
//! - **Agrupada**: prefixo de 1 a 3 dígitos seguido de um ou mais grupos
//!   `,ddd` (`1,234,567`).
//!
//! O reconhecedor `integers` aceita as duas formas (a agrupada tem prioridade
//! quando ambas começam no mesmo ponto). O `grouped_integers` aceita apenas a
//! forma agrupada e pode ser consultado isoladamente.
//!
//! ## Fronteiras
//!
//! O `regex` não tem lookaround, então as fronteiras são predicados:
//!
//! | Contexto                        | Exemplo       | Resultado        |
//! |---------------------------------|---------------|------------------|
//! | letra/dígito colado             | `5th`, `A12`  | rejeitado        |
//! | ponto ou vírgula + dígito       | `77.9`        | `77` e `9` fora  |
//! | ponto final sem dígito depois   | `80.`         | `80`             |
//! | hífen                           | `15-20`       | `15` e `20`      |

use crate::recognizer::{Fields, Recognizer};

pub const NAME: &str = "integers";
pub const GROUPED_NAME: &str = "grouped_integers";

const PATTERN: &str = r"(?P<grouped>[0-9]{1,3}(?:,[0-9]{3})+)|(?P<plain>[0-9]+)";
const GROUPED_PATTERN: &str = r"(?P<grouped>[0-9]{1,3}(?:,[0-9]{3})+)";

pub fn integers() -> Recognizer {
    Recognizer::new(NAME, "Inteiros simples ou agrupados por vírgula (1845, 1,234,567)", PATTERN)
        .expect("padrão embutido válido")
        .with_predicate("word_bounded", word_bounded)
        .with_predicate("outside_number", outside_number)
}

pub fn grouped_integers() -> Recognizer {
    Recognizer::new(
        GROUPED_NAME,
        "Inteiros com separador de milhar (1,234,567)",
        GROUPED_PATTERN,
    )
    .expect("padrão embutido válido")
    .with_predicate("word_bounded", word_bounded)
    .with_predicate("outside_number", outside_number)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Nenhuma letra, dígito ou `_` colado ao candidato.
fn word_bounded(f: &Fields<'_>) -> bool {
    !f.preceding().next().is_some_and(is_word_char)
        && !f.following().next().is_some_and(is_word_char)
}

/// O candidato não é parte de um decimal ou de um número agrupado maior:
/// não há `.`/`,` entre ele e outro dígito.
fn outside_number(f: &Fields<'_>) -> bool {
    !touches_separator(f.preceding()) && !touches_separator(f.following())
}

fn touches_separator(mut chars: impl Iterator<Item = char>) -> bool {
    matches!(chars.next(), Some('.' | ','))
        && chars.next().is_some_and(|c| c.is_ascii_digit())
}
