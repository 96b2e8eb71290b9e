//! # Ordinais Mistos
//!
//! Tokens do tipo `<dígitos><sufixo>` em inglês: `1st`, `22nd`, `3rd`, `5th`.
//!
//! Não há concordância entre número e sufixo: `2th` também é aceito.
//! A gramática só exige fronteira de palavra dos dois lados, para não casar
//! dentro de tokens alfanuméricos maiores (ex: `A5th`, `5thly`).

use crate::recognizer::Recognizer;

pub const NAME: &str = "mixed_ordinals";

const PATTERN: &str = r"\b(?P<number>[0-9]+)(?P<suffix>st|nd|rd|th)\b";

pub fn mixed_ordinals() -> Recognizer {
    Recognizer::new(NAME, "Ordinais com dígitos e sufixo (5th, 1st, 22nd)", PATTERN)
        .expect("padrão embutido válido")
}
