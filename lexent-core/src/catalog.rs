//! # Catálogo de Reconhecedores
//!
//! Instâncias únicas, compiladas na primeira utilização e compartilhadas
//! entre threads. A ordem de [`catalog`] é a ordem canônica usada quando
//! nenhum extrator é escolhido explicitamente.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::dates::{dates_dd_mon_year, dates_iso8601};
use crate::error::{Result, ScanError};
use crate::integers::{grouped_integers, integers};
use crate::ordinals::mixed_ordinals;
use crate::recognizer::Recognizer;

pub static MIXED_ORDINALS: Lazy<Recognizer> = Lazy::new(mixed_ordinals);
pub static INTEGERS: Lazy<Recognizer> = Lazy::new(integers);
pub static GROUPED_INTEGERS: Lazy<Recognizer> = Lazy::new(grouped_integers);
pub static DATES_ISO8601: Lazy<Recognizer> = Lazy::new(dates_iso8601);
pub static DATES_DD_MON_YEAR: Lazy<Recognizer> = Lazy::new(dates_dd_mon_year);

/// Todos os reconhecedores embutidos, em ordem canônica.
pub fn catalog() -> [&'static Recognizer; 5] {
    [
        &MIXED_ORDINALS,
        &INTEGERS,
        &GROUPED_INTEGERS,
        &DATES_ISO8601,
        &DATES_DD_MON_YEAR,
    ]
}

/// Busca um reconhecedor pelo nome; nomes desconhecidos falham imediatamente.
pub fn lookup(name: &str) -> Result<&'static Recognizer> {
    catalog()
        .into_iter()
        .find(|r| r.name() == name)
        .ok_or_else(|| ScanError::UnknownExtractor(name.to_string()))
}

/// Descrição pública de um extrator (para `--list` e `GET /extractors`).
#[derive(Debug, Clone, Serialize)]
pub struct ExtractorInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub pattern: String,
    pub predicates: Vec<&'static str>,
}

impl From<&Recognizer> for ExtractorInfo {
    fn from(r: &Recognizer) -> Self {
        Self {
            name: r.name(),
            description: r.description(),
            pattern: r.pattern().to_string(),
            predicates: r.predicates().iter().map(|p| p.name).collect(),
        }
    }
}

pub fn describe() -> Vec<ExtractorInfo> {
    catalog().into_iter().map(ExtractorInfo::from).collect()
}
