//! Erros da fronteira da API.
//!
//! Varrer texto nunca falha: ausência de matches é um resultado vazio.
//! Os únicos erros vêm de definições ou seleções inválidas de extratores.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// Nome de extrator que não existe no catálogo.
    #[error("unknown extractor: {0}")]
    UnknownExtractor(String),

    /// Padrão regex inválido em um reconhecedor customizado.
    #[error("invalid pattern for extractor {name}: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// O padrão aceita a string vazia, o que tornaria a varredura degenerada.
    #[error("pattern for extractor {0} matches the empty string")]
    EmptyMatch(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_extractor_message() {
        let err = ScanError::UnknownExtractor("romans".to_string());
        assert_eq!(err.to_string(), "unknown extractor: romans");
    }
}
