//! # lexent-core — Extração de Entidades Léxicas
//!
//! Este crate encontra entidades léxicas estruturadas em texto livre:
//! ordinais (`5th`), inteiros (`1845`, `1,234,567`), datas ISO-8601
//! (`2015-07-25 18:22:19.123 -0800`) e datas "dia Mês ano" (`25 Jan 2017`).
//!
//! ## Arquitetura
//!
//! Duas camadas, das folhas para o topo:
//!
//! 1.  **Reconhecedores** ([`recognizer`], [`ordinals`], [`integers`], [`dates`]):
//!     cada um é um valor imutável com uma gramática de superfície (regex) e
//!     predicados de validade sobre os campos capturados.
//! 2.  **Motor de varredura** ([`scan`]): aplica um conjunto ordenado de
//!     reconhecedores ([`ExtractorSet`]) e devolve os pares
//!     `(extrator, match)` agrupados por extrator.
//!
//! O [`catalog`] reúne os reconhecedores embutidos e resolve nomes
//! (`"integers"`, `"dates_iso8601"`…), falhando com
//! [`ScanError::UnknownExtractor`] para nomes desconhecidos.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use lexent_core::{scan, ExtractorSet};
//!
//! let set = ExtractorSet::from_names(["dates_iso8601", "integers"]).unwrap();
//! let found = scan("Deploy 2015-07-25 18:22 Z, 3 hosts", &set);
//!
//! for extraction in &found {
//!     println!("{} [{}..{}] {}", extraction.extractor, extraction.matched.start,
//!         extraction.matched.end, extraction.as_str());
//! }
//! assert_eq!(found[0].as_str(), "2015-07-25 18:22 Z");
//! ```
//!
//! Nenhuma varredura tem efeitos colaterais: o texto nunca é alterado e os
//! reconhecedores podem ser compartilhados entre threads.

pub mod catalog;
pub mod corpus;
pub mod dates;
pub mod error;
pub mod integers;
pub mod ordinals;
pub mod recognizer;
pub mod scan;

pub use catalog::{describe, lookup, ExtractorInfo};
pub use error::ScanError;
pub use recognizer::{Match, Recognizer};
pub use scan::{scan, scan_many, scan_streaming, Extraction, ExtractorSet, ScanEvent};
