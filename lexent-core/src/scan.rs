//! # Motor de Varredura
//!
//! Aplica um conjunto ordenado de reconhecedores a um texto e produz uma
//! sequência única de pares `(extrator, match)`.
//!
//! ## Ordem do resultado
//!
//! Os resultados são agrupados por extrator, na ordem em que os extratores
//! foram passados. Dentro de cada grupo, os matches estão em ordem de início
//! e nunca se sobrepõem. Grupos diferentes **não** são intercalados por
//! posição no texto, e um mesmo trecho pode aparecer em mais de um grupo
//! (ex: `2015` como inteiro e como parte de uma data ISO).
//!
//! ```rust
//! use lexent_core::catalog::{INTEGERS, MIXED_ORDINALS};
//! use lexent_core::scan::scan;
//!
//! let found = scan("the 5th of 20 cases", [&*MIXED_ORDINALS, &*INTEGERS]);
//! let pairs: Vec<(&str, &str)> = found.iter().map(|e| (e.extractor, e.as_str())).collect();
//! assert_eq!(pairs, vec![("mixed_ordinals", "5th"), ("integers", "20")]);
//! ```
//!
//! ## Modos de Uso
//! - **Sync**: [`scan`] para chamadas diretas.
//! - **Streaming**: [`scan_streaming`] emite [`ScanEvent`]s por um canal `mpsc`,
//!   incluindo candidatos rejeitados, para interfaces que mostram o passo a passo.
//! - **Lote**: [`scan_many`] varre textos independentes em paralelo (Rayon).

use std::sync::mpsc;
use std::time::Instant;

use once_cell::sync::Lazy;
use rayon::prelude::*;
use serde::Serialize;

use crate::catalog::{catalog, lookup};
use crate::error::Result;
use crate::recognizer::{Match, Recognizer};

/// Um match acompanhado do nome do extrator que o produziu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub extractor: &'static str,
    #[serde(flatten)]
    pub matched: Match,
}

impl Extraction {
    pub fn as_str(&self) -> &str {
        self.matched.as_str()
    }
}

impl From<Extraction> for (&'static str, Match) {
    fn from(e: Extraction) -> Self {
        (e.extractor, e.matched)
    }
}

/// Sequência ordenada de reconhecedores para uma varredura.
///
/// A ordem define a ordem dos grupos no resultado. Repetições são mantidas
/// (cada ocorrência gera seu próprio grupo).
#[derive(Debug, Clone)]
pub struct ExtractorSet<'r> {
    recognizers: Vec<&'r Recognizer>,
}

impl ExtractorSet<'static> {
    /// Catálogo completo, em ordem canônica.
    pub fn all() -> Self {
        Self {
            recognizers: catalog().to_vec(),
        }
    }

    /// Monta o conjunto a partir de nomes do catálogo.
    ///
    /// Falha no primeiro nome desconhecido com `ScanError::UnknownExtractor`.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| lookup(name.as_ref()))
            .collect::<Result<Vec<_>>>()
            .map(|recognizers| Self { recognizers })
    }
}

impl<'r> ExtractorSet<'r> {
    pub fn iter(&self) -> impl Iterator<Item = &'r Recognizer> + '_ {
        self.recognizers.iter().copied()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.recognizers.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }
}

impl<'r> From<&'r Recognizer> for ExtractorSet<'r> {
    fn from(recognizer: &'r Recognizer) -> Self {
        Self {
            recognizers: vec![recognizer],
        }
    }
}

impl<'r> From<&'r Lazy<Recognizer>> for ExtractorSet<'r> {
    fn from(recognizer: &'r Lazy<Recognizer>) -> Self {
        Self {
            recognizers: vec![&**recognizer],
        }
    }
}

impl<'r> From<Vec<&'r Recognizer>> for ExtractorSet<'r> {
    fn from(recognizers: Vec<&'r Recognizer>) -> Self {
        Self { recognizers }
    }
}

impl<'r, const N: usize> From<[&'r Recognizer; N]> for ExtractorSet<'r> {
    fn from(recognizers: [&'r Recognizer; N]) -> Self {
        Self {
            recognizers: recognizers.to_vec(),
        }
    }
}

impl<'r> From<&ExtractorSet<'r>> for ExtractorSet<'r> {
    fn from(set: &ExtractorSet<'r>) -> Self {
        set.clone()
    }
}

/// Varre `text` com cada extrator, na ordem dada.
///
/// Texto sem ocorrências produz um vetor vazio, nunca um erro.
pub fn scan<'r>(text: &str, extractors: impl Into<ExtractorSet<'r>>) -> Vec<Extraction> {
    let set = extractors.into();
    let mut extractions = Vec::new();

    for recognizer in set.iter() {
        let before = extractions.len();
        extractions.extend(recognizer.find_iter(text).map(|matched| Extraction {
            extractor: recognizer.name(),
            matched,
        }));
        tracing::debug!(
            extractor = recognizer.name(),
            matches = extractions.len() - before,
            "extrator aplicado"
        );
    }

    extractions
}

/// Varre vários textos independentes em paralelo; o resultado segue a ordem
/// de entrada.
pub fn scan_many<'r, S>(texts: &[S], extractors: impl Into<ExtractorSet<'r>>) -> Vec<Vec<Extraction>>
where
    S: AsRef<str> + Sync,
{
    let set = extractors.into();
    texts.par_iter().map(|text| scan(text.as_ref(), &set)).collect()
}

/// Eventos emitidos por [`scan_streaming`].
///
/// Permitem que uma interface mostre a varredura passo a passo, inclusive
/// os candidatos que casaram a gramática mas falharam em algum predicado.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ScanEvent {
    /// Um extrator começou a varrer o texto.
    ExtractorStarted {
        extractor: &'static str,
        index: usize,
        total: usize,
    },
    /// Trecho com a gramática correta, descartado por um predicado.
    CandidateRejected {
        extractor: &'static str,
        start: usize,
        end: usize,
        text: String,
        predicate: &'static str,
    },
    /// Match válido.
    MatchFound { extraction: Extraction },
    /// Fim de um extrator.
    ExtractorFinished {
        extractor: &'static str,
        matches: usize,
    },
    /// Resultado consolidado, idêntico ao de [`scan`].
    Done {
        extractions: Vec<Extraction>,
        total: usize,
        processing_ms: u64,
    },
}

/// Executa a varredura enviando eventos de progresso pelo canal `tx`.
///
/// Se o receptor for descartado no meio do caminho, a varredura continua
/// e os eventos restantes são ignorados.
pub fn scan_streaming<'r>(
    text: &str,
    extractors: impl Into<ExtractorSet<'r>>,
    tx: mpsc::Sender<ScanEvent>,
) {
    let start = Instant::now();
    let set = extractors.into();
    let total = set.len();
    let mut extractions = Vec::new();

    for (index, recognizer) in set.iter().enumerate() {
        let extractor = recognizer.name();
        let _ = tx.send(ScanEvent::ExtractorStarted {
            extractor,
            index,
            total,
        });

        let mut matches = 0;
        for candidate in recognizer.candidates(text) {
            let matched = candidate.to_match();
            match candidate.failed_predicate() {
                Some(predicate) => {
                    let _ = tx.send(ScanEvent::CandidateRejected {
                        extractor,
                        start: matched.start,
                        end: matched.end,
                        text: matched.text,
                        predicate,
                    });
                }
                None => {
                    let extraction = Extraction { extractor, matched };
                    let _ = tx.send(ScanEvent::MatchFound {
                        extraction: extraction.clone(),
                    });
                    extractions.push(extraction);
                    matches += 1;
                }
            }
        }

        let _ = tx.send(ScanEvent::ExtractorFinished { extractor, matches });
    }

    let total = extractions.len();
    let _ = tx.send(ScanEvent::Done {
        extractions,
        total,
        processing_ms: start.elapsed().as_millis() as u64,
    });
}
