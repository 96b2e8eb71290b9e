//! # Reconhecedores — Gramática de Superfície + Predicados de Validade
//!
//! Um [`Recognizer`] é um valor imutável que junta duas coisas:
//!
//! 1. **Gramática de superfície**: uma expressão regular com grupos nomeados
//!    (ex: `(?P<month>[0-9]{2})`).
//! 2. **Predicados de validade**: funções puras sobre os campos capturados
//!    ([`Fields`]), como "mês entre 01 e 12".
//!
//! Um candidato que casa a gramática mas viola algum predicado é rejeitado
//! por inteiro, e a busca recomeça no caractere seguinte ao início do
//! candidato. Assim uma ocorrência válida mais adiante no texto continua
//! sendo encontrada.
//!
//! O crate `regex` usa autômatos finitos (tempo linear no pior caso), então
//! não há backtracking catastrófico mesmo com entrada adversarial.
//!
//! ## Exemplo
//!
//! ```rust
//! use lexent_core::recognizer::Recognizer;
//!
//! let hours = Recognizer::new("hours", "Horas no formato HHh", r"\b(?P<h>[0-9]{2})h\b")
//!     .unwrap()
//!     .with_predicate("hour_in_range", |f| f.number("h").map_or(false, |h| h < 24));
//!
//! let found: Vec<String> = hours.find_iter("às 14h e às 27h").map(|m| m.text).collect();
//! assert_eq!(found, vec!["14h"]);
//! ```

use std::collections::BTreeMap;
use std::str::Chars;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::error::{Result, ScanError};

/// Uma ocorrência localizada e validada no texto.
///
/// `start` e `end` são offsets de byte no texto original (o `end` é exclusivo),
/// no mesmo esquema dos índices de `str`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Match {
    /// Índice de byte inicial (inclusive).
    pub start: usize,
    /// Índice de byte final (exclusivo).
    pub end: usize,
    /// O trecho casado, igual a `&text[start..end]`.
    pub text: String,
}

impl Match {
    /// O texto casado (equivalente ao "grupo 0").
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Dois matches se sobrepõem se compartilham ao menos um byte.
    pub fn overlaps(&self, other: &Match) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Registro estruturado das capturas de um candidato.
///
/// É a única entrada dos predicados de validade. Além dos grupos nomeados,
/// expõe o contexto imediato (caracteres antes e depois do trecho), usado
/// pelas regras de fronteira que o `regex` não expressa (não há lookaround).
#[derive(Debug)]
pub struct Fields<'t> {
    text: &'t str,
    captures: Captures<'t>,
}

impl<'t> Fields<'t> {
    fn new(text: &'t str, captures: Captures<'t>) -> Self {
        Self { text, captures }
    }

    /// Texto de um grupo nomeado, se ele participou do match.
    pub fn get(&self, name: &str) -> Option<&'t str> {
        self.captures.name(name).map(|m| m.as_str())
    }

    /// Verdadeiro se o grupo opcional participou do match.
    pub fn has(&self, name: &str) -> bool {
        self.captures.name(name).is_some()
    }

    /// Valor numérico de um grupo nomeado composto de dígitos ASCII.
    pub fn number(&self, name: &str) -> Option<u32> {
        self.get(name)?.parse().ok()
    }

    /// Texto completo do candidato.
    pub fn matched(&self) -> &'t str {
        self.whole().as_str()
    }

    pub fn start(&self) -> usize {
        self.whole().start()
    }

    pub fn end(&self) -> usize {
        self.whole().end()
    }

    /// Caracteres antes do candidato, do mais próximo para o mais distante.
    pub fn preceding(&self) -> std::iter::Rev<Chars<'t>> {
        self.text[..self.start()].chars().rev()
    }

    /// Caracteres depois do candidato, do mais próximo para o mais distante.
    pub fn following(&self) -> Chars<'t> {
        self.text[self.end()..].chars()
    }

    fn whole(&self) -> regex::Match<'t> {
        // o grupo 0 sempre existe em um Captures retornado pelo regex
        self.captures
            .get(0)
            .unwrap_or_else(|| unreachable!("captures without group 0"))
    }
}

/// Assinatura de um predicado de validade.
pub type Check = fn(&Fields<'_>) -> bool;

/// Predicado nomeado. O nome aparece nos logs e nos eventos de rejeição.
#[derive(Debug, Clone, Copy)]
pub struct Predicate {
    pub name: &'static str,
    pub check: Check,
}

/// Reconhecedor nomeado: gramática de superfície + predicados.
///
/// Imutável e sem estado; pode ser compartilhado entre threads
/// (`Send + Sync`) e reutilizado em quantas varreduras forem necessárias.
#[derive(Debug, Clone)]
pub struct Recognizer {
    name: &'static str,
    description: &'static str,
    pattern: Regex,
    predicates: Vec<Predicate>,
}

impl Recognizer {
    /// Compila o padrão de superfície.
    ///
    /// Falha com [`ScanError::InvalidPattern`] se o regex for inválido e com
    /// [`ScanError::EmptyMatch`] se ele aceitar a string vazia.
    pub fn new(name: &'static str, description: &'static str, pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|source| ScanError::InvalidPattern {
            name: name.to_string(),
            source,
        })?;
        if pattern.is_match("") {
            return Err(ScanError::EmptyMatch(name.to_string()));
        }
        Ok(Self {
            name,
            description,
            pattern,
            predicates: Vec::new(),
        })
    }

    /// Acrescenta um predicado de validade (todos precisam ser verdadeiros).
    pub fn with_predicate(mut self, name: &'static str, check: Check) -> Self {
        self.predicates.push(Predicate { name, check });
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Primeiro predicado violado pelo candidato, se houver.
    pub fn failed_predicate(&self, fields: &Fields<'_>) -> Option<&'static str> {
        self.predicates
            .iter()
            .find(|p| !(p.check)(fields))
            .map(|p| p.name)
    }

    /// Todos os candidatos (aceitos e rejeitados), da esquerda para a direita.
    pub fn candidates<'r, 't>(&'r self, text: &'t str) -> Candidates<'r, 't> {
        Candidates {
            recognizer: self,
            text,
            pos: 0,
        }
    }

    /// Apenas os matches válidos, sem sobreposição, em ordem de início.
    pub fn find_iter<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Match> + 'a {
        self.candidates(text)
            .filter(Candidate::is_accepted)
            .map(|c| c.to_match())
    }

    /// Grupos nomeados de cada match válido (grupos ausentes são omitidos).
    pub fn find_fields(&self, text: &str) -> Vec<BTreeMap<String, String>> {
        self.candidates(text)
            .filter(Candidate::is_accepted)
            .map(|c| c.named_fields())
            .collect()
    }
}

/// Um trecho que casou a gramática de superfície, com o veredito dos predicados.
#[derive(Debug)]
pub struct Candidate<'r, 't> {
    recognizer: &'r Recognizer,
    fields: Fields<'t>,
    failed: Option<&'static str>,
}

impl<'r, 't> Candidate<'r, 't> {
    pub fn is_accepted(&self) -> bool {
        self.failed.is_none()
    }

    /// Nome do predicado que rejeitou o candidato.
    pub fn failed_predicate(&self) -> Option<&'static str> {
        self.failed
    }

    pub fn to_match(&self) -> Match {
        Match {
            start: self.fields.start(),
            end: self.fields.end(),
            text: self.fields.matched().to_string(),
        }
    }

    pub fn named_fields(&self) -> BTreeMap<String, String> {
        self.recognizer
            .pattern
            .capture_names()
            .flatten()
            .filter_map(|name| {
                self.fields
                    .get(name)
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect()
    }
}

/// Iterador de candidatos de um reconhecedor sobre um texto.
///
/// Após um candidato aceito, a busca continua no fim dele (sem sobreposição).
/// Após um rejeitado, continua no caractere seguinte ao seu início.
pub struct Candidates<'r, 't> {
    recognizer: &'r Recognizer,
    text: &'t str,
    pos: usize,
}

impl<'r, 't> Iterator for Candidates<'r, 't> {
    type Item = Candidate<'r, 't>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos <= self.text.len() {
            let captures = self.recognizer.pattern.captures_at(self.text, self.pos)?;
            let fields = Fields::new(self.text, captures);
            let (start, end) = (fields.start(), fields.end());

            if start == end {
                // um padrão como `\b` não casa "" mas casa vazio no meio do
                // texto; matches vazios nunca são reportados
                self.pos = next_char(self.text, start);
                continue;
            }

            let failed = self.recognizer.failed_predicate(&fields);
            self.pos = match failed {
                None => end,
                Some(predicate) => {
                    tracing::trace!(
                        extractor = self.recognizer.name,
                        predicate,
                        start,
                        candidate = fields.matched(),
                        "candidato rejeitado"
                    );
                    next_char(self.text, start)
                }
            };

            return Some(Candidate {
                recognizer: self.recognizer,
                fields,
                failed,
            });
        }
        None
    }
}

/// Índice de byte do caractere seguinte a `at` (ou `len + 1` no fim do texto).
fn next_char(text: &str, at: usize) -> usize {
    at + text[at..].chars().next().map_or(1, char::len_utf8)
}
