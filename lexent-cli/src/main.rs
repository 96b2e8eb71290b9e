//! lexent — extração de entidades léxicas pela linha de comando
//!
//! Uso:
//!   lexent "On the 5th of May 1845"
//!   lexent -e dates_iso8601 -e integers -f log.txt -f other.txt
//!   cat texto.txt | lexent --json
//!   lexent --list

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lexent_core::{describe, scan, scan_many, Extraction, ExtractorSet};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lexent")]
#[command(about = "Extrai ordinais, inteiros e datas de texto livre")]
#[command(version)]
struct Cli {
    /// Extrator a aplicar (repetível, na ordem dada; padrão: catálogo completo)
    #[arg(short, long = "extractor", value_name = "NAME")]
    extractors: Vec<String>,

    /// Arquivo de entrada (repetível; cada arquivo é varrido separadamente)
    #[arg(short, long = "file", value_name = "PATH")]
    files: Vec<PathBuf>,

    /// Saída em JSON (um array por entrada)
    #[arg(long)]
    json: bool,

    /// Lista os extratores disponíveis e sai
    #[arg(long)]
    list: bool,

    /// Texto a varrer (lido da entrada padrão se omitido)
    #[arg(conflicts_with = "files")]
    text: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list {
        for info in describe() {
            println!("{:<20} {}", info.name, info.description);
        }
        return Ok(());
    }

    let set = extractor_set(&cli)?;
    debug!(extractors = ?set.names(), "extratores selecionados");

    let results = if !cli.files.is_empty() {
        let texts = cli
            .files
            .iter()
            .map(|path| {
                std::fs::read_to_string(path)
                    .with_context(|| format!("falha ao ler {}", path.display()))
            })
            .collect::<anyhow::Result<Vec<String>>>()?;
        scan_many(&texts, &set)
    } else {
        let text = match cli.text {
            Some(text) => text,
            None => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("falha ao ler a entrada padrão")?;
                buf
            }
        };
        vec![scan(&text, &set)]
    };

    for (i, extractions) in results.iter().enumerate() {
        if cli.json {
            println!("{}", serde_json::to_string(extractions)?);
        } else {
            if let Some(path) = cli.files.get(i) {
                println!("# {}", path.display());
            }
            for line in render(extractions) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

/// Extratores pedidos com `-e`, na ordem dada, ou o catálogo completo.
fn extractor_set(cli: &Cli) -> anyhow::Result<ExtractorSet<'static>> {
    if cli.extractors.is_empty() {
        return Ok(ExtractorSet::all());
    }
    Ok(ExtractorSet::from_names(&cli.extractors)?)
}

/// Uma linha por extração: `nome<TAB>início..fim<TAB>texto`.
///
/// Tabs e quebras de linha dentro do trecho são escapados para manter uma
/// extração por linha.
fn render(extractions: &[Extraction]) -> Vec<String> {
    extractions
        .iter()
        .map(|e| {
            format!(
                "{}\t{}..{}\t{}",
                e.extractor,
                e.matched.start,
                e.matched.end,
                e.as_str().escape_default()
            )
        })
        .collect()
}
