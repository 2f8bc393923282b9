//! Bulk import of precomputed data from tab-separated files.
//!
//! | File | Row format |
//! |------|------------|
//! | vectors | `word<TAB>v1 v2 ... v300` |
//! | neighbors | `secret<TAB>neighbor<TAB>percentile<TAB>similarity` |
//! | ranges | `secret<TAB>top<TAB>top10<TAB>rest` |
//!
//! Blank lines and lines starting with `#` are skipped. Each file is parsed
//! completely before anything is written, so a malformed row aborts that
//! file without a partial import.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use multimantle_core::{SimilarityRange, WordVector, VECTOR_DIM};
use multimantle_storage::{NeighborEntry, RocksDbVectorStore};
use tracing::{error, info};

use crate::error::CliExitCode;

/// Arguments for the import command.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Word vectors TSV
    #[arg(long)]
    pub vectors: Option<PathBuf>,

    /// Store vectors packed to bfloat16 (600 bytes instead of 1200)
    #[arg(long)]
    pub packed: bool,

    /// Neighbor rows TSV
    #[arg(long)]
    pub neighbors: Option<PathBuf>,

    /// Similarity ranges TSV
    #[arg(long)]
    pub ranges: Option<PathBuf>,
}

fn data_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty() && !line.starts_with('#'))
}

fn fields<const N: usize>(line: &str, line_no: usize) -> Result<[&str; N]> {
    let parts: Vec<&str> = line.split('\t').collect();
    parts
        .try_into()
        .map_err(|parts: Vec<&str>| {
            anyhow::anyhow!(
                "line {}: expected {} tab-separated fields, got {}",
                line_no,
                N,
                parts.len()
            )
        })
}

pub fn parse_vectors(content: &str) -> Result<Vec<(String, WordVector)>> {
    let mut rows = Vec::new();
    for (line_no, line) in data_lines(content) {
        let [word, values] = fields::<2>(line, line_no)?;
        let vector = values
            .split_whitespace()
            .map(str::parse::<f32>)
            .collect::<Result<WordVector, _>>()
            .with_context(|| format!("line {}: bad vector component", line_no))?;
        if vector.len() != VECTOR_DIM {
            bail!(
                "line {}: expected {} components, got {}",
                line_no,
                VECTOR_DIM,
                vector.len()
            );
        }
        rows.push((word.to_string(), vector));
    }
    Ok(rows)
}

pub fn parse_neighbors(content: &str) -> Result<Vec<(String, String, NeighborEntry)>> {
    let mut rows = Vec::new();
    for (line_no, line) in data_lines(content) {
        let [secret, neighbor, percentile, similarity] = fields::<4>(line, line_no)?;
        let entry = NeighborEntry {
            percentile: percentile
                .trim()
                .parse()
                .with_context(|| format!("line {}: bad percentile", line_no))?,
            similarity: similarity
                .trim()
                .parse()
                .with_context(|| format!("line {}: bad similarity", line_no))?,
        };
        rows.push((secret.to_string(), neighbor.to_string(), entry));
    }
    Ok(rows)
}

pub fn parse_ranges(content: &str) -> Result<Vec<(String, SimilarityRange)>> {
    let mut rows = Vec::new();
    for (line_no, line) in data_lines(content) {
        let [secret, top, top10, rest] = fields::<4>(line, line_no)?;
        let parse = |raw: &str, name: &str| -> Result<f64> {
            raw.trim()
                .parse()
                .with_context(|| format!("line {}: bad {}", line_no, name))
        };
        let range = SimilarityRange {
            top: parse(top, "top")?,
            top10: parse(top10, "top10")?,
            rest: parse(rest, "rest")?,
        };
        rows.push((secret.to_string(), range));
    }
    Ok(rows)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn run_import(args: &ImportArgs, store: &RocksDbVectorStore) -> Result<()> {
    if let Some(path) = &args.vectors {
        let rows = parse_vectors(&read(path)?).with_context(|| path.display().to_string())?;
        let count = store.import_word_vectors(rows, args.packed)?;
        info!(path = %path.display(), count, "Vectors imported");
    }
    if let Some(path) = &args.neighbors {
        let rows = parse_neighbors(&read(path)?).with_context(|| path.display().to_string())?;
        let count = store.import_neighbors(rows)?;
        info!(path = %path.display(), count, "Neighbors imported");
    }
    if let Some(path) = &args.ranges {
        let rows = parse_ranges(&read(path)?).with_context(|| path.display().to_string())?;
        let count = store.import_similarity_ranges(rows)?;
        info!(path = %path.display(), count, "Similarity ranges imported");
    }
    store.flush_all()?;
    Ok(())
}

/// Execute the import command.
///
/// # Returns
///
/// Exit code:
/// - 0: every given file imported
/// - 1: a file could not be read, parsed or written
/// - 2: no input file given
pub fn handle_import(args: ImportArgs, store: &RocksDbVectorStore) -> i32 {
    if args.vectors.is_none() && args.neighbors.is_none() && args.ranges.is_none() {
        error!("Nothing to import: pass --vectors, --neighbors and/or --ranges");
        return CliExitCode::Usage.into();
    }

    match run_import(&args, store) {
        Ok(()) => CliExitCode::Success.into(),
        Err(e) => {
            error!("Import failed: {:#}", e);
            CliExitCode::Error.into()
        }
    }
}
