//! Batch queries read from a file, one per line

use crate::api::Quarry;
use crate::output::CsvSink;
use anyhow::{Context, Result};
use base64::Engine;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

/// Read one query per line. Blank lines are skipped and a trailing `\r` is
/// dropped.
pub fn read_queries(path: &Path, base64: bool) -> Result<Vec<Vec<u8>>> {
    let content = fs::read(path)
        .with_context(|| format!("Failed to read query file {}", path.display()))?;

    let mut queries = Vec::new();
    for (line_no, line) in content.split(|&b| b == b'\n').enumerate() {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.is_empty() {
            continue;
        }
        let query = if base64 {
            base64::engine::general_purpose::STANDARD
                .decode(line)
                .with_context(|| format!("Invalid base64 on line {} of {}", line_no + 1, path.display()))?
        } else {
            line.to_vec()
        };
        queries.push(query);
    }
    Ok(queries)
}

/// `<stem>-results.csv` next to the query file
pub fn results_path(queries_file: &Path) -> PathBuf {
    let stem = queries_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    queries_file.with_file_name(format!("{}-results.csv", stem))
}

/// Write `query: count` for each query
pub fn count_queries<W: Write>(
    quarry: &Quarry,
    corpus: &Path,
    queries: &[Vec<u8>],
    out: &mut W,
) -> Result<Duration> {
    let started = Instant::now();
    for query in queries {
        let outcome = quarry.query(corpus, query)?;
        writeln!(out, "{}: {}", String::from_utf8_lossy(query), outcome.count)?;
    }
    let elapsed = started.elapsed();
    info!(queries = queries.len(), ?elapsed, "batch count finished");
    Ok(elapsed)
}

/// Export every document containing each query as
/// `queryID,query,docID,document` rows
///
/// Query IDs are 0-based positions in `queries`.
pub fn export_queries<W: Write>(
    quarry: &Quarry,
    corpus: &Path,
    queries: &[Vec<u8>],
    out: W,
) -> Result<Duration> {
    let started = Instant::now();
    let mut sink = CsvSink::batch(out);
    sink.write_header()?;

    for (query_id, query) in queries.iter().enumerate() {
        let outcome = quarry.query(corpus, query)?;
        let doc_ids: Vec<u32> = match outcome.range {
            Some(range) => quarry
                .document_set(corpus, range.first as i64, range.last as i64)?
                .into_iter()
                .collect(),
            None => Vec::new(),
        };
        sink.set_query(query_id, query);
        quarry.retrieve(corpus, &doc_ids, &mut sink)?;
        info!(query_id, documents = doc_ids.len(), "exported query");
    }

    sink.flush()?;
    let elapsed = started.elapsed();
    info!(queries = queries.len(), ?elapsed, "batch export finished");
    Ok(elapsed)
}

/// Run [`export_queries`] into the results file for `queries_file`
pub fn export_to_results_file(
    quarry: &Quarry,
    corpus: &Path,
    queries_file: &Path,
    queries: &[Vec<u8>],
) -> Result<(PathBuf, Duration)> {
    let path = results_path(queries_file);
    let file = File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let elapsed = export_queries(quarry, corpus, queries, BufWriter::new(file))?;
    Ok((path, elapsed))
}
