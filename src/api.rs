//! Path-based entry points for serving layers
//!
//! Each call opens the files it needs, runs one operation and releases them
//! on return. Bounds arrive as `i64` so negative values from external callers
//! are rejected before any file is touched.

use crate::config::QueryConfig;
use crate::error::Result;
use crate::index::{CorpusIndex, CorpusPaths, DocId, OccurrenceRange};
use crate::search::{self, DocumentSink, Snippets};
use roaring::RoaringBitmap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// Result of an occurrence count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub count: u64,
    pub range: Option<OccurrenceRange>,
}

impl QueryOutcome {
    fn from_range(range: Option<OccurrenceRange>) -> Self {
        Self {
            count: range.map_or(0, |r| r.count()),
            range,
        }
    }

    /// First suffix array index, `-1` when nothing matched
    pub fn first_index(&self) -> i64 {
        self.range.map_or(-1, |r| r.first as i64)
    }

    /// Last suffix array index, `-1` when nothing matched
    pub fn last_index(&self) -> i64 {
        self.range.map_or(-1, |r| r.last as i64)
    }
}

/// Query entry points sharing one configuration
#[derive(Debug, Clone, Default)]
pub struct Quarry {
    config: QueryConfig,
}

impl Quarry {
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn query(&self, corpus_path: &Path, query: &[u8]) -> Result<QueryOutcome> {
        let started = Instant::now();
        let paths = CorpusPaths::new(corpus_path);
        let corpus = paths.open_corpus()?;
        let suffix_array = paths.open_suffix_array(&corpus)?;
        let range = search::count_occurrences(&corpus, &suffix_array, query, self.config.truncation)?;
        let outcome = QueryOutcome::from_range(range);
        debug!(
            corpus = %corpus_path.display(),
            count = outcome.count,
            elapsed = ?started.elapsed(),
            "query"
        );
        Ok(outcome)
    }

    pub fn context(&self, corpus_path: &Path, first: i64, last: i64, query_len: usize) -> Result<Snippets> {
        let range = OccurrenceRange::from_signed(first, last)?;
        let started = Instant::now();
        let index = CorpusIndex::open(corpus_path)?;
        let snippets = search::nearby_words(
            &index.corpus,
            &index.suffix_array,
            Some(&index.size_index),
            range,
            query_len,
            self.config.context_limits(),
        )?;
        debug!(
            corpus = %corpus_path.display(),
            snippets = snippets.len(),
            elapsed = ?started.elapsed(),
            "context"
        );
        Ok(snippets)
    }

    pub fn documents(&self, corpus_path: &Path, first: i64, last: i64) -> Result<Vec<DocId>> {
        let range = OccurrenceRange::from_signed(first, last)?;
        let started = Instant::now();
        let index = CorpusIndex::open(corpus_path)?;
        let doc_ids = search::find_documents(
            &index.corpus,
            &index.suffix_array,
            &index.size_index,
            range,
            self.config.chunk_size,
        )?;
        debug!(
            corpus = %corpus_path.display(),
            documents = doc_ids.len(),
            elapsed = ?started.elapsed(),
            "documents"
        );
        Ok(doc_ids)
    }

    /// Distinct documents for an occurrence range
    pub fn document_set(&self, corpus_path: &Path, first: i64, last: i64) -> Result<RoaringBitmap> {
        let range = OccurrenceRange::from_signed(first, last)?;
        let started = Instant::now();
        let index = CorpusIndex::open(corpus_path)?;
        let set = search::document_set(
            &index.corpus,
            &index.suffix_array,
            &index.size_index,
            range,
            self.config.chunk_size,
        )?;
        debug!(
            corpus = %corpus_path.display(),
            documents = set.len(),
            elapsed = ?started.elapsed(),
            "document set"
        );
        Ok(set)
    }

    pub fn retrieve<S: DocumentSink>(&self, corpus_path: &Path, doc_ids: &[DocId], sink: &mut S) -> Result<()> {
        let started = Instant::now();
        let paths = CorpusPaths::new(corpus_path);
        let corpus = paths.open_corpus()?;
        let size_index = paths.open_size_index()?;
        search::retrieve_documents(&corpus, &size_index, doc_ids, sink)?;
        debug!(
            corpus = %corpus_path.display(),
            documents = doc_ids.len(),
            elapsed = ?started.elapsed(),
            "retrieve"
        );
        Ok(())
    }
}

/// Count occurrences of `query` with the default configuration
pub fn query(corpus_path: impl AsRef<Path>, query: &[u8]) -> Result<QueryOutcome> {
    Quarry::default().query(corpus_path.as_ref(), query)
}

/// Context windows for the occurrences in `[first, last]`
pub fn context(corpus_path: impl AsRef<Path>, first: i64, last: i64, query_len: usize) -> Result<Snippets> {
    Quarry::default().context(corpus_path.as_ref(), first, last, query_len)
}

/// Document ID of every occurrence in `[first, last]`
pub fn documents(corpus_path: impl AsRef<Path>, first: i64, last: i64) -> Result<Vec<DocId>> {
    Quarry::default().documents(corpus_path.as_ref(), first, last)
}

/// Stream documents to `sink`
pub fn retrieve<S: DocumentSink>(corpus_path: impl AsRef<Path>, doc_ids: &[DocId], sink: &mut S) -> Result<()> {
    Quarry::default().retrieve(corpus_path.as_ref(), doc_ids, sink)
}
