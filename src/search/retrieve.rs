//! Document retrieval by ID
//!
//! Streams `(id, text)` records to a caller-owned sink. Text borrows from the
//! corpus mapping and excludes the 6-byte tag.

use crate::error::{Error, Result};
use crate::index::{Corpus, DocId, SizeIndex, TAG_SIZE};
use std::io;
use tracing::debug;

/// Receives retrieved documents one at a time
pub trait DocumentSink {
    fn accept(&mut self, doc_id: DocId, text: &[u8]) -> io::Result<()>;
}

impl<F> DocumentSink for F
where
    F: FnMut(DocId, &[u8]) -> io::Result<()>,
{
    fn accept(&mut self, doc_id: DocId, text: &[u8]) -> io::Result<()> {
        self(doc_id, text)
    }
}

/// Body of document `doc_id`, tag stripped
pub fn document_text<'c>(corpus: &'c Corpus, size_index: &SizeIndex, doc_id: DocId) -> Result<&'c [u8]> {
    let range = size_index.document_range(doc_id)?;
    if range.end > corpus.len() {
        return Err(Error::corrupt(format!(
            "document {} ends at {} past corpus end {}",
            doc_id,
            range.end,
            corpus.len()
        )));
    }
    if range.end - range.start < TAG_SIZE as u64 {
        return Err(Error::corrupt(format!(
            "document {} spans {} bytes, shorter than its tag",
            doc_id,
            range.end - range.start
        )));
    }
    Ok(corpus.slice(range.start + TAG_SIZE as u64, range.end))
}

/// Emit each requested document to `sink`, stopping at the first failure
///
/// A record is only handed to the sink once it has been fully validated.
pub fn retrieve_documents<S: DocumentSink>(
    corpus: &Corpus,
    size_index: &SizeIndex,
    doc_ids: &[DocId],
    sink: &mut S,
) -> Result<()> {
    for &doc_id in doc_ids {
        let text = document_text(corpus, size_index, doc_id)?;
        sink.accept(doc_id, text)?;
    }
    debug!(documents = doc_ids.len(), "retrieved documents");
    Ok(())
}
