//! Chunked search for document tags
//!
//! Every boundary question in the engine goes through [`TagScanner`]:
//!
//! - [`TagScanner::rfind_tag`] returns the start `p` of the nearest tag with
//!   `p <= at_or_before`, found by walking fixed-size windows toward `floor`.
//!   Consecutive windows overlap by [`TAG_SIZE`] bytes so a marker split by a
//!   window edge is still seen whole.
//! - A marker found at `m` may lie inside the 4-byte ID of a tag starting up
//!   to 4 bytes earlier. The tag start is the leftmost `p` in `[m - 4, m]`
//!   whose 6 bytes carry a marker and a non-zero ID and fit in the corpus.
//! - [`TagScanner::find_marker`] looks forward and returns the first marker.
//!   Document bodies never contain the marker, so that is a tag start.
//!
//! The format alone cannot tell a tag from a body ending in a lone `0xFF`
//! directly before it: both positions decode as a tag. A scanner built with
//! [`TagScanner::with_size_index`] only accepts a candidate `p` carrying ID
//! `k` when document `k` starts at `p`, which makes resolution exact.

use crate::index::{Corpus, DocId, DocumentTag, SizeIndex, TAG_MARKER, TAG_SIZE, TextOffset};
use memchr::memmem;
use tracing::trace;

/// Candidate positions before a found marker that may start its tag
const ID_SLACK: u64 = (TAG_SIZE - TAG_MARKER.len()) as u64;

pub struct TagScanner<'a> {
    corpus: &'a Corpus,
    chunk_size: u64,
    size_index: Option<&'a SizeIndex>,
}

impl<'a> TagScanner<'a> {
    /// Smallest window that still advances past the overlap
    pub const MIN_CHUNK_SIZE: usize = 16;

    pub fn new(corpus: &'a Corpus, chunk_size: usize) -> Self {
        Self {
            corpus,
            chunk_size: chunk_size.max(Self::MIN_CHUNK_SIZE) as u64,
            size_index: None,
        }
    }

    /// Confirm candidate tags against document start offsets
    pub fn with_size_index(mut self, size_index: &'a SizeIndex) -> Self {
        self.size_index = Some(size_index);
        self
    }

    /// Start of the nearest tag beginning at or before `at_or_before`
    ///
    /// Only markers at or after `floor` are looked for, though the resolved
    /// tag may start up to 4 bytes below it.
    pub fn rfind_tag(&self, at_or_before: TextOffset, floor: TextOffset) -> Option<TextOffset> {
        let len = self.corpus.len();
        let marker_len = TAG_MARKER.len() as u64;
        // Exclusive end: a marker at `at_or_before` needs one more byte.
        let mut end = at_or_before.saturating_add(marker_len).min(len);

        loop {
            let start = end.saturating_sub(self.chunk_size).max(floor);
            if end < start + marker_len {
                return None;
            }

            let window = self.corpus.slice(start, end);
            trace!(start, end, "scanning window for tag");

            if let Some(i) = memmem::rfind(window, &TAG_MARKER) {
                let marker = start + i as u64;
                if let Some(tag) = self.resolve(marker) {
                    return Some(tag);
                }
                // Stray marker: keep looking strictly to its left.
                end = marker + 1;
                continue;
            }

            if start <= floor {
                return None;
            }
            end = start + TAG_SIZE as u64;
        }
    }

    /// Leftmost consistent tag start covering the marker at `marker`
    fn resolve(&self, marker: TextOffset) -> Option<TextOffset> {
        let len = self.corpus.len();
        (marker.saturating_sub(ID_SLACK)..=marker).find(|&p| p + TAG_SIZE as u64 <= len && self.is_tag_at(p))
    }

    fn is_tag_at(&self, p: TextOffset) -> bool {
        match self.tag_id(p) {
            Some(doc_id) => self.starts_document(p, doc_id),
            None => false,
        }
    }

    fn starts_document(&self, p: TextOffset, doc_id: DocId) -> bool {
        match self.size_index {
            Some(size_index) => size_index
                .document_range(doc_id)
                .is_ok_and(|range| range.start == p),
            None => true,
        }
    }

    /// First marker starting in `[from, limit)`
    ///
    /// The marker's second byte may sit at `limit` itself.
    pub fn find_marker(&self, from: TextOffset, limit: TextOffset) -> Option<TextOffset> {
        let window = self.corpus.slice(from, limit.saturating_add(1));
        memmem::find(window, &TAG_MARKER).map(|i| from + i as u64)
    }

    /// Start of the first tag whose marker begins in `[from, limit)`
    ///
    /// Bodies never hold two consecutive marker bytes, so the first marker
    /// found is the tag itself or a trailing body byte right before it.
    pub fn find_tag(&self, from: TextOffset, limit: TextOffset) -> Option<TextOffset> {
        let marker = self.find_marker(from, limit)?;
        if self.size_index.is_some() && !self.is_tag_at(marker) && self.is_tag_at(marker + 1) {
            return Some(marker + 1);
        }
        Some(marker)
    }

    /// Document ID carried by the tag at `tag_start`
    pub fn tag_id(&self, tag_start: TextOffset) -> Option<DocId> {
        DocumentTag::decode(self.corpus.read_at(tag_start, TAG_SIZE))
    }
}
