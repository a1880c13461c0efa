//! Context extraction around matches
//!
//! For each occurrence, a fixed window of bytes before the match and after its
//! end, clipped so neither side reaches into a neighbouring document.

use super::scan::TagScanner;
use crate::error::Result;
use crate::index::{
    Corpus, DEFAULT_CONTEXT_SIZE, DEFAULT_MAX_CONTEXTS, OccurrenceRange, SizeIndex, SuffixArray,
    TAG_SIZE, TextOffset,
};
use std::ops::Deref;
use tracing::debug;

/// Window size and occurrence cap for context requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextLimits {
    pub window: usize,
    pub max_occurrences: usize,
}

impl Default for ContextLimits {
    fn default() -> Self {
        Self {
            window: DEFAULT_CONTEXT_SIZE,
            max_occurrences: DEFAULT_MAX_CONTEXTS,
        }
    }
}

/// Text around one occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Corpus offset of the match
    pub offset: TextOffset,
    pub before: Vec<u8>,
    pub after: Vec<u8>,
}

/// Snippets in suffix array order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snippets(Vec<Snippet>);

impl Snippets {
    /// Split into parallel `before` / `after` lists; index `i` of each is the
    /// same occurrence
    pub fn into_parts(self) -> (Vec<Vec<u8>>, Vec<Vec<u8>>) {
        self.0.into_iter().map(|s| (s.before, s.after)).unzip()
    }

    pub fn into_inner(self) -> Vec<Snippet> {
        self.0
    }
}

impl Deref for Snippets {
    type Target = [Snippet];

    fn deref(&self) -> &[Snippet] {
        &self.0
    }
}

/// Context for up to `limits.max_occurrences` leading occurrences of `range`
///
/// With a size index, tags found while clipping are confirmed against it.
pub fn nearby_words(
    corpus: &Corpus,
    suffix_array: &SuffixArray,
    size_index: Option<&SizeIndex>,
    range: OccurrenceRange,
    query_len: usize,
    limits: ContextLimits,
) -> Result<Snippets> {
    range.check_within(suffix_array.entry_count())?;
    let range = range.truncated(limits.max_occurrences);

    // One scanner window covers the whole "before" search region.
    let mut scanner = TagScanner::new(corpus, limits.window + 2 * TAG_SIZE);
    if let Some(size_index) = size_index {
        scanner = scanner.with_size_index(size_index);
    }
    let window = limits.window as u64;

    let mut snippets = Vec::with_capacity(range.count() as usize);
    for index in range.indices() {
        let offset = suffix_array.entry(index)?;

        let start = offset.saturating_sub(window);
        let floor = start.saturating_sub((TAG_SIZE - 1) as u64);
        let clip = match scanner.rfind_tag(offset, floor) {
            Some(tag) => (tag + TAG_SIZE as u64).min(offset).max(start),
            None => start,
        };
        let before = corpus.slice(clip, offset).to_vec();

        let match_end = offset.saturating_add(query_len as u64).min(corpus.len());
        let mut after_end = match_end.saturating_add(window).min(corpus.len());
        if let Some(tag) = scanner.find_tag(match_end, after_end) {
            after_end = tag;
        }
        let after = corpus.slice(match_end, after_end).to_vec();

        snippets.push(Snippet {
            offset,
            before,
            after,
        });
    }

    debug!(snippets = snippets.len(), "extracted context");
    Ok(Snippets(snippets))
}
