//! Range query engine
//!
//! Binary search over the suffix array for the inclusive block of suffixes
//! starting with the query. Each comparison reads at most `|query|` corpus bytes.

use crate::error::Result;
use crate::index::{Corpus, OccurrenceRange, SaIndex, SuffixArray};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, trace, warn};

/// How a comparison window cut short by the corpus end compares to the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationPolicy {
    /// A suffix shorter than the query never matches it
    #[default]
    Unequal,
    /// A suffix that is a proper prefix of the query counts as a match
    PrefixMatch,
}

impl TruncationPolicy {
    fn compare(self, window: &[u8], query: &[u8]) -> Ordering {
        if self == TruncationPolicy::PrefixMatch
            && window.len() < query.len()
            && query.starts_with(window)
        {
            return Ordering::Equal;
        }
        window.cmp(query)
    }
}

/// Compares suffixes against one query
struct Bisector<'a> {
    corpus: &'a Corpus,
    suffix_array: &'a SuffixArray,
    query: &'a [u8],
    policy: TruncationPolicy,
}

impl Bisector<'_> {
    fn compare_at(&self, index: SaIndex) -> Result<Ordering> {
        let offset = self.suffix_array.entry(index)?;
        let window = self.corpus.read_at(offset, self.query.len());
        let ordering = self.policy.compare(window, self.query);
        trace!(index, offset, ?ordering, "compare");
        Ok(ordering)
    }

    /// Leftmost matching index in `[low, mid]`, `mid` known to match
    fn leftmost(&self, mut low: SaIndex, mid: SaIndex) -> Result<SaIndex> {
        let mut found = mid;
        let mut high = mid;
        while low < high {
            let pivot = low + (high - low) / 2;
            if self.compare_at(pivot)? == Ordering::Equal {
                found = pivot;
                high = pivot;
            } else {
                low = pivot + 1;
            }
        }
        Ok(found)
    }

    /// Rightmost matching index in `[mid, high]`, `mid` known to match
    fn rightmost(&self, mid: SaIndex, mut high: SaIndex) -> Result<SaIndex> {
        let mut found = mid;
        let mut low = mid;
        while low < high {
            let pivot = low + (high - low).div_ceil(2);
            if self.compare_at(pivot)? == Ordering::Equal {
                found = pivot;
                low = pivot;
            } else {
                high = pivot - 1;
            }
        }
        Ok(found)
    }
}

/// Find the suffix array range of suffixes starting with `query`
///
/// Returns `Ok(None)` when nothing matches. The empty query matches every
/// suffix.
pub fn count_occurrences(
    corpus: &Corpus,
    suffix_array: &SuffixArray,
    query: &[u8],
    policy: TruncationPolicy,
) -> Result<Option<OccurrenceRange>> {
    let entry_count = suffix_array.entry_count();
    if entry_count == 0 {
        return Ok(None);
    }
    if query.is_empty() {
        return Ok(Some(OccurrenceRange::new(0, entry_count - 1)?));
    }

    let bisector = Bisector {
        corpus,
        suffix_array,
        query,
        policy,
    };

    // Inclusive bounds; `high` goes below `low` only through `checked_sub`.
    let mut low: SaIndex = 0;
    let mut high: SaIndex = entry_count - 1;
    while low <= high {
        let mid = low + (high - low) / 2;
        match bisector.compare_at(mid)? {
            Ordering::Less => low = mid + 1,
            Ordering::Greater => match mid.checked_sub(1) {
                Some(next) => high = next,
                None => break,
            },
            Ordering::Equal => {
                let first = bisector.leftmost(low, mid)?;
                let last = bisector.rightmost(mid, high)?;
                let range = OccurrenceRange::new(first, last)?;
                if policy == TruncationPolicy::PrefixMatch {
                    warn_on_truncated_edges(&bisector, &range)?;
                }
                debug!(first, last, count = range.count(), "query matched");
                return Ok(Some(range));
            }
        }
    }

    debug!(query_len = query.len(), "query matched nothing");
    Ok(None)
}

fn warn_on_truncated_edges(bisector: &Bisector<'_>, range: &OccurrenceRange) -> Result<()> {
    for index in [range.first, range.last] {
        let offset = bisector.suffix_array.entry(index)?;
        if bisector.corpus.len() - offset < bisector.query.len() as u64 {
            warn!(index, offset, "truncated suffix counted as a match");
        }
    }
    Ok(())
}
