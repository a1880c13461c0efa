use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Identifier of a document in the corpus (1-based, dense)
pub type DocId = u32;

/// Byte offset into the corpus
pub type TextOffset = u64;

/// Rank of a suffix in the suffix array
pub type SaIndex = u64;

/// Two marker bytes opening every document tag
pub const TAG_MARKER: [u8; 2] = [0xFF, 0xFF];

/// Marker plus a little-endian u32 document ID
pub const TAG_SIZE: usize = 6;

/// Width of one cumulative offset in the size index
pub const SIZE_ENTRY_BYTES: usize = 8;

/// Backward scan window when resolving document IDs
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Bytes of context read on each side of a match
pub const DEFAULT_CONTEXT_SIZE: usize = 128;

/// Maximum number of occurrences a context request looks at
pub const DEFAULT_MAX_CONTEXTS: usize = 64;

/// Byte width of one packed suffix array entry
///
/// Inferred once per open from `file_size / entry_count` and passed to every
/// decode. Entries narrower than 8 bytes are zero-extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryWidth(u8);

impl EntryWidth {
    pub const MAX: usize = 8;

    pub fn new(bytes: usize) -> Result<Self> {
        if bytes == 0 || bytes > Self::MAX {
            return Err(Error::corrupt(format!(
                "suffix array entry width {} outside 1..={}",
                bytes,
                Self::MAX
            )));
        }
        Ok(Self(bytes as u8))
    }

    /// Derive the width from the table size and the corpus length
    pub fn infer(table_size: u64, entry_count: u64) -> Result<Self> {
        if entry_count == 0 {
            return Err(Error::corrupt("cannot infer entry width for an empty corpus"));
        }
        if table_size % entry_count != 0 {
            return Err(Error::corrupt(format!(
                "suffix array size {} is not a multiple of corpus length {}",
                table_size, entry_count
            )));
        }
        Self::new((table_size / entry_count) as usize)
    }

    #[inline]
    pub fn bytes(self) -> usize {
        self.0 as usize
    }

    /// Zero-extend a little-endian entry of exactly `self.bytes()` bytes
    #[inline]
    pub fn decode(self, raw: &[u8]) -> u64 {
        debug_assert_eq!(raw.len(), self.bytes());
        let mut buf = [0u8; 8];
        buf[..raw.len()].copy_from_slice(raw);
        u64::from_le_bytes(buf)
    }

    /// Encode `value` in this width, dropping the high bytes
    pub fn encode(self, value: u64) -> Vec<u8> {
        value.to_le_bytes()[..self.bytes()].to_vec()
    }

    /// Smallest width able to address every offset below `entry_count`
    pub fn for_entry_count(entry_count: u64) -> Self {
        let max = entry_count.saturating_sub(1);
        let bits = 64 - max.leading_zeros() as usize;
        Self(bits.div_ceil(8).max(1) as u8)
    }
}

/// Inclusive range `[first, last]` of suffix array indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceRange {
    pub first: SaIndex,
    pub last: SaIndex,
}

impl OccurrenceRange {
    pub fn new(first: SaIndex, last: SaIndex) -> Result<Self> {
        if first > last {
            return Err(Error::invalid_range(format!(
                "first index {} is past last index {}",
                first, last
            )));
        }
        Ok(Self { first, last })
    }

    /// Validate bounds coming from an external caller, where `-1` means "none"
    pub fn from_signed(first: i64, last: i64) -> Result<Self> {
        if first < 0 || last < 0 {
            return Err(Error::invalid_range(format!(
                "negative suffix array bounds [{}, {}]",
                first, last
            )));
        }
        Self::new(first as u64, last as u64)
    }

    /// Number of occurrences covered
    pub fn count(&self) -> u64 {
        self.last - self.first + 1
    }

    pub fn indices(&self) -> RangeInclusive<SaIndex> {
        self.first..=self.last
    }

    /// Keep at most `max` leading indices
    pub fn truncated(&self, max: usize) -> Self {
        let max = (max.max(1) as u64).min(self.count());
        Self {
            first: self.first,
            last: self.first + max - 1,
        }
    }

    pub fn contains(&self, index: SaIndex) -> bool {
        self.indices().contains(&index)
    }

    pub fn is_subset_of(&self, other: &OccurrenceRange) -> bool {
        other.first <= self.first && self.last <= other.last
    }

    /// Reject ranges reaching past the suffix array
    pub fn check_within(&self, entry_count: u64) -> Result<()> {
        if self.last >= entry_count {
            return Err(Error::invalid_range(format!(
                "last index {} beyond suffix array of {} entries",
                self.last, entry_count
            )));
        }
        Ok(())
    }
}

/// The 6-byte frame opening each document
pub struct DocumentTag;

impl DocumentTag {
    pub fn encode(doc_id: DocId) -> [u8; TAG_SIZE] {
        let mut tag = [0u8; TAG_SIZE];
        tag[..2].copy_from_slice(&TAG_MARKER);
        tag[2..].copy_from_slice(&doc_id.to_le_bytes());
        tag
    }

    /// Decode a tag, returning `None` if there is no marker or the ID is zero
    pub fn decode(bytes: &[u8]) -> Option<DocId> {
        if bytes.len() < TAG_SIZE || bytes[..2] != TAG_MARKER {
            return None;
        }
        let doc_id = u32::from_le_bytes(bytes[2..TAG_SIZE].try_into().ok()?);
        (doc_id != 0).then_some(doc_id)
    }
}
