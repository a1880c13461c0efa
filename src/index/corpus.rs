//! The corpus: tagged documents concatenated into one byte blob

use super::mapped::MappedBytes;
use super::types::TextOffset;
use crate::error::Result;
use std::path::Path;

/// Read-only view of the corpus file
pub struct Corpus {
    bytes: MappedBytes,
}

impl Corpus {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            bytes: MappedBytes::open(path)?,
        })
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whole corpus
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Up to `len` bytes starting at `offset`, truncated at the corpus end
    #[inline]
    pub fn read_at(&self, offset: TextOffset, len: usize) -> &[u8] {
        let start = (offset.min(self.len())) as usize;
        let end = start.saturating_add(len).min(self.bytes.len());
        &self.bytes[start..end]
    }

    /// Bytes in `[start, end)`, clipped to the corpus
    #[inline]
    pub fn slice(&self, start: TextOffset, end: TextOffset) -> &[u8] {
        let end = end.min(self.len());
        let start = start.min(end);
        &self.bytes[start as usize..end as usize]
    }
}
