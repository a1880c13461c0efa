//! Cumulative document offset table (`<corpus>.size`)
//!
//! The file holds `N+1` little-endian u64 offsets with `offset[0] == 0`.
//! Document `k` occupies `[offset[k-1], offset[k])` in the corpus.

use super::mapped::MappedBytes;
use super::types::{DocId, SIZE_ENTRY_BYTES, TextOffset};
use crate::error::{Error, Result};
use std::ops::Range;
use std::path::Path;
use tracing::debug;

pub struct SizeIndex {
    bytes: MappedBytes,
    doc_count: u32,
}

impl SizeIndex {
    pub fn open(path: &Path) -> Result<Self> {
        let index = Self::from_bytes(MappedBytes::open(path)?)?;
        debug!(path = %path.display(), docs = index.doc_count, "opened size index");
        Ok(index)
    }

    pub fn from_bytes(bytes: impl Into<MappedBytes>) -> Result<Self> {
        let bytes = bytes.into();
        let doc_count = Self::doc_count_for_size(bytes.len() as u64)?;
        Ok(Self { bytes, doc_count })
    }

    /// Build an index from cumulative offsets, `offsets[0]` being 0
    pub fn from_offsets(offsets: &[TextOffset]) -> Result<Self> {
        let mut bytes = Vec::with_capacity(offsets.len() * SIZE_ENTRY_BYTES);
        for offset in offsets {
            bytes.extend_from_slice(&offset.to_le_bytes());
        }
        Self::from_bytes(bytes)
    }

    /// Number of documents described by a size file of `file_size` bytes
    ///
    /// Equivalent to the historical `(file_size - 1) / 8` for every
    /// well-formed file, which holds one more offset than documents.
    pub fn doc_count_for_size(file_size: u64) -> Result<u32> {
        let entry = SIZE_ENTRY_BYTES as u64;
        if file_size == 0 || file_size % entry != 0 {
            return Err(Error::corrupt(format!(
                "size index of {} bytes is not a non-zero multiple of {}",
                file_size, entry
            )));
        }
        let docs = file_size / entry - 1;
        u32::try_from(docs)
            .map_err(|_| Error::corrupt(format!("size index describes {} documents", docs)))
    }

    #[inline]
    pub fn doc_count(&self) -> u32 {
        self.doc_count
    }

    fn offset(&self, slot: u64) -> TextOffset {
        let start = slot as usize * SIZE_ENTRY_BYTES;
        let mut buf = [0u8; SIZE_ENTRY_BYTES];
        buf.copy_from_slice(&self.bytes[start..start + SIZE_ENTRY_BYTES]);
        u64::from_le_bytes(buf)
    }

    /// Byte range of document `doc_id`, tag included
    pub fn document_range(&self, doc_id: DocId) -> Result<Range<TextOffset>> {
        if doc_id == 0 || doc_id > self.doc_count {
            return Err(Error::invalid_range(format!(
                "document {} outside 1..={}",
                doc_id, self.doc_count
            )));
        }
        let start = self.offset(doc_id as u64 - 1);
        let end = self.offset(doc_id as u64);
        if end < start {
            return Err(Error::corrupt(format!(
                "document {} has decreasing offsets {}..{}",
                doc_id, start, end
            )));
        }
        Ok(start..end)
    }
}
