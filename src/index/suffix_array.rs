//! Packed suffix array reader
//!
//! `<corpus>.table.bin` holds one little-endian entry per corpus byte, ranked
//! by the suffix starting at that offset. There is no header: the entry width
//! is whatever divides the file size evenly by the corpus length.

use super::mapped::MappedBytes;
use super::types::{EntryWidth, SaIndex, TextOffset};
use crate::error::{Error, Result};
use std::path::Path;
use tracing::debug;

pub struct SuffixArray {
    bytes: MappedBytes,
    width: EntryWidth,
    entry_count: u64,
}

impl SuffixArray {
    /// Open the table for a corpus of `corpus_len` bytes
    pub fn open(path: &Path, corpus_len: u64) -> Result<Self> {
        let bytes = MappedBytes::open(path)?;
        let sa = Self::from_bytes(bytes, corpus_len)?;
        debug!(
            path = %path.display(),
            entries = sa.entry_count,
            width = sa.width.bytes(),
            "opened suffix array"
        );
        Ok(sa)
    }

    pub fn from_bytes(bytes: impl Into<MappedBytes>, entry_count: u64) -> Result<Self> {
        let bytes = bytes.into();
        let width = if entry_count == 0 {
            if !bytes.is_empty() {
                return Err(Error::corrupt(format!(
                    "suffix array holds {} bytes for an empty corpus",
                    bytes.len()
                )));
            }
            EntryWidth::new(1)?
        } else {
            EntryWidth::infer(bytes.len() as u64, entry_count)?
        };
        Ok(Self {
            bytes,
            width,
            entry_count,
        })
    }

    /// Pack `entries` at `width` bytes each
    pub fn from_entries(entries: &[TextOffset], width: EntryWidth) -> Result<Self> {
        let mut bytes = Vec::with_capacity(entries.len() * width.bytes());
        for &entry in entries {
            bytes.extend_from_slice(&width.encode(entry));
        }
        Self::from_bytes(bytes, entries.len() as u64)
    }

    #[inline]
    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    #[inline]
    pub fn width(&self) -> EntryWidth {
        self.width
    }

    /// Corpus offset of the suffix ranked `index`
    pub fn entry(&self, index: SaIndex) -> Result<TextOffset> {
        if index >= self.entry_count {
            return Err(Error::invalid_range(format!(
                "suffix array index {} beyond {} entries",
                index, self.entry_count
            )));
        }
        let width = self.width.bytes();
        let start = index as usize * width;
        let offset = self.width.decode(&self.bytes[start..start + width]);
        if offset >= self.entry_count {
            return Err(Error::corrupt(format!(
                "suffix array entry {} points to offset {} past corpus end {}",
                index, offset, self.entry_count
            )));
        }
        Ok(offset)
    }
}
