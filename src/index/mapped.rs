//! Read-only byte storage backing the corpus, suffix array and size index

use crate::error::{Error, Result};
use memmap2::Mmap;
use std::fs::File;
use std::ops::Deref;
use std::path::Path;

/// File contents, memory-mapped from disk or held in memory
///
/// Reads are plain slice accesses, so there is no shared seek cursor and a
/// single value can serve concurrent readers.
pub enum MappedBytes {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl MappedBytes {
    /// Memory-map a file read-only
    ///
    /// Zero-length files are not mapped.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io_at(path, e))?;
        let len = file.metadata().map_err(|e| Error::io_at(path, e))?.len();
        if len == 0 {
            return Ok(MappedBytes::Owned(Vec::new()));
        }
        // Safety: the backing files are produced before query time and never
        // mutated while a query session holds them.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| Error::io_at(path, e))?;
        Ok(MappedBytes::Mapped(mmap))
    }
}

impl Deref for MappedBytes {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        match self {
            MappedBytes::Mapped(mmap) => mmap,
            MappedBytes::Owned(bytes) => bytes,
        }
    }
}

impl From<Vec<u8>> for MappedBytes {
    fn from(bytes: Vec<u8>) -> Self {
        MappedBytes::Owned(bytes)
    }
}
