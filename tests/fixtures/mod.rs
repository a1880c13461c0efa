//! On-disk corpus fixtures shared by the integration tests

#![allow(dead_code)]

use quarry::index::{DocumentTag, EntryWidth};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A tagged corpus written to a temporary directory with its index files
pub struct DiskCorpus {
    pub dir: TempDir,
    pub path: PathBuf,
    pub text: Vec<u8>,
    pub offsets: Vec<u64>,
    pub entries: Vec<u64>,
}

impl DiskCorpus {
    pub fn new(docs: &[&str]) -> Self {
        let docs: Vec<&[u8]> = docs.iter().map(|d| d.as_bytes()).collect();
        Self::from_documents(&docs, None)
    }

    /// Write documents tagged 1..=N, packing entries at `width` bytes (or the
    /// narrowest width that fits)
    pub fn from_documents(docs: &[&[u8]], width: Option<usize>) -> Self {
        let mut text = Vec::new();
        let mut offsets = vec![0u64];
        for (i, doc) in docs.iter().enumerate() {
            text.extend_from_slice(&DocumentTag::encode(i as u32 + 1));
            text.extend_from_slice(doc);
            offsets.push(text.len() as u64);
        }

        let mut entries: Vec<u64> = (0..text.len() as u64).collect();
        entries.sort_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));

        let width = match width {
            Some(bytes) => EntryWidth::new(bytes).unwrap(),
            None => EntryWidth::for_entry_count(text.len() as u64),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.bin");
        fs::write(&path, &text).unwrap();

        let mut table = Vec::new();
        for &entry in &entries {
            table.extend_from_slice(&width.encode(entry));
        }
        fs::write(dir.path().join("corpus.bin.table.bin"), table).unwrap();

        let mut sizes = Vec::new();
        for offset in &offsets {
            sizes.extend_from_slice(&offset.to_le_bytes());
        }
        fs::write(dir.path().join("corpus.bin.size"), sizes).unwrap();

        Self {
            dir,
            path,
            text,
            offsets,
            entries,
        }
    }

    pub fn doc_count(&self) -> u32 {
        (self.offsets.len() - 1) as u32
    }

    /// Document containing `offset`
    pub fn doc_of(&self, offset: u64) -> u32 {
        self.offsets.partition_point(|&start| start <= offset) as u32
    }

    /// Body of document `doc_id`, tag excluded
    pub fn body(&self, doc_id: u32) -> &[u8] {
        let start = self.offsets[doc_id as usize - 1] as usize + 6;
        let end = self.offsets[doc_id as usize] as usize;
        &self.text[start..end]
    }
}

/// Overlapping occurrence count
pub fn count_naive(text: &[u8], query: &[u8]) -> u64 {
    if query.is_empty() {
        return text.len() as u64;
    }
    text.windows(query.len()).filter(|w| *w == query).count() as u64
}
