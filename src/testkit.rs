//! In-memory corpus fixtures for unit tests

use crate::index::{Corpus, DocumentTag, EntryWidth, SizeIndex, SuffixArray};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A tagged corpus with its suffix array and size index
pub struct FixtureCorpus {
    pub text: Vec<u8>,
    pub offsets: Vec<u64>,
    pub entries: Vec<u64>,
    pub width: EntryWidth,
}

impl FixtureCorpus {
    pub fn new(docs: &[&str]) -> Self {
        let docs: Vec<&[u8]> = docs.iter().map(|d| d.as_bytes()).collect();
        Self::from_documents(&docs)
    }

    /// Tag documents with IDs 1..=N
    pub fn from_documents(docs: &[&[u8]]) -> Self {
        let ids: Vec<u32> = (1..=docs.len() as u32).collect();
        Self::with_ids(docs, &ids)
    }

    /// Tag documents with explicit IDs, for exercising marker bytes inside IDs
    pub fn with_ids(docs: &[&[u8]], ids: &[u32]) -> Self {
        let mut text = Vec::new();
        let mut offsets = vec![0u64];
        for (doc, &id) in docs.iter().zip(ids) {
            text.extend_from_slice(&DocumentTag::encode(id));
            text.extend_from_slice(doc);
            offsets.push(text.len() as u64);
        }
        Self::from_raw(text, offsets)
    }

    pub fn from_raw(text: Vec<u8>, offsets: Vec<u64>) -> Self {
        let entries = naive_suffix_array(&text);
        let width = EntryWidth::for_entry_count(text.len() as u64);
        Self {
            text,
            offsets,
            entries,
            width,
        }
    }

    pub fn with_width(mut self, bytes: usize) -> Self {
        self.width = EntryWidth::new(bytes).unwrap();
        self
    }

    pub fn corpus(&self) -> Corpus {
        Corpus::from_bytes(self.text.clone())
    }

    pub fn suffix_array(&self) -> SuffixArray {
        SuffixArray::from_entries(&self.entries, self.width).unwrap()
    }

    pub fn size_index(&self) -> SizeIndex {
        SizeIndex::from_offsets(&self.offsets).unwrap()
    }

    /// Write `<name>`, `<name>.table.bin` and `<name>.size` into `dir`
    pub fn write_to(&self, dir: &Path, name: &str) -> io::Result<PathBuf> {
        let corpus_path = dir.join(name);
        fs::write(&corpus_path, &self.text)?;

        let mut table = Vec::with_capacity(self.entries.len() * self.width.bytes());
        for &entry in &self.entries {
            table.extend_from_slice(&self.width.encode(entry));
        }
        fs::write(dir.join(format!("{name}.table.bin")), table)?;

        let mut sizes = Vec::with_capacity(self.offsets.len() * 8);
        for offset in &self.offsets {
            sizes.extend_from_slice(&offset.to_le_bytes());
        }
        fs::write(dir.join(format!("{name}.size")), sizes)?;

        Ok(corpus_path)
    }
}

pub fn naive_suffix_array(text: &[u8]) -> Vec<u64> {
    let mut entries: Vec<u64> = (0..text.len() as u64).collect();
    entries.sort_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));
    entries
}

/// Overlapping occurrence count
pub fn count_naive(text: &[u8], query: &[u8]) -> u64 {
    if query.is_empty() {
        return text.len() as u64;
    }
    text.windows(query.len()).filter(|w| *w == query).count() as u64
}
