//! Locating and opening the three files of an indexed corpus

use super::corpus::Corpus;
use super::size_index::SizeIndex;
use super::suffix_array::SuffixArray;
use crate::error::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix appended to the corpus path for the packed suffix array
pub const TABLE_SUFFIX: &str = ".table.bin";

/// Suffix appended to the corpus path for the size index
pub const SIZE_SUFFIX: &str = ".size";

/// Paths of a corpus and its sibling index files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusPaths {
    pub corpus: PathBuf,
    pub table: PathBuf,
    pub size: PathBuf,
}

impl CorpusPaths {
    pub fn new(corpus: impl AsRef<Path>) -> Self {
        let corpus = corpus.as_ref().to_path_buf();
        Self {
            table: with_suffix(&corpus, TABLE_SUFFIX),
            size: with_suffix(&corpus, SIZE_SUFFIX),
            corpus,
        }
    }

    pub fn open_corpus(&self) -> Result<Corpus> {
        Corpus::open(&self.corpus)
    }

    pub fn open_suffix_array(&self, corpus: &Corpus) -> Result<SuffixArray> {
        SuffixArray::open(&self.table, corpus.len())
    }

    pub fn open_size_index(&self) -> Result<SizeIndex> {
        SizeIndex::open(&self.size)
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// All three files of a corpus, opened read-only
///
/// Dropping the value releases the mappings.
pub struct CorpusIndex {
    pub corpus: Corpus,
    pub suffix_array: SuffixArray,
    pub size_index: SizeIndex,
}

impl CorpusIndex {
    pub fn open(corpus_path: impl AsRef<Path>) -> Result<Self> {
        let paths = CorpusPaths::new(corpus_path);
        let corpus = paths.open_corpus()?;
        let suffix_array = paths.open_suffix_array(&corpus)?;
        let size_index = paths.open_size_index()?;
        Ok(Self {
            corpus,
            suffix_array,
            size_index,
        })
    }

    pub fn doc_count(&self) -> u32 {
        self.size_index.doc_count()
    }
}
