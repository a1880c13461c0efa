//! On-disk corpus and index files
//!
//! Three files make up an indexed corpus:
//! - `<corpus>`: tagged documents, concatenated
//! - `<corpus>.table.bin`: packed suffix array, one entry per corpus byte
//! - `<corpus>.size`: cumulative document offsets

pub mod corpus;
pub mod mapped;
pub mod reader;
pub mod size_index;
pub mod stats;
pub mod suffix_array;
pub mod types;

pub use corpus::Corpus;
pub use reader::{CorpusIndex, CorpusPaths};
pub use size_index::SizeIndex;
pub use stats::CorpusStats;
pub use suffix_array::SuffixArray;
pub use types::*;
