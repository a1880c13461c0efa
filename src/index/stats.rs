use super::reader::{CorpusIndex, CorpusPaths};
use super::{Corpus, DocId, DocumentTag, SizeIndex, TAG_MARKER, TAG_SIZE};
use crate::error::{Error, Result};
use crate::utils::document_bar;
use memchr::memmem;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Summary of a verified corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub corpus_bytes: u64,
    pub doc_count: u32,
    /// Mean body length, tag excluded
    pub mean_length: f64,
    /// Population variance of body length
    pub length_variance: f64,
    pub longest_doc: Option<DocId>,
    pub longest_length: u64,
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    docs: u64,
    total: u64,
    total_sq: f64,
    longest: Option<(u64, DocId)>,
}

impl Tally {
    fn single(doc_id: DocId, len: u64) -> Self {
        Self {
            docs: 1,
            total: len,
            total_sq: (len as f64) * (len as f64),
            longest: Some((len, doc_id)),
        }
    }

    fn merge(self, other: Tally) -> Tally {
        let longest = match (self.longest, other.longest) {
            // Ties go to the lower ID.
            (Some(a), Some(b)) => Some(if b.0 > a.0 || (b.0 == a.0 && b.1 < a.1) { b } else { a }),
            (a, b) => a.or(b),
        };
        Tally {
            docs: self.docs + other.docs,
            total: self.total + other.total,
            total_sq: self.total_sq + other.total_sq,
            longest,
        }
    }
}

/// Check the framing of one document and return its body length
pub fn verify_document(corpus: &Corpus, size_index: &SizeIndex, doc_id: DocId) -> Result<u64> {
    let range = size_index.document_range(doc_id)?;
    if range.end > corpus.len() || range.end - range.start < TAG_SIZE as u64 {
        return Err(Error::corrupt(format!(
            "document {} has invalid range {}..{} in a corpus of {} bytes",
            doc_id,
            range.start,
            range.end,
            corpus.len()
        )));
    }

    let bytes = corpus.slice(range.start, range.end);
    if bytes[..TAG_SIZE] != DocumentTag::encode(doc_id) {
        return Err(Error::corrupt(format!(
            "document {} at offset {} does not start with its tag",
            doc_id, range.start
        )));
    }
    if let Some(pos) = memmem::find(&bytes[TAG_SIZE..], &TAG_MARKER) {
        return Err(Error::corrupt(format!(
            "document {} contains a tag marker at body offset {}",
            doc_id, pos
        )));
    }
    Ok((bytes.len() - TAG_SIZE) as u64)
}

/// Verify every document and summarise lengths
///
/// `on_progress` receives the number of documents checked since its last call.
pub fn collect_stats<P>(corpus: &Corpus, size_index: &SizeIndex, on_progress: P) -> Result<CorpusStats>
where
    P: Fn(u64) + Sync,
{
    let doc_count = size_index.doc_count();
    let tally = (1..=doc_count)
        .into_par_iter()
        .map(|doc_id| -> Result<Tally> {
            let len = verify_document(corpus, size_index, doc_id)?;
            on_progress(1);
            Ok(Tally::single(doc_id, len))
        })
        .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))?;

    let (mean_length, length_variance) = if tally.docs == 0 {
        (0.0, 0.0)
    } else {
        let n = tally.docs as f64;
        let mean = tally.total as f64 / n;
        (mean, (tally.total_sq / n - mean * mean).max(0.0))
    };

    Ok(CorpusStats {
        corpus_bytes: corpus.len(),
        doc_count,
        mean_length,
        length_variance,
        longest_doc: tally.longest.map(|(_, id)| id),
        longest_length: tally.longest.map_or(0, |(len, _)| len),
    })
}

/// Display corpus statistics
pub fn show_stats(corpus_path: &Path) -> anyhow::Result<()> {
    let paths = CorpusPaths::new(corpus_path);
    let index = CorpusIndex::open(corpus_path)?;

    let pb = document_bar(index.doc_count() as u64, "verifying documents");
    let stats = collect_stats(&index.corpus, &index.size_index, |n| pb.inc(n))?;
    pb.finish_and_clear();
    info!(docs = stats.doc_count, "corpus verified");

    println!("Corpus Statistics");
    println!("=================");
    println!();
    println!("Corpus:           {}", paths.corpus.display());
    println!("Corpus size:      {}", format_size(stats.corpus_bytes));
    println!("Suffix array:     {} entries x {} bytes", index.suffix_array.entry_count(), index.suffix_array.width().bytes());
    println!("Document count:   {}", stats.doc_count);
    println!("Mean length:      {:.1} bytes", stats.mean_length);
    println!("Length variance:  {:.1}", stats.length_variance);
    if let Some(doc_id) = stats.longest_doc {
        println!("Longest document: {} ({})", doc_id, format_size(stats.longest_length));
    }
    println!();
    println!("All documents have valid IDs");

    Ok(())
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
