//! Document boundary resolution
//!
//! Maps corpus offsets back to the document that contains them by scanning
//! backwards for the nearest tag.

use super::scan::TagScanner;
use crate::error::{Error, Result};
use crate::index::{Corpus, DocId, OccurrenceRange, SizeIndex, SuffixArray, TextOffset};
use roaring::RoaringBitmap;
use tracing::debug;

/// ID of the document containing `offset`, from the corpus bytes alone
///
/// A body ending in a lone `0xFF` byte makes the following tag ambiguous;
/// [`find_documents`] resolves that case with the size index.
pub fn find_document_id(corpus: &Corpus, offset: TextOffset, chunk_size: usize) -> Result<DocId> {
    document_id_at(corpus, &TagScanner::new(corpus, chunk_size), offset)
}

fn document_id_at(corpus: &Corpus, scanner: &TagScanner<'_>, offset: TextOffset) -> Result<DocId> {
    if offset >= corpus.len() {
        return Err(Error::invalid_range(format!(
            "offset {} beyond corpus of {} bytes",
            offset,
            corpus.len()
        )));
    }
    scanner
        .rfind_tag(offset, 0)
        .and_then(|tag| scanner.tag_id(tag))
        .ok_or_else(|| {
            Error::corrupt(format!(
                "no document tag at or before offset {}",
                offset
            ))
        })
}

/// Document ID of every occurrence in `range`, in suffix array order
///
/// Tags are confirmed against `size_index`, and each offset must fall inside
/// the document it resolves to.
pub fn find_documents(
    corpus: &Corpus,
    suffix_array: &SuffixArray,
    size_index: &SizeIndex,
    range: OccurrenceRange,
    chunk_size: usize,
) -> Result<Vec<DocId>> {
    range.check_within(suffix_array.entry_count())?;
    let scanner = TagScanner::new(corpus, chunk_size).with_size_index(size_index);

    let mut doc_ids = Vec::with_capacity(range.count() as usize);
    for index in range.indices() {
        let offset = suffix_array.entry(index)?;
        let doc_id = document_id_at(corpus, &scanner, offset)?;
        let doc_range = size_index.document_range(doc_id)?;
        if !doc_range.contains(&offset) {
            return Err(Error::corrupt(format!(
                "offset {} resolves to document {} spanning {}..{}",
                offset, doc_id, doc_range.start, doc_range.end
            )));
        }
        doc_ids.push(doc_id);
    }

    debug!(occurrences = doc_ids.len(), "resolved documents");
    Ok(doc_ids)
}

/// Distinct documents containing an occurrence in `range`
pub fn document_set(
    corpus: &Corpus,
    suffix_array: &SuffixArray,
    size_index: &SizeIndex,
    range: OccurrenceRange,
    chunk_size: usize,
) -> Result<RoaringBitmap> {
    let doc_ids = find_documents(corpus, suffix_array, size_index, range, chunk_size)?;
    Ok(doc_ids.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::search::range::{TruncationPolicy, count_occurrences};
    use crate::testkit::FixtureCorpus;

    #[test]
    fn test_cat_dog_documents() {
        let fixture = FixtureCorpus::new(&["the cat sat", "the dog sat"]);
        let corpus = fixture.corpus();
        let sa = fixture.suffix_array();
        let range = count_occurrences(&corpus, &sa, b"sat", TruncationPolicy::Unequal)
            .unwrap()
            .unwrap();

        let mut ids = find_documents(&corpus, &sa, &fixture.size_index(), range, 8192).unwrap();
        ids.sort();
        assert_eq!(ids, vec![1, 2]);

        let set = document_set(&corpus, &sa, &fixture.size_index(), range, 8192).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_repeated_matches_in_one_document() {
        let fixture = FixtureCorpus::new(&["ab ab ab", "cd"]);
        let corpus = fixture.corpus();
        let sa = fixture.suffix_array();
        let range = count_occurrences(&corpus, &sa, b"ab", TruncationPolicy::Unequal)
            .unwrap()
            .unwrap();
        assert_eq!(find_documents(&corpus, &sa, &fixture.size_index(), range, 16).unwrap(), vec![1, 1, 1]);
        assert_eq!(document_set(&corpus, &sa, &fixture.size_index(), range, 16).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_tag_is_corrupt() {
        let corpus = Corpus::from_bytes(b"untagged text".to_vec());
        let err = find_document_id(&corpus, 5, 8192).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptCorpus);
    }

    #[test]
    fn test_offset_past_end_is_invalid() {
        let fixture = FixtureCorpus::new(&["abc"]);
        let err = find_document_id(&fixture.corpus(), 9, 8192).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
    }

    #[test]
    fn test_tag_missing_from_size_index_is_corrupt() {
        let fixture = FixtureCorpus::new(&["abc", "abd"]);
        let corpus = fixture.corpus();
        let sa = fixture.suffix_array();
        let range = count_occurrences(&corpus, &sa, b"ab", TruncationPolicy::Unequal)
            .unwrap()
            .unwrap();
        // The size index only knows document 1.
        let truncated = SizeIndex::from_offsets(&fixture.offsets[..2]).unwrap();
        let err = find_documents(&corpus, &sa, &truncated, range, 8192).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptCorpus);
    }

    #[test]
    fn test_range_past_suffix_array_is_invalid() {
        let fixture = FixtureCorpus::new(&["abc"]);
        let range = OccurrenceRange::new(0, 100).unwrap();
        let err = find_documents(&fixture.corpus(), &fixture.suffix_array(), &fixture.size_index(), range, 8192)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
    }

    #[test]
    fn test_body_ending_in_ff_keeps_next_document_id() {
        let docs: &[&[u8]] = &[b"ab\xFF", b"cd"];
        let fixture = FixtureCorpus::from_documents(docs);
        let corpus = fixture.corpus();
        let sa = fixture.suffix_array();
        let size_index = fixture.size_index();

        let range = count_occurrences(&corpus, &sa, b"cd", TruncationPolicy::Unequal)
            .unwrap()
            .unwrap();
        assert_eq!(find_documents(&corpus, &sa, &size_index, range, 8192).unwrap(), vec![2]);

        // Every suffix, tags included, lands in its own document.
        let all = count_occurrences(&corpus, &sa, b"", TruncationPolicy::Unequal)
            .unwrap()
            .unwrap();
        let ids = find_documents(&corpus, &sa, &size_index, all, 16).unwrap();
        for (index, doc_id) in all.indices().zip(ids) {
            let offset = fixture.entries[index as usize];
            let expected = if offset < fixture.offsets[1] { 1 } else { 2 };
            assert_eq!(doc_id, expected, "offset {}", offset);
        }
    }
}
