//! Property tests over randomly generated corpora.

mod fixtures;

use fixtures::{DiskCorpus, count_naive};
use proptest::prelude::*;
use quarry::{Quarry, QueryConfig, api};
use std::io;

fn documents() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[abc ]{0,24}", 1..6)
}

/// Binary bodies: lone 0xFF bytes allowed, never two in a row
fn binary_documents() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..16), 1..6).prop_map(|docs| {
        docs.into_iter()
            .map(|body| {
                let mut prev = 0u8;
                body.into_iter()
                    .map(|b| {
                        let b = if prev == 0xFF && b == 0xFF { 0xFE } else { b };
                        prev = b;
                        b
                    })
                    .collect()
            })
            .collect()
    })
}

fn disk_corpus(docs: &[String]) -> DiskCorpus {
    let docs: Vec<&[u8]> = docs.iter().map(|d| d.as_bytes()).collect();
    DiskCorpus::from_documents(&docs, None)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn count_equals_overlapping_occurrences(docs in documents(), query in "[abc ]{1,4}") {
        let corpus = disk_corpus(&docs);
        let outcome = api::query(&corpus.path, query.as_bytes()).unwrap();
        prop_assert_eq!(outcome.count, count_naive(&corpus.text, query.as_bytes()));
    }

    #[test]
    fn extending_a_query_narrows_its_range(docs in documents(), query in "[abc]{1,3}", next in "[abc]") {
        let corpus = disk_corpus(&docs);
        let longer = format!("{}{}", query, next);
        let short = api::query(&corpus.path, query.as_bytes()).unwrap();
        let long = api::query(&corpus.path, longer.as_bytes()).unwrap();
        prop_assert!(long.count <= short.count);
        if let (Some(long), Some(short)) = (long.range, short.range) {
            prop_assert!(long.is_subset_of(&short));
        }
    }

    #[test]
    fn every_occurrence_maps_to_its_document(docs in documents(), query in "[abc]{1,2}") {
        let corpus = disk_corpus(&docs);
        let outcome = api::query(&corpus.path, query.as_bytes()).unwrap();
        if let Some(range) = outcome.range {
            let doc_ids = api::documents(&corpus.path, outcome.first_index(), outcome.last_index()).unwrap();
            prop_assert_eq!(doc_ids.len() as u64, outcome.count);
            for (index, doc_id) in range.indices().zip(doc_ids) {
                let offset = corpus.entries[index as usize];
                prop_assert_eq!(doc_id, corpus.doc_of(offset));
            }
        }
    }

    #[test]
    fn context_stays_inside_the_document(docs in documents(), query in "[abc]{1,2}", window in 1usize..12) {
        let corpus = disk_corpus(&docs);
        let engine = Quarry::new(QueryConfig {
            context_size: window,
            ..QueryConfig::default()
        });
        let outcome = engine.query(&corpus.path, query.as_bytes()).unwrap();
        if outcome.range.is_some() {
            let snippets = engine
                .context(&corpus.path, outcome.first_index(), outcome.last_index(), query.len())
                .unwrap();
            for snippet in snippets.iter() {
                let doc_id = corpus.doc_of(snippet.offset);
                let body_start = corpus.offsets[doc_id as usize - 1] + 6;
                let doc_end = corpus.offsets[doc_id as usize];
                let offset = snippet.offset;
                let match_end = offset + query.len() as u64;

                let before_start = body_start.max(offset.saturating_sub(window as u64));
                let after_end = doc_end.min(match_end + window as u64);
                prop_assert_eq!(&snippet.before[..], &corpus.text[before_start as usize..offset as usize]);
                prop_assert_eq!(&snippet.after[..], &corpus.text[match_end as usize..after_end as usize]);
            }
        }
    }

    #[test]
    fn retrieve_returns_document_bodies(docs in documents()) {
        let corpus = disk_corpus(&docs);
        let ids: Vec<u32> = (1..=corpus.doc_count()).rev().collect();
        let mut seen = Vec::new();
        api::retrieve(&corpus.path, &ids, &mut |doc_id: u32, text: &[u8]| -> io::Result<()> {
            seen.push((doc_id, text.to_vec()));
            Ok(())
        })
        .unwrap();
        prop_assert_eq!(seen.len(), ids.len());
        for (doc_id, text) in seen {
            prop_assert_eq!(&text[..], corpus.body(doc_id));
            prop_assert_eq!(&text[..], docs[doc_id as usize - 1].as_bytes());
        }
    }

    #[test]
    fn binary_bodies_resolve_every_offset(docs in binary_documents()) {
        let bodies: Vec<&[u8]> = docs.iter().map(|d| d.as_slice()).collect();
        let corpus = DiskCorpus::from_documents(&bodies, None);
        let outcome = api::query(&corpus.path, b"").unwrap();
        let doc_ids = api::documents(&corpus.path, outcome.first_index(), outcome.last_index()).unwrap();
        for (index, doc_id) in doc_ids.into_iter().enumerate() {
            prop_assert_eq!(doc_id, corpus.doc_of(corpus.entries[index]));
        }

        let engine = Quarry::new(QueryConfig { max_contexts: usize::MAX, ..QueryConfig::default() });
        let snippets = engine.context(&corpus.path, outcome.first_index(), outcome.last_index(), 1).unwrap();
        for snippet in snippets.iter() {
            let doc_id = corpus.doc_of(snippet.offset);
            let body_start = corpus.offsets[doc_id as usize - 1] + 6;
            let doc_end = corpus.offsets[doc_id as usize];
            if snippet.offset >= body_start {
                prop_assert_eq!(&snippet.before[..], &corpus.text[body_start as usize..snippet.offset as usize]);
                prop_assert_eq!(&snippet.after[..], &corpus.text[snippet.offset as usize + 1..doc_end as usize]);
            }
        }
    }
}
