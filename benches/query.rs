//! Query benchmarks over a synthetic corpus
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use quarry::index::{Corpus, DEFAULT_CHUNK_SIZE, DocumentTag, EntryWidth, SizeIndex, SuffixArray};
use quarry::search::{self, ContextLimits, TruncationPolicy};

const WORDS: &[&str] = &[
    "suffix", "array", "corpus", "document", "query", "range", "the", "of", "a", "binary",
    "search", "tag", "offset", "window", "context", "retrieve",
];

struct Fixture {
    corpus: Corpus,
    suffix_array: SuffixArray,
    size_index: SizeIndex,
}

/// Tagged documents of pseudo-random words, indexed with a naive sort
fn create_benchmark_fixture(doc_count: u32) -> Fixture {
    let mut text = Vec::new();
    let mut offsets = vec![0u64];
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    for doc_id in 1..=doc_count {
        text.extend_from_slice(&DocumentTag::encode(doc_id));
        let words = 8 + (state % 24) as usize;
        for _ in 0..words {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            text.extend_from_slice(WORDS[(state % WORDS.len() as u64) as usize].as_bytes());
            text.push(b' ');
        }
        offsets.push(text.len() as u64);
    }

    let mut entries: Vec<u64> = (0..text.len() as u64).collect();
    entries.sort_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));

    let width = EntryWidth::for_entry_count(entries.len() as u64);
    Fixture {
        suffix_array: SuffixArray::from_entries(&entries, width).expect("Failed to pack suffix array"),
        size_index: SizeIndex::from_offsets(&offsets).expect("Failed to build size index"),
        corpus: Corpus::from_bytes(text),
    }
}

fn bench_count_occurrences(c: &mut Criterion) {
    let fixture = create_benchmark_fixture(2000);
    let queries = ["the", "suffix array", "binary search tag", "zzz", "context window offset"];

    let mut group = c.benchmark_group("count_occurrences");
    for query in queries {
        group.bench_with_input(BenchmarkId::from_parameter(query), query, |b, query| {
            b.iter(|| {
                search::count_occurrences(
                    &fixture.corpus,
                    &fixture.suffix_array,
                    black_box(query.as_bytes()),
                    TruncationPolicy::Unequal,
                )
            })
        });
    }
    group.finish();
}

fn bench_find_documents(c: &mut Criterion) {
    let fixture = create_benchmark_fixture(2000);
    let range = search::count_occurrences(
        &fixture.corpus,
        &fixture.suffix_array,
        b"retrieve",
        TruncationPolicy::Unequal,
    )
    .expect("Failed to query")
    .expect("No occurrences");

    let mut group = c.benchmark_group("find_documents");
    for chunk_size in [64, 1024, DEFAULT_CHUNK_SIZE] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk_size), &chunk_size, |b, &chunk| {
            b.iter(|| {
                search::find_documents(
                    &fixture.corpus,
                    &fixture.suffix_array,
                    &fixture.size_index,
                    range,
                    black_box(chunk),
                )
            })
        });
    }
    group.finish();
}

fn bench_nearby_words(c: &mut Criterion) {
    let fixture = create_benchmark_fixture(2000);
    let range = search::count_occurrences(
        &fixture.corpus,
        &fixture.suffix_array,
        b"query",
        TruncationPolicy::Unequal,
    )
    .expect("Failed to query")
    .expect("No occurrences");

    c.bench_function("nearby_words", |b| {
        b.iter(|| {
            search::nearby_words(
                &fixture.corpus,
                &fixture.suffix_array,
                Some(&fixture.size_index),
                range,
                5,
                black_box(ContextLimits::default()),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_count_occurrences,
    bench_find_documents,
    bench_nearby_words,
);

criterion_main!(benches);
