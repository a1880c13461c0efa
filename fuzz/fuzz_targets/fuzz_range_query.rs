#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quarry::index::{Corpus, EntryWidth, SuffixArray};
use quarry::search::{TruncationPolicy, count_occurrences};

#[derive(Debug, Arbitrary)]
struct Input {
    text: Vec<u8>,
    query: Vec<u8>,
}

fuzz_target!(|input: Input| {
    // Keep the naive suffix sort cheap
    if input.text.len() > 512 || input.query.len() > 16 {
        return;
    }
    let text = input.text;

    let mut entries: Vec<u64> = (0..text.len() as u64).collect();
    entries.sort_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));
    let width = EntryWidth::for_entry_count(entries.len() as u64);
    let suffix_array = SuffixArray::from_entries(&entries, width).unwrap();

    let expected = if input.query.is_empty() {
        text.len() as u64
    } else {
        text.windows(input.query.len()).filter(|w| *w == &input.query[..]).count() as u64
    };

    let corpus = Corpus::from_bytes(text);
    let range = count_occurrences(&corpus, &suffix_array, &input.query, TruncationPolicy::Unequal).unwrap();
    assert_eq!(range.map_or(0, |r| r.count()), expected);
});
