#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quarry::index::{Corpus, DocumentTag, SizeIndex};
use quarry::search::{TagScanner, find_document_id};

#[derive(Debug, Arbitrary)]
struct Input {
    docs: Vec<Vec<u8>>,
    chunk_size: u16,
}

fuzz_target!(|input: Input| {
    // IDs below 255 never contain a 0xFF byte
    if input.docs.is_empty() || input.docs.len() > 200 {
        return;
    }

    let mut text = Vec::new();
    let mut offsets = vec![0u64];
    let mut expected = Vec::new();
    for (i, body) in input.docs.iter().enumerate() {
        let doc_id = i as u32 + 1;
        text.extend_from_slice(&DocumentTag::encode(doc_id));
        // Bodies never contain the tag marker, though lone 0xFF bytes are fine
        let mut prev = 0u8;
        for &b in body {
            let b = if prev == 0xFF && b == 0xFF { 0xFE } else { b };
            text.push(b);
            prev = b;
        }
        offsets.push(text.len() as u64);
        expected.resize(text.len(), doc_id);
    }

    let size_index = SizeIndex::from_offsets(&offsets).unwrap();
    let corpus = Corpus::from_bytes(text);
    let scanner = TagScanner::new(&corpus, input.chunk_size as usize).with_size_index(&size_index);
    for (offset, &doc_id) in expected.iter().enumerate() {
        let found = scanner
            .rfind_tag(offset as u64, 0)
            .and_then(|tag| scanner.tag_id(tag));
        assert_eq!(found, Some(doc_id), "offset {}", offset);
        // The format-only lookup never panics
        let _ = find_document_id(&corpus, offset as u64, input.chunk_size as usize);
    }
});
