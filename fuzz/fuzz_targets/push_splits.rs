#![no_main]

use bytes::Bytes;
use cssurl::{Collector, LineAssembler, UrlRewriteStream, map_urls};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<u8>, Vec<u8>)| {
    let (data, steps) = input;

    // Split the data using the step bytes as chunk lengths (0 allowed).
    let mut pieces = Vec::new();
    let mut start = 0;
    for step in steps {
        let end = (start + step as usize).min(data.len());
        pieces.push(Bytes::copy_from_slice(&data[start..end]));
        start = end;
    }
    pieces.push(Bytes::copy_from_slice(&data[start..]));

    // Verify: batches are line-aligned, contiguous and lossless
    let mut assembler = LineAssembler::default();
    let mut joined = Vec::new();
    let mut expected_offset = 0u64;
    for piece in &pieces {
        if let Some(batch) = assembler.push(piece.clone()) {
            assert!(batch.ends_with(b'\n'));
            assert_eq!(batch.offset, expected_offset);
            expected_offset += batch.len() as u64;
            joined.extend_from_slice(&batch.data);
        }
    }
    if let Some(tail) = assembler.finish() {
        assert!(!tail.data.contains(&b'\n'));
        assert_eq!(tail.offset, expected_offset);
        joined.extend_from_slice(&tail.data);
    }
    assert_eq!(joined, data);

    // Verify: identity rewriting reproduces every valid line, and every
    // invalid batch is reported exactly once
    let mut stream = UrlRewriteStream::new(map_urls(str::to_owned), Collector::default());
    for piece in pieces {
        stream.push(piece).unwrap();
    }
    stream.finish().unwrap();

    let failures = stream.failures();
    let sink = stream.into_sink();
    assert_eq!(sink.errors.len() as u64, failures);
    if std::str::from_utf8(&data).is_ok() {
        assert!(sink.errors.is_empty());
        assert_eq!(sink.concat().as_bytes(), &data[..]);
    }
});
