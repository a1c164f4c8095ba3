#![no_main]

use cssurl::{UrlRewriteStream, WriteSink, map_urls, rewrite_str};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: String| {
    let replacer = map_urls(|url| format!("/cdn/{url}"));

    // Verify: piping through a reader matches one-shot rewriting
    let (expected, errors) = rewrite_str(&text, replacer);
    assert!(errors.is_empty());

    let mut stream = UrlRewriteStream::new(replacer, WriteSink::new(Vec::new()));
    let read = stream.pipe(std::io::Cursor::new(text.as_bytes())).unwrap();
    assert_eq!(read, text.len() as u64);

    let sink = stream.into_sink();
    assert!(sink.errors().is_empty());
    assert_eq!(sink.into_inner(), expected.into_bytes());
});
