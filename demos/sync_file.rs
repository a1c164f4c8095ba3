//! Rewrite a CSS file to stdout.
//!
//! Run with:
//!     cargo run --example sync_file -- <path> [prefix]

use std::env;
use std::fs::File;
use std::io;

use cssurl::{UrlRewriteStream, WriteSink, map_urls};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let path = args
        .next()
        .ok_or("usage: sync_file <path> [prefix]")?;
    let prefix = args.next().unwrap_or_else(|| "/static/".to_owned());

    let file = File::open(&path)?;
    let replacer = map_urls(|url| {
        if url.starts_with("data:") || url.contains("://") {
            url.to_owned()
        } else {
            format!("{prefix}{url}")
        }
    });

    let mut stream = UrlRewriteStream::new(replacer, WriteSink::new(io::stdout().lock()));
    let read = stream.pipe(file)?;

    let sink = stream.into_sink();
    for err in sink.errors() {
        eprintln!("warning: {err}");
    }
    eprintln!("{path}: read {read} bytes, wrote {} bytes", sink.written());

    Ok(())
}
