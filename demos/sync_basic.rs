//! Basic push-based rewriting example.
//!
//! Feeds a stylesheet to the stream in small, arbitrary pieces and shows
//! that URLs split across pieces are still rewritten whole.
//!
//! Run with:
//!     cargo run --example sync_basic

use bytes::Bytes;
use cssurl::{Collector, UrlRewriteStream, map_urls};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let css = "\
@import \"reset.css\";
body{background:url(img/bg.png) no-repeat}
.logo{background-image:url('img/logo.svg')}
@font-face{src:url(\"fonts/inter.woff2\")}";

    println!("Rewriting {} bytes of CSS...\n", css.len());

    let replacer = map_urls(|url| format!("https://cdn.example.com/{url}"));
    let mut stream = UrlRewriteStream::new(replacer, Collector::default());

    // Deliberately awkward piece size so URLs straddle pushes
    let data = Bytes::from(css);
    let piece = 7;
    let mut offset = 0;

    while offset < data.len() {
        let end = (offset + piece).min(data.len());
        stream.push(data.slice(offset..end))?;
        offset = end;
    }

    stream.finish()?;

    let sink = stream.into_sink();
    for (i, unit) in sink.output.iter().enumerate() {
        println!("Unit {}: {} bytes", i + 1, unit.len());
    }

    println!("\n{}", sink.concat());
    println!("\nTotal: {} units, {} errors", sink.output.len(), sink.errors.len());

    Ok(())
}
