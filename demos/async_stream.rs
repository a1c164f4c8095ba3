//! Async rewriting example.
//!
//! Reads a file with tokio and rewrites it through the runtime-agnostic
//! `futures-io` adapter.
//!
//! Run with:
//!     cargo run --example async_stream --features async-io -- <path>

use futures_util::StreamExt;
use tokio_util::compat::TokioAsyncReadCompatExt;

use cssurl::{RewriteConfig, map_urls, rewrite_async_with_config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: async_stream <path>")?;

    let file = tokio::fs::File::open(&path).await?;

    // Small reads to show incremental output
    let config = RewriteConfig::default().with_read_buffer_size(1024);
    let replacer = map_urls(|url| format!("{url}?v=2"));
    let mut stream = rewrite_async_with_config(file.compat(), replacer, config)?;

    let mut units = 0;
    let mut bytes = 0;
    while let Some(text) = stream.next().await {
        let text = text?;
        units += 1;
        bytes += text.len();
        print!("{text}");
    }

    for err in stream.take_errors() {
        eprintln!("warning: {err}");
    }
    eprintln!("\nTotal: {units} units, {bytes} bytes");

    Ok(())
}
