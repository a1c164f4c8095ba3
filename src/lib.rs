//! cssurl
//!
//! Streaming URL rewriting for Rust.
//!
//! `cssurl` takes text arriving in chunks of any size, reassembles it into
//! complete lines, and replaces every embedded URL through a function you
//! supply. Output is emitted incrementally, one unit per batch of complete
//! lines. It is designed as a small, composable stage for:
//!
//! - moving stylesheets behind a CDN
//! - fingerprinting or versioning asset paths
//! - inlining or relocating resources in build pipelines
//!
//! The crate intentionally:
//! - does NOT validate or normalize the URLs it hands back
//! - does NOT manage files or concurrency
//! - does NOT decode anything but UTF-8
//!
//! It only does one thing: **Read text → rewrite URLs → write text**
//!
//! # Channels
//!
//! Rewritten text and failures travel separately. `push()` returning `Ok` is
//! the acknowledgment that a chunk was fully processed; a batch that cannot
//! be rewritten is reported to [`Sink::error`] and its output is dropped,
//! while the stream keeps going.
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use std::io;
//! use cssurl::{map_urls, StreamError, UrlRewriteStream, WriteSink};
//!
//! fn main() -> Result<(), StreamError> {
//!     let file = File::open("style.css")?;
//!     let replacer = map_urls(|url| format!("https://cdn.example.com/{url}"));
//!     let mut stream = UrlRewriteStream::new(replacer, WriteSink::new(io::stdout().lock()));
//!
//!     stream.pipe(file)?;
//!     for err in stream.sink().errors() {
//!         eprintln!("warning: {err}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use cssurl::{map_urls, rewrite_async};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), cssurl::StreamError> {
//!     let mut stream = rewrite_async(reader, map_urls(str::to_owned));
//!
//!     while let Some(text) = stream.next().await {
//!         print!("{}", text?);
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
mod batch;
mod config;
mod error;
mod rewrite;
mod stream;

mod buffer; // internal (thread-local reuse)
mod util;

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface (intentionally tiny)
//

pub use assembler::LineAssembler;
pub use batch::Batch;
pub use config::RewriteConfig;
pub use error::{BatchError, BoxError, RewriteError, StreamError};
pub use rewrite::{CssUrlRewriter, MapUrls, Replacer, Rewrite, map_urls};
pub use stream::{Collector, Sink, StreamState, UrlRewriteStream, WriteSink, rewrite_str};

#[cfg(feature = "async-io")]
pub use async_stream::{AsyncUrlRewrite, rewrite_async, rewrite_async_with_config};
