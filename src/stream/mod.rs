//! Rewrite dispatch and its channels.
//!
//! - [`UrlRewriteStream`] - Assembler + rewriter + sink, driven by `push()`/`finish()`
//! - [`Sink`] - Output and error channels, with [`Collector`] and [`WriteSink`]
//! - [`rewrite_str`] - One-shot rewriting of an in-memory string

mod engine;
mod pipe;
mod sink;

pub use engine::{StreamState, UrlRewriteStream};
pub use pipe::rewrite_str;
pub use sink::{Collector, Sink, WriteSink};
