//! Async streaming support for rewriting.
//!
//! This module provides asynchronous rewriting using the `futures-io::AsyncRead`
//! trait, making it runtime-agnostic and compatible with tokio, async-std,
//! smol, and other async runtimes.
//!
//! - [`rewrite_async`] - Creates an async stream of rewritten text from a reader
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{AsyncUrlRewrite, rewrite_async, rewrite_async_with_config};
