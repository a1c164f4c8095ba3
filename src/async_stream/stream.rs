//! Async stream adapter for rewriting.
//!
//! This module drives a [`UrlRewriteStream`] from a `futures-io::AsyncRead`,
//! making it runtime-agnostic and compatible with tokio, async-std, smol,
//! and other async runtimes.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use cssurl::{map_urls, rewrite_async};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), cssurl::StreamError> {
//!     let mut stream = rewrite_async(reader, map_urls(|url| format!("/static/{url}")));
//!
//!     while let Some(text) = stream.next().await {
//!         print!("{}", text?);
//!     }
//!     for err in stream.take_errors() {
//!         eprintln!("warning: {err}");
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::VecDeque;
use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::buffer::ReadBuffer;
use crate::config::RewriteConfig;
use crate::error::{BatchError, StreamError};
use crate::rewrite::{CssUrlRewriter, Replacer, Rewrite};
use crate::stream::{Sink, UrlRewriteStream};

/// Sink buffering output until the consumer polls for it.
#[derive(Debug, Default)]
struct Queue {
    output: VecDeque<String>,
    errors: Vec<BatchError>,
}

impl Sink for Queue {
    fn emit(&mut self, text: String) -> Result<(), StreamError> {
        self.output.push_back(text);
        Ok(())
    }

    fn error(&mut self, err: BatchError) {
        self.errors.push(err);
    }
}

pin_project! {
    /// A stream of rewritten output read from an async reader.
    ///
    /// Yields one item per rewritten batch, in input order. Rewrite failures
    /// do not end the stream and are not yielded; they collect on the side
    /// and are read with [`AsyncUrlRewrite::take_errors`]. A read error is
    /// yielded once and ends the stream.
    ///
    /// A new read is only issued once every queued output has been yielded.
    pub struct AsyncUrlRewrite<R, P, W> {
        #[pin]
        reader: R,
        inner: UrlRewriteStream<P, Queue, W>,
        buffer: ReadBuffer,
        finished: bool,
    }
}

impl<R, P, W> AsyncUrlRewrite<R, P, W>
where
    P: Replacer,
    W: Rewrite + Default,
{
    fn from_stream(reader: R, inner: UrlRewriteStream<P, Queue, W>) -> Self {
        let buffer = ReadBuffer::take(inner.config().read_buffer_size());
        Self {
            reader,
            inner,
            buffer,
            finished: false,
        }
    }

    /// Switches the rewriter used for every batch.
    ///
    /// Only meaningful before the first poll.
    pub fn with_rewriter<W2: Rewrite + Default>(self) -> AsyncUrlRewrite<R, P, W2> {
        AsyncUrlRewrite {
            reader: self.reader,
            inner: self.inner.with_rewriter::<W2>(),
            buffer: self.buffer,
            finished: self.finished,
        }
    }
}

impl<R, P, W> AsyncUrlRewrite<R, P, W> {
    /// Returns the failures collected so far.
    pub fn errors(&self) -> &[BatchError] {
        &self.inner.sink().errors
    }

    /// Removes and returns the failures collected so far.
    pub fn take_errors(&mut self) -> Vec<BatchError> {
        std::mem::take(&mut self.inner.sink_mut().errors)
    }

    /// Returns true if any batch failed to rewrite.
    pub fn is_errored(&self) -> bool {
        self.inner.is_errored()
    }
}

impl<R, P, W> Stream for AsyncUrlRewrite<R, P, W>
where
    R: AsyncRead,
    P: Replacer,
    W: Rewrite + Default,
{
    type Item = Result<String, StreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(text) = this.inner.sink_mut().output.pop_front() {
                return Poll::Ready(Some(Ok(text)));
            }

            if *this.finished {
                return Poll::Ready(None);
            }

            let n = match this
                .reader
                .as_mut()
                .poll_read(cx, this.buffer.as_mut_slice())
            {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) if e.kind() == ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(StreamError::Io(e))));
                }
                Poll::Ready(Ok(n)) => n,
            };

            // End of stream - flush the trailing partial line, then drain.
            let result = if n == 0 {
                *this.finished = true;
                this.inner.finish()
            } else {
                this.inner
                    .push(Bytes::copy_from_slice(this.buffer.filled(n)))
            };

            if let Err(e) = result {
                *this.finished = true;
                return Poll::Ready(Some(Err(e)));
            }
        }
    }
}

/// Creates a rewrite stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O.
///
/// # Runtime Compatibility
///
/// For tokio users, you can use `tokio_util::compat` to convert
/// `tokio::io::AsyncRead` to `futures_io::AsyncRead`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use cssurl::{map_urls, rewrite_async};
///
/// let file = tokio::fs::File::open("style.css").await?;
/// let stream = rewrite_async(file.compat(), map_urls(str::to_owned));
/// ```
pub fn rewrite_async<R, P>(reader: R, replacer: P) -> AsyncUrlRewrite<R, P, CssUrlRewriter>
where
    R: AsyncRead,
    P: Replacer,
{
    AsyncUrlRewrite::from_stream(reader, UrlRewriteStream::new(replacer, Queue::default()))
}

/// Like [`rewrite_async`], with a custom configuration.
///
/// Fails before anything is built if the configuration is invalid.
pub fn rewrite_async_with_config<R, P>(
    reader: R,
    replacer: P,
    config: RewriteConfig,
) -> Result<AsyncUrlRewrite<R, P, CssUrlRewriter>, StreamError>
where
    R: AsyncRead,
    P: Replacer,
{
    let inner = UrlRewriteStream::with_config(replacer, Queue::default(), config)?;
    Ok(AsyncUrlRewrite::from_stream(reader, inner))
}
