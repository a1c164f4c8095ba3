//! Rewrite dispatch - the stream stage that ties assembler, rewriter and sink
//! together.
//!
//! # Example
//!
//! ```
//! use cssurl::{map_urls, Collector, UrlRewriteStream};
//!
//! let replacer = map_urls(|url| url.replace("a.png", "b.png"));
//! let mut stream = UrlRewriteStream::new(replacer, Collector::default());
//!
//! // Feed data in any size
//! stream.push(&b"a{background:url(a"[..])?;
//! stream.push(&b".png)}\nb{color:red}"[..])?;
//!
//! // When the input ends, flush the trailing partial line
//! stream.finish()?;
//!
//! let sink = stream.into_sink();
//! assert_eq!(sink.concat(), "a{background:url(b.png)}\nb{color:red}");
//! # Ok::<(), cssurl::StreamError>(())
//! ```

use std::marker::PhantomData;

use bytes::Bytes;
use tracing::{debug, trace, warn};

use crate::assembler::LineAssembler;
use crate::batch::Batch;
use crate::config::RewriteConfig;
use crate::error::{BatchError, RewriteError, StreamError};
use crate::rewrite::{CssUrlRewriter, Replacer, Rewrite};
use crate::stream::sink::Sink;

/// Lifecycle of a [`UrlRewriteStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Constructed, nothing pushed yet.
    Open,
    /// At least one chunk has been pushed.
    Accepting,
    /// `finish()` is flushing the trailing batch.
    Flushing,
    /// Finished; no further input is accepted.
    Closed,
}

/// A streaming URL rewriter.
///
/// `UrlRewriteStream` accepts text in chunks of any size via `push()`,
/// releases complete lines through a [`LineAssembler`], rewrites every
/// released batch with a fresh `W` and hands the result to the sink.
///
/// # Channels
///
/// - `push()` / `finish()` returning is the completion acknowledgment. It
///   only fails for lifecycle misuse or a failing sink.
/// - Rewrite failures go to [`Sink::error`]. The failed batch produces no
///   output, the stream stays open and later batches are processed normally.
///
/// # Ordering
///
/// Output units reach the sink in input order, one per released batch. A
/// batch is never split or merged with another.
///
/// # Example
///
/// ```
/// use cssurl::{BoxError, Collector, UrlRewriteStream};
///
/// let replacer = |url: &str| -> Result<String, BoxError> {
///     match url {
///         "missing.png" => Err("no such asset".into()),
///         other => Ok(format!("/static/{other}")),
///     }
/// };
///
/// let mut stream = UrlRewriteStream::new(replacer, Collector::default());
/// stream.push(&b"url(missing.png)\n"[..])?; // still Ok: failure goes to the sink
/// stream.push(&b"url(ok.png)\n"[..])?;
/// stream.finish()?;
///
/// assert!(stream.is_errored());
/// let sink = stream.into_sink();
/// assert_eq!(sink.output, ["url(/static/ok.png)\n"]);
/// assert_eq!(sink.errors.len(), 1);
/// # Ok::<(), cssurl::StreamError>(())
/// ```
#[derive(Debug)]
pub struct UrlRewriteStream<P, S, W = CssUrlRewriter> {
    assembler: LineAssembler,
    replacer: P,
    sink: S,
    config: RewriteConfig,
    state: StreamState,
    failures: u64,
    rewriter: PhantomData<fn() -> W>,
}

impl<P, S> UrlRewriteStream<P, S>
where
    P: Replacer,
    S: Sink,
{
    /// Creates a stream with the default configuration and CSS rewriter.
    pub fn new(replacer: P, sink: S) -> Self {
        Self::from_parts(replacer, sink, RewriteConfig::default())
    }

    /// Creates a stream with the given configuration.
    ///
    /// Fails before anything is built if the configuration is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use cssurl::{map_urls, Collector, RewriteConfig, UrlRewriteStream};
    ///
    /// let config = RewriteConfig::default().with_boundary(0xFF);
    /// let result = UrlRewriteStream::with_config(map_urls(str::to_owned), Collector::default(), config);
    /// assert!(result.is_err());
    /// ```
    pub fn with_config(replacer: P, sink: S, config: RewriteConfig) -> Result<Self, StreamError> {
        config.validate()?;
        Ok(Self::from_parts(replacer, sink, config))
    }
}

impl<P, S, W> UrlRewriteStream<P, S, W>
where
    P: Replacer,
    S: Sink,
    W: Rewrite + Default,
{
    fn from_parts(replacer: P, sink: S, config: RewriteConfig) -> Self {
        Self {
            assembler: LineAssembler::new(config.boundary()),
            replacer,
            sink,
            config,
            state: StreamState::Open,
            failures: 0,
            rewriter: PhantomData,
        }
    }

    /// Switches the rewriter used for every batch.
    ///
    /// # Example
    ///
    /// ```
    /// use cssurl::{map_urls, Collector, Replacer, Rewrite, RewriteError, UrlRewriteStream};
    ///
    /// /// Treats every whole line as one URL.
    /// #[derive(Default)]
    /// struct WholeLine;
    ///
    /// impl Rewrite for WholeLine {
    ///     fn rewrite(&mut self, text: &str, replacer: &dyn Replacer) -> Result<String, RewriteError> {
    ///         text.split_inclusive('\n')
    ///             .map(|line| -> Result<String, RewriteError> {
    ///                 let url = line.trim_end_matches('\n');
    ///                 let mapped = replacer.replace(url).map_err(|source| RewriteError::Replace {
    ///                     url: url.to_owned(),
    ///                     source,
    ///                 })?;
    ///                 Ok(format!("{mapped}{}", &line[url.len()..]))
    ///             })
    ///             .collect()
    ///     }
    /// }
    ///
    /// let replacer = map_urls(|url| format!("https://cdn/{url}"));
    /// let mut stream = UrlRewriteStream::new(replacer, Collector::default()).with_rewriter::<WholeLine>();
    /// stream.push(&b"a.png\nb.png\n"[..])?;
    /// stream.finish()?;
    /// assert_eq!(stream.into_sink().concat(), "https://cdn/a.png\nhttps://cdn/b.png\n");
    /// # Ok::<(), cssurl::StreamError>(())
    /// ```
    pub fn with_rewriter<R: Rewrite + Default>(self) -> UrlRewriteStream<P, S, R> {
        UrlRewriteStream {
            assembler: self.assembler,
            replacer: self.replacer,
            sink: self.sink,
            config: self.config,
            state: self.state,
            failures: self.failures,
            rewriter: PhantomData,
        }
    }

    /// Pushes a chunk of input.
    ///
    /// Returns once the chunk is buffered and, if it completed one or more
    /// lines, those lines are rewritten and handed to the sink. The caller
    /// should not push the next chunk before this returns.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Closed`] if `finish()` was already called, or an
    ///   earlier `emit()` failed
    /// - whatever the sink's `emit()` returns; the stream is closed after
    ///
    /// Rewrite failures are not errors here; see [`Sink::error`].
    pub fn push(&mut self, chunk: impl Into<Bytes>) -> Result<(), StreamError> {
        if matches!(self.state, StreamState::Flushing | StreamState::Closed) {
            return Err(StreamError::Closed);
        }
        self.state = StreamState::Accepting;

        match self.assembler.push(chunk) {
            Some(batch) => self.dispatch(batch),
            None => Ok(()),
        }
    }

    /// Signals the end of input.
    ///
    /// Rewrites and emits the trailing partial line, if any, then closes the
    /// stream. Emits nothing when the pending buffer is empty.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Closed`] if called more than once
    /// - whatever the sink's `emit()` returns
    pub fn finish(&mut self) -> Result<(), StreamError> {
        if matches!(self.state, StreamState::Flushing | StreamState::Closed) {
            return Err(StreamError::Closed);
        }
        self.state = StreamState::Flushing;

        let flushed = self.assembler.pending_len();
        let result = match self.assembler.finish() {
            Some(batch) => self.dispatch(batch),
            None => Ok(()),
        };

        self.state = StreamState::Closed;
        debug!(
            flushed,
            total = self.assembler.offset(),
            failures = self.failures,
            "rewrite stream finished"
        );
        result
    }

    /// Rewrites one batch and routes the outcome to the sink.
    fn dispatch(&mut self, batch: Batch) -> Result<(), StreamError> {
        let mut rewriter = W::default();
        let result = batch
            .as_str()
            .map_err(RewriteError::from)
            .and_then(|text| rewriter.rewrite(text, &self.replacer));

        match result {
            Ok(text) => {
                trace!(
                    offset = batch.offset,
                    len = batch.len(),
                    last = batch.last,
                    "batch rewritten"
                );
                let emitted = self.sink.emit(text);
                if emitted.is_err() {
                    // Output for this batch is lost; refuse further input.
                    self.state = StreamState::Closed;
                }
                emitted
            }
            Err(source) => {
                warn!(
                    offset = batch.offset,
                    len = batch.len(),
                    error = %source,
                    "rewrite failed, batch dropped"
                );
                self.failures += 1;
                self.sink.error(BatchError {
                    offset: batch.offset,
                    len: batch.len(),
                    source,
                });
                Ok(())
            }
        }
    }
}

impl<P, S, W> UrlRewriteStream<P, S, W> {
    /// Returns the lifecycle state.
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Returns how many batches failed to rewrite.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Returns true if any batch failed to rewrite.
    pub fn is_errored(&self) -> bool {
        self.failures > 0
    }

    /// Returns the number of bytes waiting for a boundary.
    pub fn pending_len(&self) -> usize {
        self.assembler.pending_len()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Returns a reference to the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns a mutable reference to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the stream, returning the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
