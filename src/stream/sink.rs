//! Output and error channels.
//!
//! A [`Sink`] receives the two kinds of events a rewrite stream produces:
//! rewritten output units through `emit()`, and per-batch failures through
//! `error()`. The two never mix.

use std::io::Write;

use crate::error::{BatchError, StreamError};

/// Receives rewritten output and rewrite failures.
pub trait Sink {
    /// Receives one rewritten output unit.
    ///
    /// An error here is fatal and is returned from the `push()` or `finish()`
    /// call that produced the output.
    fn emit(&mut self, text: String) -> Result<(), StreamError>;

    /// Receives one rewrite failure.
    fn error(&mut self, err: BatchError);
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn emit(&mut self, text: String) -> Result<(), StreamError> {
        (**self).emit(text)
    }

    fn error(&mut self, err: BatchError) {
        (**self).error(err)
    }
}

/// Sink that keeps everything in memory.
///
/// # Example
///
/// ```
/// use cssurl::{map_urls, Collector, UrlRewriteStream};
///
/// let mut stream = UrlRewriteStream::new(map_urls(str::to_owned), Collector::default());
/// stream.push(&b"url(a.png)\n"[..])?;
/// stream.finish()?;
///
/// let sink = stream.into_sink();
/// assert_eq!(sink.output, ["url(a.png)\n"]);
/// assert!(sink.errors.is_empty());
/// # Ok::<(), cssurl::StreamError>(())
/// ```
#[derive(Debug, Default)]
pub struct Collector {
    /// Output units in emission order.
    pub output: Vec<String>,
    /// Failures in the order they happened.
    pub errors: Vec<BatchError>,
}

impl Collector {
    /// Joins every output unit into one string.
    pub fn concat(&self) -> String {
        self.output.concat()
    }
}

impl Sink for Collector {
    fn emit(&mut self, text: String) -> Result<(), StreamError> {
        self.output.push(text);
        Ok(())
    }

    fn error(&mut self, err: BatchError) {
        self.errors.push(err);
    }
}

/// Sink that writes output to an [`std::io::Write`] and keeps failures.
#[derive(Debug)]
pub struct WriteSink<W> {
    writer: W,
    errors: Vec<BatchError>,
    written: u64,
}

impl<W: Write> WriteSink<W> {
    /// Creates a sink writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            errors: Vec::new(),
            written: 0,
        }
    }

    /// Returns the failures received so far.
    pub fn errors(&self) -> &[BatchError] {
        &self.errors
    }

    /// Removes and returns the failures received so far.
    pub fn take_errors(&mut self) -> Vec<BatchError> {
        std::mem::take(&mut self.errors)
    }

    /// Returns the number of bytes written.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Returns a reference to the writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consumes the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for WriteSink<W> {
    fn emit(&mut self, text: String) -> Result<(), StreamError> {
        self.writer.write_all(text.as_bytes())?;
        self.written += text.len() as u64;
        Ok(())
    }

    fn error(&mut self, err: BatchError) {
        self.errors.push(err);
    }
}
