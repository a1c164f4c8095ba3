//! Error types for cssurl.
//!
//! - [`StreamError`] - returned from `push()`/`finish()` and the adapters;
//!   lifecycle misuse, invalid configuration, I/O
//! - [`BatchError`] - delivered on the sink's error channel when a single
//!   batch cannot be rewritten; never returned from `push()`
//! - [`RewriteError`] - what a rewriter reports for one batch

use std::str::Utf8Error;

use thiserror::Error;

/// Boxed error returned by replacers and custom rewriters.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that stop the stream or reject its construction.
#[derive(Debug, Error)]
pub enum StreamError {
    /// An I/O error occurred while reading input or writing output.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// Input was pushed, or `finish()` was called, after the stream finished.
    #[error("stream is closed")]
    Closed,
}

/// Errors raised by a [`Rewrite`](crate::Rewrite) implementation for one batch.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// The batch is not valid UTF-8.
    #[error("batch is not valid utf-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),

    /// The replacer failed for a URL.
    #[error("replacer failed for url {url:?}: {source}")]
    Replace {
        /// The URL handed to the replacer.
        url: String,
        /// What the replacer reported.
        source: BoxError,
    },

    /// A custom rewriter failed.
    #[error("rewriter failed: {0}")]
    Rewriter(BoxError),
}

/// A rewrite failure tied to the batch it happened in.
///
/// This is the value carried on the error channel. The batch's output is
/// dropped; the stream stays open.
#[derive(Debug, Error)]
#[error("rewrite failed for {len} bytes at offset {offset}: {source}")]
pub struct BatchError {
    /// Byte offset of the failed batch in the input.
    pub offset: u64,
    /// Length of the failed batch in bytes.
    pub len: usize,
    /// The underlying failure.
    #[source]
    pub source: RewriteError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: StreamError = io_err.into();
        assert!(matches!(err, StreamError::Io(_)));
    }

    #[test]
    fn test_display() {
        let err = StreamError::InvalidConfig {
            message: "boundary must be an ascii byte",
        };
        assert!(err.to_string().contains("invalid config"));
        assert_eq!(StreamError::Closed.to_string(), "stream is closed");
    }

    #[test]
    fn test_batch_error_source_chain() {
        let err = BatchError {
            offset: 12,
            len: 4,
            source: RewriteError::Replace {
                url: "a.png".into(),
                source: "nope".into(),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("offset 12"));
        assert!(msg.contains("a.png"));

        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("replacer failed"));
    }

    #[test]
    fn test_utf8_conversion() {
        let bad = vec![0xffu8, 0xfe];
        let utf8 = std::str::from_utf8(&bad).unwrap_err();
        let err: RewriteError = utf8.into();
        assert!(matches!(err, RewriteError::InvalidUtf8(_)));
    }
}
