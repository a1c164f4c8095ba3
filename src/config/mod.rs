//! Configuration for rewriting behavior.
//!
//! - [`RewriteConfig`] - Line boundary and read buffer sizing
//!
//! # Example
//!
//! ```
//! use cssurl::RewriteConfig;
//!
//! let config = RewriteConfig::default()
//!     .with_boundary(b'\n')
//!     .with_read_buffer_size(16 * 1024);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::StreamError;

/// Default line boundary byte.
pub const DEFAULT_BOUNDARY: u8 = b'\n';

/// Default read size used by the reader adapters (8 KiB).
pub const DEFAULT_READ_BUFFER_SIZE: usize = 8 * 1024;

/// Largest accepted read size (16 MiB).
pub const MAX_READ_BUFFER_SIZE: usize = 16 * 1024 * 1024;

/// Configuration for a rewrite stream.
///
/// The boundary must be an ASCII byte so that it can never appear inside a
/// multi-byte UTF-8 sequence; batches are then always cut between complete
/// characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RewriteConfig {
    boundary: u8,
    read_buffer_size: usize,
}

impl RewriteConfig {
    /// Creates a new configuration.
    ///
    /// Returns error if the boundary is not ASCII or the read size is zero
    /// or larger than [`MAX_READ_BUFFER_SIZE`].
    pub fn new(boundary: u8, read_buffer_size: usize) -> Result<Self, StreamError> {
        if !boundary.is_ascii() {
            return Err(StreamError::InvalidConfig {
                message: "boundary must be an ascii byte",
            });
        }

        if read_buffer_size == 0 {
            return Err(StreamError::InvalidConfig {
                message: "read buffer size must be non-zero",
            });
        }

        if read_buffer_size > MAX_READ_BUFFER_SIZE {
            return Err(StreamError::InvalidConfig {
                message: "read buffer size cannot exceed 16 MiB",
            });
        }

        Ok(Self {
            boundary,
            read_buffer_size,
        })
    }

    /// Sets the line boundary byte.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`RewriteConfig::validate`] to check it.
    ///
    /// # Example
    ///
    /// ```
    /// use cssurl::RewriteConfig;
    ///
    /// let config = RewriteConfig::default().with_boundary(b'}');
    /// assert_eq!(config.boundary(), b'}');
    /// ```
    pub fn with_boundary(mut self, boundary: u8) -> Self {
        self.boundary = boundary;
        self
    }

    /// Sets how many bytes the reader adapters request per read.
    ///
    /// Note: This does not validate the configuration.
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size;
        self
    }

    /// Returns the line boundary byte.
    pub fn boundary(&self) -> u8 {
        self.boundary
    }

    /// Returns the read size used by the reader adapters.
    pub fn read_buffer_size(&self) -> usize {
        self.read_buffer_size
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use cssurl::RewriteConfig;
    ///
    /// let config = RewriteConfig::default().with_read_buffer_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), StreamError> {
        Self::new(self.boundary, self.read_buffer_size).map(|_| ())
    }
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            boundary: DEFAULT_BOUNDARY,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}
