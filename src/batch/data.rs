//! The Batch type - a line-aligned slice of input.

use bytes::Bytes;
use std::fmt;

/// A run of complete lines released by the assembler.
///
/// Every batch ends with the boundary byte, except the one released by
/// `finish()`, which holds whatever trailed the last boundary (`last` is set).
///
/// # Example
///
/// ```
/// use cssurl::Batch;
/// use bytes::Bytes;
///
/// let batch = Batch {
///     data: Bytes::from_static(b"a{background:url(a.png)}\n"),
///     offset: 0,
///     last: false,
/// };
///
/// assert!(batch.ends_with(b'\n'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// The batch data.
    pub data: Bytes,

    /// The offset in the original stream.
    pub offset: u64,

    /// Whether this batch was released by `finish()`.
    pub last: bool,
}

impl Batch {
    /// Creates a boundary-terminated batch at the given offset.
    pub fn new(data: impl Into<Bytes>, offset: u64) -> Self {
        Self {
            data: data.into(),
            offset,
            last: false,
        }
    }

    /// Creates the final batch of a stream.
    pub fn trailing(data: impl Into<Bytes>, offset: u64) -> Self {
        Self {
            data: data.into(),
            offset,
            last: true,
        }
    }

    /// Returns the length of the batch data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the batch has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if the batch ends with `boundary`.
    pub fn ends_with(&self, boundary: u8) -> bool {
        self.data.last() == Some(&boundary)
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the batch as a range of input positions.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.offset..self.end()
    }

    /// Decodes the batch as UTF-8.
    pub fn as_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.data)
    }

    /// Consumes the batch and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Batch({} bytes @ {}", self.len(), self.offset)?;
        if self.last {
            write!(f, ", last")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let batch = Batch::new(&b"hello\n"[..], 3);
        assert_eq!(batch.len(), 6);
        assert!(!batch.is_empty());
        assert!(!batch.last);
        assert!(batch.ends_with(b'\n'));
    }

    #[test]
    fn test_trailing() {
        let batch = Batch::trailing(&b"tail"[..], 10);
        assert!(batch.last);
        assert!(!batch.ends_with(b'\n'));
    }

    #[test]
    fn test_boundary_only_batch_is_not_empty() {
        let batch = Batch::new(&b"\n"[..], 0);
        assert!(!batch.is_empty());
        assert_eq!(batch.as_str().unwrap(), "\n");
    }

    #[test]
    fn test_range() {
        let batch = Batch::new(&b"hello\n"[..], 100);
        assert_eq!(batch.end(), 106);
        assert_eq!(batch.range(), 100..106);
    }

    #[test]
    fn test_invalid_utf8() {
        let batch = Batch::new(vec![0xffu8, b'\n'], 0);
        assert!(batch.as_str().is_err());
    }

    #[test]
    fn test_display() {
        let s = format!("{}", Batch::trailing(&b"hello"[..], 100));
        assert!(s.contains("5 bytes"));
        assert!(s.contains("@ 100"));
        assert!(s.contains("last"));
    }
}
