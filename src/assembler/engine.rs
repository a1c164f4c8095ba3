//! Line assembler - turns arbitrarily-sized chunks into line-aligned batches.
//!
//! - [`LineAssembler`] - Stateful engine that buffers partial lines
//! - `push()` - Feed data in any size (1 byte, 8KB, 1MB, etc.)
//! - `finish()` - Flush remaining data when the stream ends
//!
//! # Example
//!
//! ```
//! use cssurl::LineAssembler;
//!
//! let mut assembler = LineAssembler::default();
//!
//! assert!(assembler.push(&b"url(one"[..]).is_none());
//! let batch = assembler.push(&b".png)\nurl(two"[..]).unwrap();
//! assert_eq!(&batch.data[..], b"url(one.png)\n");
//!
//! let tail = assembler.finish().unwrap();
//! assert_eq!(&tail.data[..], b"url(two");
//! ```

use bytes::{Bytes, BytesMut};

use crate::batch::Batch;
use crate::config::DEFAULT_BOUNDARY;
use crate::util::find_last_boundary;

/// Buffers partial lines and releases complete ones.
///
/// `LineAssembler` knows nothing about URLs. It only guarantees that a batch
/// never cuts a line in two, so a rewriter working on one batch sees every
/// line whole.
///
/// # Streaming API
///
/// - Call `push()` with data in any size
/// - Returns a batch holding everything up to and including the last boundary
///   seen so far, or `None` if no boundary has arrived yet
/// - Call `finish()` when the stream ends to release the trailing partial line
///
/// # Memory Considerations
///
/// Input without any boundary is retained in full until `finish()`. Callers
/// feeding very long boundary-free input will see the pending buffer grow
/// without limit.
#[derive(Debug)]
pub struct LineAssembler {
    pending: BytesMut,
    offset: u64,
    boundary: u8,
}

impl LineAssembler {
    /// Creates a new assembler splitting on `boundary`.
    ///
    /// # Example
    ///
    /// ```
    /// use cssurl::LineAssembler;
    ///
    /// let assembler = LineAssembler::new(b'\n');
    /// assert_eq!(assembler.pending_len(), 0);
    /// ```
    pub fn new(boundary: u8) -> Self {
        Self {
            pending: BytesMut::new(),
            offset: 0,
            boundary,
        }
    }

    /// Pushes data into the assembler and returns the ready batch, if any.
    ///
    /// # Processing Flow
    ///
    /// 1. Append the data to the pending buffer
    /// 2. Search the buffer for the last boundary, from the end
    /// 3. Release everything up to and including it as one batch
    /// 4. Keep the remainder as pending
    ///
    /// Interior boundaries stay inside the batch. A boundary arriving as the
    /// first byte of an empty buffer still releases a one-byte batch.
    ///
    /// # Example
    ///
    /// ```
    /// use cssurl::LineAssembler;
    ///
    /// let mut assembler = LineAssembler::default();
    /// let batch = assembler.push(&b"a\nb\nc"[..]).unwrap();
    ///
    /// assert_eq!(&batch.data[..], b"a\nb\n");
    /// assert_eq!(assembler.pending_len(), 1);
    /// ```
    pub fn push(&mut self, data: impl Into<Bytes>) -> Option<Batch> {
        let data = data.into();
        if data.is_empty() {
            return None;
        }

        // Nothing pending: the new data is the whole buffer, so search it
        // directly and hand out zero-copy slices.
        if self.pending.is_empty() {
            let i = match find_last_boundary(&data, self.boundary) {
                Some(i) => i,
                None => {
                    self.pending.extend_from_slice(&data);
                    return None;
                }
            };
            self.pending.extend_from_slice(&data[i + 1..]);
            return Some(self.release(data.slice(..=i)));
        }

        // Anything before the new data holds no boundary, so only the new
        // data needs searching.
        let start = self.pending.len();
        self.pending.extend_from_slice(&data);

        let i = start + find_last_boundary(&data, self.boundary)?;
        let ready = self.pending.split_to(i + 1).freeze();
        Some(self.release(ready))
    }

    /// Finalizes the stream and returns the trailing batch, if any.
    ///
    /// Returns `None` when nothing is pending, including when the previous
    /// `push()` ended exactly on a boundary.
    ///
    /// # Example
    ///
    /// ```
    /// use cssurl::LineAssembler;
    ///
    /// let mut assembler = LineAssembler::default();
    /// assert!(assembler.push(&b"url(x.png)"[..]).is_none());
    ///
    /// let tail = assembler.finish().unwrap();
    /// assert!(tail.last);
    /// assert!(assembler.finish().is_none());
    /// ```
    pub fn finish(&mut self) -> Option<Batch> {
        if self.pending.is_empty() {
            return None;
        }

        let data = self.pending.split().freeze();
        let batch = Batch::trailing(data, self.offset);
        self.offset += batch.len() as u64;
        Some(batch)
    }

    /// Resets the assembler for a new stream.
    ///
    /// Clears pending data and offset; keeps the boundary.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.offset = 0;
    }

    /// Returns the byte position of the next batch in the stream.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the number of bytes waiting for a boundary.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns the boundary byte.
    pub fn boundary(&self) -> u8 {
        self.boundary
    }

    fn release(&mut self, data: Bytes) -> Batch {
        let batch = Batch::new(data, self.offset);
        self.offset += batch.len() as u64;
        batch
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_BOUNDARY)
    }
}
