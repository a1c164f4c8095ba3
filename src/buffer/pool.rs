//! Thread-local pool of read buffers.

use std::cell::RefCell;

/// Buffers larger than this are dropped instead of returned to the pool.
pub const MAX_POOLED_SIZE: usize = 1024 * 1024; // 1 MiB

/// Maximum number of buffers to keep per thread.
pub const MAX_POOL_SIZE: usize = 4;

/// A reusable, zero-filled read buffer.
pub struct ReadBuffer {
    data: Vec<u8>,
}

impl ReadBuffer {
    /// Takes a buffer of `len` bytes from the thread-local pool or creates one.
    pub fn take(len: usize) -> Self {
        let mut data = THREAD_BUFFER_POOL
            .with(|pool| pool.borrow_mut().pop())
            .unwrap_or_default();
        data.clear();
        data.resize(len, 0);
        Self { data }
    }

    /// Returns the buffer as a mutable slice for `read()`.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Returns the first `n` bytes.
    pub fn filled(&self, n: usize) -> &[u8] {
        &self.data[..n]
    }
}

impl Drop for ReadBuffer {
    fn drop(&mut self) {
        if self.data.capacity() <= MAX_POOLED_SIZE {
            THREAD_BUFFER_POOL.with(|pool| {
                let mut pool = pool.borrow_mut();
                if pool.len() < MAX_POOL_SIZE {
                    pool.push(std::mem::take(&mut self.data));
                }
            });
        }
    }
}

thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_is_sized_and_zeroed() {
        let mut buf = ReadBuffer::take(64);
        assert_eq!(buf.as_mut_slice().len(), 64);
        assert!(buf.filled(64).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_reused_buffer_is_zeroed() {
        {
            let mut buf = ReadBuffer::take(16);
            buf.as_mut_slice().fill(0xAA);
        }

        let buf = ReadBuffer::take(32);
        assert!(buf.filled(32).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_buffer_reuse_keeps_capacity() {
        {
            let _buf = ReadBuffer::take(4096);
        }

        let buf = ReadBuffer::take(8);
        assert!(buf.data.capacity() >= 8);
        assert_eq!(buf.data.len(), 8);
    }
}
