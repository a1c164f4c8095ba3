//! Internal read buffer management.
//!
//! This module provides a thread-local buffer pool so that repeated reader
//! pipes do not reallocate their read buffer. It is an implementation detail
//! and not part of the public API.

mod pool;

pub(crate) use pool::ReadBuffer;
