//! Batch types.
//!
//! - [`Batch`] - Line-aligned slice of input released for rewriting

mod data;

pub use data::Batch;
