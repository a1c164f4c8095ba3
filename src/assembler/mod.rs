//! Chunk-to-line reassembly.
//!
//! - [`LineAssembler`] - Stateful engine with `push()`/`finish()` API

mod engine;

pub use engine::LineAssembler;
