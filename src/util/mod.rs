//! Internal utility functions and helpers.
//!
//! This module contains small helper functions used throughout the crate.
//! It is an implementation detail and not part of the public API.

/// Returns the index of the last occurrence of `boundary` in `data`.
///
/// Scans from the end: only the last boundary decides what can be released.
pub(crate) fn find_last_boundary(data: &[u8], boundary: u8) -> Option<usize> {
    data.iter().rposition(|&byte| byte == boundary)
}
