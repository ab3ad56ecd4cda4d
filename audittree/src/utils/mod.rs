//! Utility functions for the tree: digest functions and short hex rendering
//! for diagnostics.

pub mod hasher;

use hasher::Hash32;

/// Renders the first four bytes of a digest as hex, for log lines.
pub fn short_hex(digest: &Hash32) -> String {
    hex::encode(&digest[..4])
}
