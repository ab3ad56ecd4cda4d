//! Configuration for [`MerkleTree`](crate::MerkleTree).
//!
//! The tree has two knobs:
//!
//! - `rebuild_mode`: what happens to the internal nodes after a leaf update
//!   - [`RebuildMode::Full`] (default) discards every internal node and builds
//!     the tree again from the leaf digests, O(N) per update call
//!   - [`RebuildMode::AncestorPath`] recomputes only the parents on the path
//!     from each changed leaf to the root, O(k log N) for k changed leaves
//! - `check_after_update`: run the consistency checker after every update
//!   (default: on in debug builds, off in release builds)
//!
//! Both modes produce identical digests; the arena shape depends only on the
//! leaf count, which never changes after construction.
//!
//! # Usage Examples
//! ```
//! use audittree::config::{RebuildMode, TreeConfig};
//!
//! let config = TreeConfig::default()
//!     .with_rebuild_mode(RebuildMode::AncestorPath)
//!     .with_check_after_update(true);
//! assert_eq!(config.rebuild_mode, RebuildMode::AncestorPath);
//! ```

use std::fmt;

/// How internal digests are refreshed after a leaf update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RebuildMode {
    /// Discard and recreate all internal nodes.
    #[default]
    Full,
    /// Recompute only the ancestors of the changed leaves.
    AncestorPath,
}

impl fmt::Display for RebuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebuildMode::Full => write!(f, "full"),
            RebuildMode::AncestorPath => write!(f, "ancestor-path"),
        }
    }
}

/// Configuration for a tree instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    pub rebuild_mode: RebuildMode,
    pub check_after_update: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            rebuild_mode: RebuildMode::Full,
            check_after_update: cfg!(debug_assertions),
        }
    }
}

impl TreeConfig {
    /// Configuration with both knobs set explicitly.
    pub fn new(rebuild_mode: RebuildMode, check_after_update: bool) -> Self {
        Self {
            rebuild_mode,
            check_after_update,
        }
    }

    pub fn with_rebuild_mode(mut self, rebuild_mode: RebuildMode) -> Self {
        self.rebuild_mode = rebuild_mode;
        self
    }

    pub fn with_check_after_update(mut self, check_after_update: bool) -> Self {
        self.check_after_update = check_after_update;
        self
    }
}
