//! audittree is a binary hash tree over an ordered list of data blocks, with
//! compact membership proofs (audit paths) and in-place leaf updates.
//!
//! # Overview
//! - [`MerkleTree`]: builds the tree, answers leaf queries, generates proofs
//!   and applies single or batch leaf updates
//! - [`verify_proof`]: pure verification of a [`ProofPath`] against a root
//! - [`TreeHasher`]: the digest function; SHA-256 by default, BLAKE2s-256
//!   available
//! - [`TreeConfig`]: rebuild strategy and post-update consistency checks
//! - [`ProofObserver`]: optional diagnostics sink, see [`LogObserver`]
//!
//! # Hashing
//! A leaf digest is `H(block)`. An internal digest is `H(left || right)`. When
//! a level has an odd number of nodes, the last one is paired with itself.
//!
//! # Example Usage
//! ```
//! use audittree::{verify_proof, MerkleTree};
//!
//! let mut tree = MerkleTree::new(&[b"a", b"b", b"c", b"d"]).unwrap();
//! let proof = tree.generate_proof(0).unwrap();
//! assert!(verify_proof(&proof, &tree.root_digest()));
//!
//! let new_root = tree.update_leaf(0, b"e").unwrap();
//! assert!(!verify_proof(&proof, &new_root));
//! assert!(verify_proof(&tree.generate_proof(0).unwrap(), &new_root));
//! ```
//!
//! # Note on Thread Safety
//! The tree has no internal locking. Updates need `&mut self`; to share a tree
//! between threads, wrap it in a lock with a single writer.

pub mod config;
pub mod error;
pub mod merkletree;
pub mod utils;

pub use config::{RebuildMode, TreeConfig};
pub use error::TreeError;
pub use merkletree::{
    check::check_tree, verify_proof, verify_proof_observed, verify_proof_with, LogObserver,
    MerkleTree, NoopObserver, ProofNode, ProofObserver, ProofPath,
};
pub use utils::hasher::{Blake2sHasher, Hash32, Sha256Hasher, TreeHasher};
