//! Merkle tree over an ordered list of blocks.
//!
//! - [`MerkleTree`]: construction, proofs, leaf updates and leaf access
//! - [`node`]: the arena node model
//! - [`proof`]: audit paths and the verifier
//! - [`observer`]: optional diagnostics sink for proofs and updates
//! - [`check`]: tree consistency validation utilities

pub mod check;
pub mod node;
pub mod observer;
pub mod proof;
pub mod tree;

pub use node::{Node, NodeId};
pub use observer::{LogObserver, NoopObserver, ProofObserver};
pub use proof::{verify_proof, verify_proof_observed, verify_proof_with, ProofNode, ProofPath};
pub use tree::MerkleTree;
