//! Audit paths: generation lives on [`MerkleTree`](super::MerkleTree), this
//! module holds the path types and the verifier.
//!
//! A [`ProofPath`] lists, from the leaf level up to the root, the digest of
//! the sibling at each level and whether that sibling sits on the left.
//! Verification folds the path over the leaf digest:
//!
//! ```text
//! current = self_hash
//! for node in path:
//!     current = if node.peer_at_left { H(peer || current) } else { H(current || peer) }
//! valid = current == root
//! ```
//!
//! The fold is the exact mirror of the builder's `H(left || right)`, so a
//! path produced by a tree verifies only with the same [`TreeHasher`].

use super::observer::{NoopObserver, ProofObserver};
use crate::utils::hasher::{Hash32, Sha256Hasher, TreeHasher};

/// One level of an audit path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProofNode {
    /// Digest of the sibling node.
    pub peer_hash: Hash32,
    /// Whether the sibling is its parent's left child.
    pub peer_at_left: bool,
}

/// Membership proof for one leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofPath {
    /// Index of the proved leaf at generation time.
    pub leaf_index: usize,
    /// Snapshot of the leaf digest at generation time.
    pub self_hash: Hash32,
    /// Siblings from the leaf level to the level just below the root.
    pub path: Vec<ProofNode>,
}

impl ProofPath {
    /// Number of levels in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// True for the proof of a single-leaf tree, where the leaf is the root.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Recomputes the root digest implied by this path.
    pub fn compute_root<H: TreeHasher>(&self) -> Hash32 {
        self.compute_root_observed::<H, _>(NoopObserver)
    }

    fn compute_root_observed<H: TreeHasher, O: ProofObserver>(&self, mut observer: O) -> Hash32 {
        let mut current = self.self_hash;
        for (level, node) in self.path.iter().enumerate() {
            current = H::hash2x(&current, &node.peer_hash, node.peer_at_left);
            observer.on_fold_step(level, node, &current);
        }
        current
    }

    /// Checks this path against `root` using hasher `H`.
    pub fn verify<H: TreeHasher>(&self, root: &Hash32) -> bool {
        verify_proof_with::<H>(self, root)
    }
}

/// Verifies a SHA-256 proof against a candidate root digest.
pub fn verify_proof(proof: &ProofPath, root: &Hash32) -> bool {
    verify_proof_with::<Sha256Hasher>(proof, root)
}

/// Verifies a proof against a candidate root digest using hasher `H`.
pub fn verify_proof_with<H: TreeHasher>(proof: &ProofPath, root: &Hash32) -> bool {
    verify_proof_observed::<H, _>(proof, root, NoopObserver)
}

/// Like [`verify_proof_with`], reporting every fold step to `observer`.
pub fn verify_proof_observed<H: TreeHasher, O: ProofObserver>(
    proof: &ProofPath,
    root: &Hash32,
    mut observer: O,
) -> bool {
    let computed = proof.compute_root_observed::<H, _>(&mut observer);
    let valid = computed == *root;
    observer.on_verify_result(&computed, root, valid);
    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::hasher::{hash, hash2, Blake2sHasher};

    fn two_leaf_proof() -> (ProofPath, Hash32) {
        let a = hash(b"a");
        let b = hash(b"b");
        let root = hash2(&a, &b);
        let proof = ProofPath {
            leaf_index: 1,
            self_hash: b,
            path: vec![ProofNode {
                peer_hash: a,
                peer_at_left: true,
            }],
        };
        (proof, root)
    }

    #[test]
    fn test_fold_respects_side() {
        let (proof, root) = two_leaf_proof();
        assert!(verify_proof(&proof, &root));
        assert_eq!(root, proof.compute_root::<Sha256Hasher>());

        let mut flipped = proof.clone();
        flipped.path[0].peer_at_left = false;
        assert!(!verify_proof(&flipped, &root));
    }

    #[test]
    fn test_empty_path_is_leaf_as_root() {
        let leaf = hash(b"only");
        let proof = ProofPath {
            leaf_index: 0,
            self_hash: leaf,
            path: vec![],
        };
        assert!(proof.is_empty());
        assert!(verify_proof(&proof, &leaf));
        assert!(!verify_proof(&proof, &hash(b"other")));
    }

    #[test]
    fn test_wrong_hasher_fails() {
        let (proof, root) = two_leaf_proof();
        assert!(!proof.verify::<Blake2sHasher>(&root));
    }

    #[test]
    fn test_tampered_leaf_fails() {
        let (mut proof, root) = two_leaf_proof();
        proof.self_hash = hash(b"x");
        assert!(!verify_proof(&proof, &root));
    }

    #[test]
    fn test_observer_sees_every_step() {
        struct Steps(Vec<Hash32>, Option<bool>);
        impl ProofObserver for Steps {
            fn on_fold_step(&mut self, _level: usize, _node: &ProofNode, current: &Hash32) {
                self.0.push(*current);
            }
            fn on_verify_result(&mut self, _computed: &Hash32, _expected: &Hash32, valid: bool) {
                self.1 = Some(valid);
            }
        }

        let (proof, root) = two_leaf_proof();
        let mut steps = Steps(vec![], None);
        assert!(verify_proof_observed::<Sha256Hasher, _>(
            &proof, &root, &mut steps
        ));
        assert_eq!(vec![root], steps.0);
        assert_eq!(Some(true), steps.1);
    }
}
