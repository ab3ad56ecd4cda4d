//! Consistency checking for a built tree.
//!
//! The checks ensure that:
//! 1. The arena holds one root and `leaf_count` leaves, laid out level by level
//! 2. Parent and child links agree in both directions
//! 3. Self-pairing only happens at the tail of an odd level
//! 4. Every internal digest equals `H(left || right)`
//!
//! Unlike a debug assertion, a failed check is reported as
//! [`TreeError::InternalInvariantViolation`] so the caller decides whether to
//! abort.

use super::node::NodeId;
use super::tree::MerkleTree;
use crate::error::TreeError;
use crate::utils::{hasher::TreeHasher, short_hex};

fn violation(msg: String) -> TreeError {
    TreeError::InternalInvariantViolation(msg)
}

/// Verifies the structure and every internal digest of `tree`.
pub fn check_tree<H: TreeHasher>(tree: &MerkleTree<H>) -> Result<(), TreeError> {
    check_shape(tree)?;
    check_hash_consistency(tree)
}

/// Verifies the level layout and the parent/child links.
pub fn check_shape<H: TreeHasher>(tree: &MerkleTree<H>) -> Result<(), TreeError> {
    let nodes = tree.nodes();
    let levels = tree.levels();
    let leaves = levels
        .first()
        .ok_or_else(|| violation("tree has no levels".to_owned()))?;
    if leaves.start != 0 || leaves.len() != tree.leaf_count() {
        return Err(violation(format!(
            "leaf level {:?} does not match leaf count {}",
            leaves,
            tree.leaf_count()
        )));
    }
    match levels.last() {
        Some(top) if top.len() == 1 && top.end == nodes.len() => {}
        top => {
            return Err(violation(format!(
                "top level {:?} is not a single root at the end of {} nodes",
                top,
                nodes.len()
            )))
        }
    }

    for i in leaves.clone() {
        if !nodes[i].is_leaf() {
            return Err(violation(format!("leaf {} has children", i)));
        }
    }

    for pair in levels.windows(2) {
        let (below, level) = (&pair[0], &pair[1]);
        if level.start != below.end || level.len() != below.len().div_ceil(2) {
            return Err(violation(format!(
                "level {:?} cannot sit above level {:?}",
                level, below
            )));
        }
        for (k, i) in level.clone().enumerate() {
            let id = NodeId::new(i);
            let node = &nodes[i];
            let expected_left = below.start + 2 * k;
            let expected_right = if expected_left + 1 < below.end {
                expected_left + 1
            } else {
                expected_left
            };
            let (left, right) = match (node.left(), node.right()) {
                (Some(l), Some(r)) => (l, r),
                _ => return Err(violation(format!("internal node {} lacks a child", i))),
            };
            if left.index() != expected_left || right.index() != expected_right {
                return Err(violation(format!(
                    "node {} has children ({}, {}), expected ({}, {})",
                    i,
                    left.index(),
                    right.index(),
                    expected_left,
                    expected_right
                )));
            }
            for child in [left, right] {
                if nodes[child.index()].parent() != Some(id) {
                    return Err(violation(format!(
                        "child {} does not point back to parent {}",
                        child.index(),
                        i
                    )));
                }
            }
        }
    }

    let root = tree.root_id();
    for (i, node) in nodes.iter().enumerate() {
        if node.is_root() != (i == root.index()) {
            return Err(violation(format!(
                "node {} has parent {:?} but the root is {}",
                i,
                node.parent(),
                root.index()
            )));
        }
    }
    Ok(())
}

/// Verifies that each internal node hashes its children.
pub fn check_hash_consistency<H: TreeHasher>(tree: &MerkleTree<H>) -> Result<(), TreeError> {
    let nodes = tree.nodes();
    for (i, node) in nodes.iter().enumerate().skip(tree.leaf_count()) {
        let (left, right) = match (node.left(), node.right()) {
            (Some(l), Some(r)) => (l, r),
            _ => return Err(violation(format!("internal node {} lacks a child", i))),
        };
        let sum = H::hash2(nodes[left.index()].digest(), nodes[right.index()].digest());
        if &sum != node.digest() {
            return Err(violation(format!(
                "digest mismatch at node {}: stored {} computed {}",
                i,
                short_hex(node.digest()),
                short_hex(&sum)
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TreeConfig;

    #[test]
    fn test_check_valid_trees() {
        for n in 1..=9 {
            let blocks: Vec<Vec<u8>> = (0..n).map(|i| vec![i as u8, 0xee]).collect();
            let tree = MerkleTree::new(&blocks).unwrap();
            check_tree(&tree).unwrap();
        }
    }

    #[test]
    fn test_check_after_update_stays_valid() {
        let config = TreeConfig::default().with_check_after_update(true);
        let mut tree = MerkleTree::with_config(&[b"a", b"b", b"c", b"d", b"e"], config).unwrap();
        tree.update_leaf(4, b"f").unwrap();
        tree.update_leaves(&[0, 2], &[b"g", b"h"]).unwrap();
        check_tree(&tree).unwrap();
    }

    #[test]
    fn test_detect_stale_digest() {
        let mut tree = MerkleTree::new(&[b"a", b"b", b"c"]).unwrap();
        tree.nodes_mut()[1].digest = [9; 32];
        check_shape(&tree).unwrap();
        let err = check_hash_consistency(&tree).unwrap_err();
        assert!(matches!(err, TreeError::InternalInvariantViolation(_)));
        assert!(err.to_string().contains("digest mismatch at node 3"));
    }

    #[test]
    fn test_detect_broken_parent_link() {
        let mut tree = MerkleTree::new(&[b"a", b"b", b"c", b"d"]).unwrap();
        tree.nodes_mut()[3].parent = None;
        let err = check_tree(&tree).unwrap_err();
        assert_eq!(
            TreeError::InternalInvariantViolation(
                "child 3 does not point back to parent 5".to_owned()
            ),
            err
        );
    }

    #[test]
    fn test_detect_swapped_children() {
        let mut tree = MerkleTree::new(&[b"a", b"b"]).unwrap();
        let root = tree.root_id().index();
        let node = &mut tree.nodes_mut()[root];
        std::mem::swap(&mut node.left, &mut node.right);
        assert!(check_shape(&tree).is_err());
    }
}
