//! Arena node model.
//!
//! Nodes live in one contiguous `Vec` owned by the tree and refer to each
//! other by [`NodeId`]. Ownership flows strictly from the arena; `parent` is
//! only a traversal hint, so dropping the tree drops every node at once and no
//! reference cycle can form.
//!
//! Arena layout for N leaves:
//! - `0..N` are the leaves, in input order
//! - each following level is appended after the one below it
//! - the root is always the last node

use crate::utils::hasher::Hash32;

/// Position of a node in the tree's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// The arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One position in the tree.
///
/// A self-paired internal node (the last node of an odd level lifted to the
/// next level) has `left == right`, both pointing at the same child.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub(crate) digest: Hash32,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub(crate) fn leaf(digest: Hash32) -> Self {
        Self {
            digest,
            left: None,
            right: None,
            parent: None,
        }
    }

    pub(crate) fn internal(digest: Hash32, left: NodeId, right: NodeId) -> Self {
        Self {
            digest,
            left: Some(left),
            right: Some(right),
            parent: None,
        }
    }

    /// Digest stored at this node.
    pub fn digest(&self) -> &Hash32 {
        &self.digest
    }

    /// Left child; `None` for a leaf.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Right child; equals `left` for a self-paired node.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Parent node; `None` only for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// True if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// True if the node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// True if both child slots hold the same node.
    pub fn is_self_paired(&self) -> bool {
        matches!((self.left, self.right), (Some(l), Some(r)) if l == r)
    }

    /// Returns the other child of this node, given one of its children.
    ///
    /// For a self-paired node the sibling of the child is the child itself.
    /// Returns `None` if `child` is not a child of this node.
    pub fn sibling_of(&self, child: NodeId) -> Option<NodeId> {
        match (self.left, self.right) {
            (Some(l), Some(r)) if l == child => Some(r),
            (Some(l), Some(r)) if r == child => Some(l),
            _ => None,
        }
    }

    /// True if `child` occupies this node's left slot.
    pub fn has_left_child(&self, child: NodeId) -> bool {
        self.left == Some(child)
    }
}
