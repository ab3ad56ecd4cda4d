//! The tree: construction, proof generation, leaf updates and leaf access.
//!
//! Construction is bottom-up. Level 0 is the leaf digests; each following
//! level pairs adjacent nodes `(2k, 2k + 1)` into a parent with digest
//! `H(left || right)`. If a level has an odd count, its last node is paired
//! with itself: the parent's `left` and `right` both name that node and its
//! digest is `H(h || h)`. The last level holds exactly one node, the root.
//!
//! Updates replace leaf digests in place and then refresh the internal nodes
//! according to [`RebuildMode`]. Leaf order and leaf count never change.

use std::marker::PhantomData;
use std::ops::Range;

use log::debug;

use super::check::check_tree;
use super::node::{Node, NodeId};
use super::observer::{NoopObserver, ProofObserver};
use super::proof::{ProofNode, ProofPath};
use crate::config::{RebuildMode, TreeConfig};
use crate::error::TreeError;
use crate::utils::hasher::{Hash32, Sha256Hasher, TreeHasher};

/// A binary hash tree over an ordered list of blocks.
///
/// `MerkleTree` is a plain mutable structure. Proof generation borrows it
/// shared and updates borrow it exclusively, so within one owner a reader can
/// never observe a half-rebuilt tree. Sharing it across threads needs an
/// external lock (one writer, many readers).
#[derive(Clone, Debug)]
pub struct MerkleTree<H: TreeHasher = Sha256Hasher> {
    nodes: Vec<Node>,
    levels: Vec<Range<usize>>,
    leaf_count: usize,
    config: TreeConfig,
    _hasher: PhantomData<fn() -> H>,
}

impl MerkleTree<Sha256Hasher> {
    /// Builds a SHA-256 tree over `blocks` with the default configuration.
    ///
    /// Fails with [`TreeError::EmptyInput`] if `blocks` is empty.
    pub fn new<B: AsRef<[u8]>>(blocks: &[B]) -> Result<Self, TreeError> {
        Self::build(blocks, TreeConfig::default())
    }

    /// Builds a SHA-256 tree over `blocks` with the given configuration.
    pub fn with_config<B: AsRef<[u8]>>(
        blocks: &[B],
        config: TreeConfig,
    ) -> Result<Self, TreeError> {
        Self::build(blocks, config)
    }
}

impl<H: TreeHasher> MerkleTree<H> {
    /// Builds a tree over `blocks`, hashing each block with `H`.
    pub fn build<B: AsRef<[u8]>>(blocks: &[B], config: TreeConfig) -> Result<Self, TreeError> {
        let digests = blocks.iter().map(|b| H::hash(b)).collect();
        Self::from_leaf_digests(digests, config)
    }

    /// Builds a tree over already-hashed leaves.
    pub fn from_leaf_digests(
        leaf_digests: Vec<Hash32>,
        config: TreeConfig,
    ) -> Result<Self, TreeError> {
        if leaf_digests.is_empty() {
            return Err(TreeError::EmptyInput);
        }
        let leaf_count = leaf_digests.len();
        let mut nodes = Vec::with_capacity(2 * leaf_count);
        nodes.extend(leaf_digests.into_iter().map(Node::leaf));

        let mut tree = Self {
            nodes,
            levels: Vec::new(),
            leaf_count,
            config,
            _hasher: PhantomData,
        };
        tree.rebuild();
        debug!(
            "built {} tree: leaves={} nodes={} depth={}",
            H::NAME,
            tree.leaf_count,
            tree.nodes.len(),
            tree.depth()
        );
        Ok(tree)
    }

    /// Discards every internal node and builds them again from the leaves.
    fn rebuild(&mut self) {
        self.nodes.truncate(self.leaf_count);
        for leaf in self.nodes.iter_mut() {
            leaf.parent = None;
        }
        self.levels.clear();
        self.levels.push(0..self.leaf_count);

        let mut start = 0;
        let mut end = self.leaf_count;
        while end - start > 1 {
            for i in (start..end).step_by(2) {
                let left = NodeId::new(i);
                // the unpaired tail of an odd level is its own sibling
                let right = if i + 1 < end { NodeId::new(i + 1) } else { left };
                let digest = H::hash2(
                    &self.nodes[left.index()].digest,
                    &self.nodes[right.index()].digest,
                );
                let parent = NodeId::new(self.nodes.len());
                self.nodes[left.index()].parent = Some(parent);
                self.nodes[right.index()].parent = Some(parent);
                self.nodes.push(Node::internal(digest, left, right));
            }
            start = end;
            end = self.nodes.len();
            self.levels.push(start..end);
        }
    }

    /// Recomputes the digests on the paths from `leaves` to the root.
    ///
    /// Parents are refreshed one level at a time so that both children of a
    /// node are final before the node itself is hashed.
    fn recompute_ancestors(&mut self, leaves: &[usize]) -> Result<(), TreeError> {
        let mut dirty: Vec<NodeId> = leaves
            .iter()
            .filter_map(|&i| self.nodes[i].parent)
            .collect();
        while !dirty.is_empty() {
            dirty.sort_unstable();
            dirty.dedup();
            let mut next = Vec::with_capacity(dirty.len());
            for id in dirty {
                let node = &self.nodes[id.index()];
                let (left, right) = match (node.left, node.right) {
                    (Some(l), Some(r)) => (l, r),
                    _ => {
                        return Err(TreeError::InternalInvariantViolation(format!(
                            "parent node {} has a missing child",
                            id.index()
                        )))
                    }
                };
                let parent = node.parent;
                let digest = H::hash2(
                    &self.nodes[left.index()].digest,
                    &self.nodes[right.index()].digest,
                );
                self.nodes[id.index()].digest = digest;
                if let Some(p) = parent {
                    next.push(p);
                }
            }
            dirty = next;
        }
        Ok(())
    }

    /// Current root digest.
    pub fn root_digest(&self) -> Hash32 {
        self.nodes[self.root_id().index()].digest
    }

    /// Arena id of the root, always the last node.
    pub fn root_id(&self) -> NodeId {
        NodeId::new(self.nodes.len() - 1)
    }

    /// Number of leaves, fixed at construction.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of nodes in the arena, leaves included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of levels above the leaves; 0 for a single-leaf tree.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// The configuration the tree was built with.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node at `id`, or `None` past the end of the arena.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[cfg(test)]
    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Arena index ranges of every level, leaves first.
    pub fn levels(&self) -> &[Range<usize>] {
        &self.levels
    }

    /// Arena id of leaf `index`.
    pub fn leaf_id(&self, index: usize) -> Result<NodeId, TreeError> {
        if index >= self.leaf_count {
            return Err(TreeError::IndexOutOfRange {
                index,
                len: self.leaf_count,
            });
        }
        Ok(NodeId::new(index))
    }

    /// Stored digest of leaf `index`.
    pub fn leaf_digest(&self, index: usize) -> Result<Hash32, TreeError> {
        let id = self.leaf_id(index)?;
        Ok(self.nodes[id.index()].digest)
    }

    /// Current leaf digests in leaf order.
    pub fn leaf_digests(&self) -> impl Iterator<Item = &Hash32> + '_ {
        self.nodes[..self.leaf_count].iter().map(|n| &n.digest)
    }

    /// Value membership: true if any leaf currently holds `digest`.
    ///
    /// This is a linear scan comparing digest values. Two leaves with the
    /// same block content are indistinguishable here, and a `true` result
    /// says nothing about position. Use a proof for positional membership.
    pub fn contains_leaf_digest(&self, digest: &[u8]) -> bool {
        self.leaf_digests().any(|d| d.as_slice() == digest)
    }

    /// Generates the audit path for leaf `index`.
    pub fn generate_proof(&self, index: usize) -> Result<ProofPath, TreeError> {
        self.generate_proof_observed(index, NoopObserver)
    }

    /// Like [`generate_proof`](Self::generate_proof), reporting each sibling
    /// to `observer`.
    pub fn generate_proof_observed<O: ProofObserver>(
        &self,
        index: usize,
        mut observer: O,
    ) -> Result<ProofPath, TreeError> {
        let leaf = self.leaf_id(index)?;
        let mut path = Vec::with_capacity(self.depth());
        let mut current = leaf;
        while let Some(parent_id) = self.nodes[current.index()].parent {
            let parent = &self.nodes[parent_id.index()];
            let sibling = parent.sibling_of(current).ok_or_else(|| {
                TreeError::InternalInvariantViolation(format!(
                    "node {} has parent {} but no resolvable sibling",
                    current.index(),
                    parent_id.index()
                ))
            })?;
            let node = ProofNode {
                peer_hash: self.nodes[sibling.index()].digest,
                peer_at_left: parent.has_left_child(sibling),
            };
            observer.on_sibling(path.len(), &node);
            path.push(node);
            current = parent_id;
        }
        Ok(ProofPath {
            leaf_index: index,
            self_hash: self.nodes[leaf.index()].digest,
            path,
        })
    }

    /// Verifies `proof` against this tree's current root with this tree's
    /// hasher.
    pub fn verify_proof(&self, proof: &ProofPath) -> bool {
        proof.verify::<H>(&self.root_digest())
    }

    /// Replaces the block of leaf `index` and returns the new root digest.
    pub fn update_leaf(&mut self, index: usize, block: &[u8]) -> Result<Hash32, TreeError> {
        self.update_leaf_observed(index, block, NoopObserver)
    }

    /// Like [`update_leaf`](Self::update_leaf), reporting the new leaf digest
    /// and the refresh to `observer`.
    pub fn update_leaf_observed<O: ProofObserver>(
        &mut self,
        index: usize,
        block: &[u8],
        mut observer: O,
    ) -> Result<Hash32, TreeError> {
        let id = self.leaf_id(index)?;
        let digest = H::hash(block);
        self.nodes[id.index()].digest = digest;
        observer.on_leaf_updated(index, &digest);
        self.refresh(&[index], &mut observer)
    }

    /// Replaces several leaves at once and returns the new root digest.
    ///
    /// Every index is checked before any leaf is touched: either all updates
    /// apply or none do. Blocks are applied in order, so for a repeated index
    /// the last block wins. The internal nodes are refreshed once.
    pub fn update_leaves<B: AsRef<[u8]>>(
        &mut self,
        indices: &[usize],
        blocks: &[B],
    ) -> Result<Hash32, TreeError> {
        self.update_leaves_observed(indices, blocks, NoopObserver)
    }

    /// Like [`update_leaves`](Self::update_leaves), reporting each written leaf
    /// and the single refresh to `observer`.
    pub fn update_leaves_observed<B: AsRef<[u8]>, O: ProofObserver>(
        &mut self,
        indices: &[usize],
        blocks: &[B],
        mut observer: O,
    ) -> Result<Hash32, TreeError> {
        if indices.len() != blocks.len() {
            return Err(TreeError::LengthMismatch {
                indices: indices.len(),
                blocks: blocks.len(),
            });
        }
        for &index in indices {
            self.leaf_id(index)?;
        }

        for (&index, block) in indices.iter().zip(blocks) {
            let digest = H::hash(block);
            self.nodes[index].digest = digest;
            observer.on_leaf_updated(index, &digest);
        }
        self.refresh(indices, &mut observer)
    }

    fn refresh<O: ProofObserver>(
        &mut self,
        changed: &[usize],
        observer: &mut O,
    ) -> Result<Hash32, TreeError> {
        match self.config.rebuild_mode {
            RebuildMode::Full => self.rebuild(),
            RebuildMode::AncestorPath => self.recompute_ancestors(changed)?,
        }
        if self.config.check_after_update {
            check_tree(self)?;
        }
        let root = self.root_digest();
        observer.on_rebuild(self.config.rebuild_mode, &root);
        Ok(root)
    }
}
