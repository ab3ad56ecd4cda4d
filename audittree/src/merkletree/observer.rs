//! Optional diagnostics for proof generation, verification and updates.
//!
//! The tree and the verifier never print. Callers who want to trace a proof
//! pass an observer to the `*_observed` variants of the operations; the plain
//! variants use [`NoopObserver`].

use auto_impl::auto_impl;
use log::{log, Level};

use super::proof::ProofNode;
use crate::config::RebuildMode;
use crate::utils::hasher::Hash32;

/// Receives events from proof generation, verification and leaf updates.
///
/// Every callback defaults to doing nothing. Observers are passed by value;
/// `&mut O` and `Box<O>` are observers too, so a caller can keep ownership
/// of a stateful observer.
#[auto_impl(&mut, Box)]
pub trait ProofObserver {
    /// A sibling was appended to a proof at `level` (0 = leaf level).
    fn on_sibling(&mut self, _level: usize, _node: &ProofNode) {}

    /// The verifier folded `node` into the running digest, giving `current`.
    fn on_fold_step(&mut self, _level: usize, _node: &ProofNode, _current: &Hash32) {}

    /// The verifier finished; `computed` is the recomputed root.
    fn on_verify_result(&mut self, _computed: &Hash32, _expected: &Hash32, _valid: bool) {}

    /// Leaf `index` now holds `digest`.
    fn on_leaf_updated(&mut self, _index: usize, _digest: &Hash32) {}

    /// Internal digests were refreshed after an update.
    fn on_rebuild(&mut self, _mode: RebuildMode, _root: &Hash32) {}
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl ProofObserver for NoopObserver {}

/// Observer that forwards every event to the `log` facade.
#[derive(Clone, Copy, Debug)]
pub struct LogObserver {
    level: Level,
}

impl Default for LogObserver {
    fn default() -> Self {
        Self {
            level: Level::Debug,
        }
    }
}

impl LogObserver {
    /// Logs every event at `level`.
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl ProofObserver for LogObserver {
    fn on_sibling(&mut self, level: usize, node: &ProofNode) {
        log!(
            self.level,
            "proof element added: level={} peer={} peer_at_left={}",
            level,
            hex::encode(node.peer_hash),
            node.peer_at_left
        );
    }

    fn on_fold_step(&mut self, level: usize, node: &ProofNode, current: &Hash32) {
        log!(
            self.level,
            "combined level={} peer={} peer_at_left={} -> {}",
            level,
            hex::encode(node.peer_hash),
            node.peer_at_left,
            hex::encode(current)
        );
    }

    fn on_verify_result(&mut self, computed: &Hash32, expected: &Hash32, valid: bool) {
        log!(
            self.level,
            "computed root {} expected {} valid={}",
            hex::encode(computed),
            hex::encode(expected),
            valid
        );
    }

    fn on_leaf_updated(&mut self, index: usize, digest: &Hash32) {
        log!(
            self.level,
            "updated leaf {} with hash {}",
            index,
            hex::encode(digest)
        );
    }

    fn on_rebuild(&mut self, mode: RebuildMode, root: &Hash32) {
        log!(self.level, "rebuild ({}) root={}", mode, hex::encode(root));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingObserver {
        siblings: usize,
        rebuilds: usize,
    }

    impl ProofObserver for CountingObserver {
        fn on_sibling(&mut self, _level: usize, _node: &ProofNode) {
            self.siblings += 1;
        }

        fn on_rebuild(&mut self, _mode: RebuildMode, _root: &Hash32) {
            self.rebuilds += 1;
        }
    }

    fn feed<O: ProofObserver>(mut observer: O) {
        let node = ProofNode {
            peer_hash: [7; 32],
            peer_at_left: true,
        };
        observer.on_sibling(0, &node);
        observer.on_fold_step(0, &node, &[1; 32]);
        observer.on_verify_result(&[1; 32], &[1; 32], true);
        observer.on_rebuild(RebuildMode::Full, &[2; 32]);
    }

    #[test]
    fn test_forwarding_through_mut_ref_and_box() {
        let mut counter = CountingObserver::default();
        feed(&mut counter);
        feed(&mut counter);
        assert_eq!(2, counter.siblings);
        assert_eq!(2, counter.rebuilds);

        let boxed: Box<dyn ProofObserver> = Box::new(NoopObserver);
        feed(boxed);
        feed(LogObserver::new(Level::Trace));
    }
}
