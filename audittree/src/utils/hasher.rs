//! Digest functions used by the tree.
//!
//! Every node digest is 32 bytes. A leaf digest is `H(block)` and an internal
//! digest is `H(left || right)`, with no level prefix or domain tag, so the
//! digests stay compatible with a plain SHA-256 pairwise tree.
//!
//! Two hashers are provided:
//! - [`Sha256Hasher`]: SHA-256, the default for [`MerkleTree`](crate::MerkleTree)
//! - [`Blake2sHasher`]: BLAKE2s-256

use blake2::Blake2s256;
use sha2::{Digest, Sha256};

/// Type alias for a 32-byte hash value.
pub type Hash32 = [u8; 32];

/// A 256-bit digest function for tree nodes.
///
/// Implementors are zero-sized markers; the tree and the verifier only ever
/// call the associated functions.
pub trait TreeHasher {
    /// Short name used in diagnostics.
    const NAME: &'static str;

    /// Computes the digest of a single value (a raw block).
    fn hash<T: AsRef<[u8]>>(a: T) -> Hash32;

    /// Computes the digest of `a || b`.
    ///
    /// The order is load-bearing: `hash2(a, b) != hash2(b, a)` for distinct
    /// inputs.
    fn hash2<T: AsRef<[u8]>>(a: T, b: T) -> Hash32;

    /// Like [`hash2`](Self::hash2), but swaps the inputs when `exchange_ab`
    /// is set.
    fn hash2x<T: AsRef<[u8]>>(a: T, b: T, exchange_ab: bool) -> Hash32 {
        if exchange_ab {
            Self::hash2(b, a)
        } else {
            Self::hash2(a, b)
        }
    }
}

/// SHA-256 node hasher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sha256Hasher;

impl TreeHasher for Sha256Hasher {
    const NAME: &'static str = "sha256";

    fn hash<T: AsRef<[u8]>>(a: T) -> Hash32 {
        let mut hasher = Sha256::new();
        hasher.update(a);
        hasher.finalize().into()
    }

    fn hash2<T: AsRef<[u8]>>(a: T, b: T) -> Hash32 {
        let mut hasher = Sha256::new();
        hasher.update(a);
        hasher.update(b);
        hasher.finalize().into()
    }
}

/// BLAKE2s-256 node hasher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Blake2sHasher;

impl TreeHasher for Blake2sHasher {
    const NAME: &'static str = "blake2s256";

    fn hash<T: AsRef<[u8]>>(a: T) -> Hash32 {
        let mut hasher = Blake2s256::new();
        hasher.update(a);
        hasher.finalize().into()
    }

    fn hash2<T: AsRef<[u8]>>(a: T, b: T) -> Hash32 {
        let mut hasher = Blake2s256::new();
        hasher.update(a);
        hasher.update(b);
        hasher.finalize().into()
    }
}

/// Computes the SHA-256 digest of a single value.
pub fn hash<T: AsRef<[u8]>>(a: T) -> Hash32 {
    Sha256Hasher::hash(a)
}

/// Computes the SHA-256 digest of `a || b`.
pub fn hash2<T: AsRef<[u8]>>(a: T, b: T) -> Hash32 {
    Sha256Hasher::hash2(a, b)
}
