use audittree::{
    merkletree::check,
    utils::hasher::{self, Hash32},
    verify_proof, verify_proof_with, Blake2sHasher, MerkleTree, ProofPath, RebuildMode,
    TreeConfig, TreeError,
};

fn make_blocks(count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| format!("entry-{:04}", i).into_bytes())
        .collect()
}

fn check_equal(pp: &ProofPath, other: &ProofPath) -> String {
    if pp.path.len() != other.path.len() {
        return String::from("Path's length not equal");
    }
    if pp.self_hash != other.self_hash {
        return String::from("SelfHash not equal");
    }
    for i in 0..pp.path.len() {
        if pp.path[i].peer_hash != other.path[i].peer_hash {
            return format!("Path.PeerHash[{}] not equal", i);
        }
        if pp.path[i].peer_at_left != other.path[i].peer_at_left {
            return format!("Path.PeerAtLeft[{}] not equal", i);
        }
    }
    String::from("")
}

#[test]
fn test_tree_proof() {
    for count in [1, 2, 3, 5, 8, 13, 64, 100] {
        let blocks = make_blocks(count);
        let tree = MerkleTree::new(&blocks).unwrap();
        check::check_tree(&tree).unwrap();
        let root = tree.root_digest();

        for i in 0..count {
            let proof = tree.generate_proof(i).unwrap();
            assert_eq!(hasher::hash(&blocks[i]), proof.self_hash);
            assert_eq!(tree.depth(), proof.len());
            assert!(verify_proof(&proof, &root), "count={} i={}", count, i);

            // generation is read-only and deterministic
            let again = tree.generate_proof(i).unwrap();
            assert_eq!(String::from(""), check_equal(&proof, &again));
        }
    }
}

#[test]
fn test_three_leaf_root() {
    let tree = MerkleTree::new(&[b"a", b"b", b"c"]).unwrap();
    let (ha, hb, hc) = (hasher::hash(b"a"), hasher::hash(b"b"), hasher::hash(b"c"));
    let expected = hasher::hash2(hasher::hash2(ha, hb), hasher::hash2(hc, hc));
    assert_eq!(expected, tree.root_digest());

    let proof = tree.generate_proof(2).unwrap();
    assert!(verify_proof(&proof, &expected));
}

#[test]
fn test_known_root() {
    let tree = MerkleTree::new(&[b"a", b"b", b"c", b"d"]).unwrap();
    assert_eq!(
        "14ede5e8e97ad9372327728f5099b95604a39593cac3bd38a343ad76205213e7",
        hex::encode(tree.root_digest())
    );
}

#[test]
fn test_proof_rejects_wrong_root_and_leaf() {
    let blocks = make_blocks(6);
    let tree = MerkleTree::new(&blocks).unwrap();
    let other = MerkleTree::new(&make_blocks(7)).unwrap();

    let proof = tree.generate_proof(4).unwrap();
    assert!(!verify_proof(&proof, &other.root_digest()));

    let mut forged = proof.clone();
    forged.self_hash = hasher::hash(b"forged");
    assert!(!verify_proof(&forged, &tree.root_digest()));

    let mut truncated = proof.clone();
    truncated.path.pop();
    assert!(!verify_proof(&truncated, &tree.root_digest()));

    let mut flipped = proof;
    for node in flipped.path.iter_mut() {
        node.peer_at_left = !node.peer_at_left;
    }
    assert!(!verify_proof(&flipped, &tree.root_digest()));
}

#[test]
fn test_permutation_changes_root() {
    let blocks = make_blocks(9);
    let root = MerkleTree::new(&blocks).unwrap().root_digest();
    for (i, j) in [(0, 1), (0, 8), (3, 7), (7, 8)] {
        let mut swapped = blocks.clone();
        swapped.swap(i, j);
        let other = MerkleTree::new(&swapped).unwrap().root_digest();
        assert_ne!(root, other, "swap {} {}", i, j);
    }
}

#[test]
fn test_get_proof_err() {
    let tree = MerkleTree::new(&make_blocks(4)).unwrap();
    let proof = tree.generate_proof(4);
    assert_eq!(
        Err(TreeError::IndexOutOfRange { index: 4, len: 4 }),
        proof
    );
    if let Err(e) = proof {
        assert_eq!(
            "Leaf index 4 is out of range for a tree of 4 leaves",
            e.to_string()
        );
    }
}

#[test]
fn test_blake2s_proofs() {
    let blocks = make_blocks(10);
    let config = TreeConfig::default().with_rebuild_mode(RebuildMode::AncestorPath);
    let tree = MerkleTree::<Blake2sHasher>::build(&blocks, config).unwrap();
    let root: Hash32 = tree.root_digest();
    for i in 0..blocks.len() {
        let proof = tree.generate_proof(i).unwrap();
        assert!(verify_proof_with::<Blake2sHasher>(&proof, &root));
        assert!(!verify_proof(&proof, &root));
    }
}

#[test]
fn test_from_leaf_digests_matches_blocks() {
    let blocks = make_blocks(5);
    let digests: Vec<Hash32> = blocks.iter().map(hasher::hash).collect();
    let from_digests: MerkleTree =
        MerkleTree::from_leaf_digests(digests.clone(), TreeConfig::default()).unwrap();
    let from_blocks = MerkleTree::new(&blocks).unwrap();
    assert_eq!(from_blocks.root_digest(), from_digests.root_digest());
    assert_eq!(
        digests,
        from_digests.leaf_digests().copied().collect::<Vec<_>>()
    );
}
