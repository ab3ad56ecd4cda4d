// Walkthrough of the tree API.
// - build a tree over --blocks and print the root
// - prove leaf 0 and verify it
// - update leaf 0, check the old proof fails and a fresh one passes
// - batch-update leaves 1 and 2
// - read leaf 1 back and run membership checks
use audittree::{
    verify_proof_observed, LogObserver, MerkleTree, ProofPath, TreeConfig, TreeError, TreeHasher,
};
use audittree::{Blake2sHasher, Sha256Hasher};
use audittree_demo::common::{cli, utils};
use clap::Parser;
use log::{error, info};

fn format_path(proof: &ProofPath) -> String {
    let peers: Vec<String> = proof
        .path
        .iter()
        .map(|node| {
            let side = if node.peer_at_left { "L" } else { "R" };
            format!("{}:{}", side, hex::encode(node.peer_hash))
        })
        .collect();
    format!("[{}]", peers.join(" "))
}

fn run<H: TreeHasher>(args: &cli::DemoCli) -> Result<(), TreeError> {
    let config = TreeConfig::default().with_rebuild_mode(args.rebuild.into());
    let observer = LogObserver::new(utils::observer_level(args.verbose_proofs));
    let blocks = args.block_list();

    let mut tree = MerkleTree::<H>::build(&blocks, config)?;
    info!(
        "Merkle Root ({}, {} leaves): {}",
        H::NAME,
        tree.leaf_count(),
        hex::encode(tree.root_digest())
    );

    let proof = tree.generate_proof_observed(0, observer)?;
    info!("Generated proof for leaf 0: {}", format_path(&proof));
    let valid = verify_proof_observed::<H, _>(&proof, &tree.root_digest(), observer);
    info!("Proof valid: {}", valid);

    let new_root = tree.update_leaf_observed(0, b"e", observer)?;
    info!("Updated Merkle Root: {}", hex::encode(new_root));
    let stale = verify_proof_observed::<H, _>(&proof, &new_root, observer);
    info!("Old proof valid against updated root: {}", stale);

    let proof = tree.generate_proof_observed(0, observer)?;
    info!("Generated proof for updated leaf 0: {}", format_path(&proof));
    let valid = verify_proof_observed::<H, _>(&proof, &new_root, observer);
    info!("Updated proof valid: {}", valid);

    let new_blocks: [&[u8]; 2] = [b"f", b"g"];
    let new_root = tree.update_leaves_observed(&[1, 2], &new_blocks, observer)?;
    info!(
        "Updated Merkle Root after multiple updates: {}",
        hex::encode(new_root)
    );

    let leaf_digest = tree.leaf_digest(1)?;
    info!("Hash of leaf 1: {}", hex::encode(leaf_digest));
    info!(
        "Leaf 1 is valid: {}",
        tree.contains_leaf_digest(&leaf_digest)
    );
    info!(
        "Invalid leaf is valid: {}",
        tree.contains_leaf_digest(b"invalid_hash")
    );
    Ok(())
}

fn main() {
    let args = cli::DemoCli::parse();
    utils::init_logging(&args.log_level);

    let result = match args.hasher {
        cli::HasherChoice::Sha256 => run::<Sha256Hasher>(&args),
        cli::HasherChoice::Blake2s => run::<Blake2sHasher>(&args),
    };
    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
