use audittree::RebuildMode;
use clap::{Parser, ValueEnum};

/// The walkthrough batch-updates leaves 1 and 2.
pub const MIN_BLOCKS: usize = 3;

fn parse_blocks(s: &str) -> Result<String, String> {
    let count = s.split(',').count();
    if count < MIN_BLOCKS {
        return Err(format!(
            "need at least {} comma-separated blocks, got {}",
            MIN_BLOCKS, count
        ));
    }
    Ok(s.to_owned())
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HasherChoice {
    Sha256,
    Blake2s,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildChoice {
    Full,
    AncestorPath,
}

impl From<RebuildChoice> for RebuildMode {
    fn from(choice: RebuildChoice) -> Self {
        match choice {
            RebuildChoice::Full => RebuildMode::Full,
            RebuildChoice::AncestorPath => RebuildMode::AncestorPath,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Builds a hash tree, proves, updates and re-proves its leaves")]
pub struct DemoCli {
    /// Comma-separated list of blocks, one leaf each
    #[arg(long, default_value = "a,b,c,d", value_parser = parse_blocks)]
    pub blocks: String,

    #[arg(long, value_enum, default_value_t = HasherChoice::Sha256)]
    pub hasher: HasherChoice,

    /// How internal nodes are refreshed after an update
    #[arg(long, value_enum, default_value_t = RebuildChoice::Full)]
    pub rebuild: RebuildChoice,

    /// Default log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log every sibling and fold step of proofs and updates
    #[arg(long)]
    pub verbose_proofs: bool,
}

impl DemoCli {
    /// The blocks as byte vectors, surrounding whitespace trimmed.
    pub fn block_list(&self) -> Vec<Vec<u8>> {
        self.blocks
            .split(',')
            .map(|b| b.trim().as_bytes().to_vec())
            .collect()
    }
}
