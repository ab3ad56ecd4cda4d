use thiserror::Error;

/// Errors returned by tree construction, proof generation and updates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Cannot build a tree from zero blocks")]
    EmptyInput,

    #[error("Leaf index {index} is out of range for a tree of {len} leaves")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Batch update has {indices} indices but {blocks} blocks")]
    LengthMismatch { indices: usize, blocks: usize },

    /// A broken parent/sibling chain or a stale digest. Unreachable for a tree
    /// built by this crate; callers should treat it as fatal.
    #[error("Internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

impl From<TreeError> for String {
    fn from(error: TreeError) -> Self {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            "Leaf index 7 is out of range for a tree of 4 leaves",
            TreeError::IndexOutOfRange { index: 7, len: 4 }.to_string()
        );
        assert_eq!(
            "Batch update has 2 indices but 1 blocks",
            String::from(TreeError::LengthMismatch {
                indices: 2,
                blocks: 1
            })
        );
    }
}
