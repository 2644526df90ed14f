//! Structural problems a tree can have.

use thiserror::Error;

/// A single violation found while checking a tree.
///
/// Depths count probes from the root, so the root branch sits at depth 0.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TreeViolation {
    #[error("Offset key {offset} at depth {depth} outside +/-{bound} minutes")]
    OffsetOutOfBounds { offset: i32, bound: i32, depth: usize },

    #[error("Branch at depth {depth} has no children")]
    EmptyChildren { depth: usize },

    #[error("Leaf at depth {depth} is an empty string")]
    EmptyLeaf { depth: usize },

    #[error("Tree depth {depth} exceeds maximum {max}")]
    DepthExceeded { max: usize, depth: usize },

    #[error("Custom check failed: {message}")]
    CustomCheckFailed { message: String },
}
