//! Errors raised while moving a tree bundle in and out of JSON.

use crate::validate::TreeViolation;
use thiserror::Error;

/// Why a bundle could not be written, read back, or trusted.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The bundle could not be rendered as JSON.
    #[error("Failed to encode bundle: {0}")]
    Encode(#[source] serde_json::Error),

    /// The input is not a bundle: malformed JSON, a missing field, or a
    /// tree node that is neither a zone name nor a branch.
    #[error("Failed to decode bundle: {0}")]
    Decode(#[source] serde_json::Error),

    /// The bundle was written with a layout this build cannot read.
    #[error("Bundle format version {found} is not readable, expected {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The bundled tree parsed but broke the caller's rules.
    #[error("Bundled tree is malformed: {}", join(.0))]
    MalformedTree(Vec<TreeViolation>),
}

fn join(violations: &[TreeViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
