//! Build errors for tree generation.

use thiserror::Error;

/// Errors that can occur when generating a decision tree.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("No candidate zones. Call .candidate(name, zone) before .build()")]
    NoCandidates,

    #[error("No test points. Pass at least one to .test_points()")]
    NoTestPoints,

    #[error("Candidate '{0}' was added more than once")]
    DuplicateCandidate(String),

    #[error("Unknown IANA zone '{0}'")]
    UnknownZone(String),

    #[error("Preferred zone '{0}' is not among the candidates")]
    UnknownPreferred(String),

    #[error("Zones {names:?} cannot be told apart by any test point")]
    Indistinguishable { names: Vec<String> },
}
