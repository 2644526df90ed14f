//! tzsniff: identify a time zone by its history of UTC offsets
//!
//! A decision tree asks, one moment at a time, "what was the UTC offset
//! here?" and follows the branch for the answer until it reaches a zone
//! name. Because zones that agree today often disagreed at some point in
//! the past (a different DST rule, a skipped season), a handful of probes
//! is enough to single out the configured zone among hundreds.
//!
//! The walk itself is a pure function of the tree and an injected
//! [`OffsetProvider`](core::OffsetProvider). The host's configured zone is
//! just one provider among others ([`HostZone`](core::HostZone)).
//!
//! # Core Concepts
//!
//! - **DecisionTree**: leaves name zones, branches probe one test point
//! - **OffsetProvider**: answers "what was the offset at this moment?"
//! - **TreeBuilder**: generates a tree from candidate zones
//! - **TreeRules**: optional checks for trees loaded from elsewhere
//!
//! # Example
//!
//! ```rust
//! use chrono::FixedOffset;
//! use tzsniff::core::{resolve, DecisionTree, TestPoint};
//!
//! let tree = DecisionTree::from_json(r#"{
//!     "testPoint": "2000-01-01T00:27:00",
//!     "children": {
//!         "-300": {
//!             "testPoint": "2000-07-01T00:27:00",
//!             "children": { "-240": "America/New_York", "-300": "America/Panama" }
//!         },
//!         "60": "Europe/Paris"
//!     }
//! }"#).unwrap();
//!
//! let panama = FixedOffset::west_opt(5 * 3600).unwrap();
//! assert_eq!(resolve(&tree, &panama), Some("America/Panama"));
//!
//! let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
//! assert_eq!(resolve(&tree, &tokyo), None);
//! ```

pub mod builder;
pub mod bundle;
pub mod core;
pub mod validate;

// Re-export commonly used types
pub use crate::builder::{BuildError, BuiltTree, TreeBuilder};
pub use crate::bundle::TreeBundle;
pub use crate::core::{
    resolve, resolve_host, resolve_with_path, DecisionTree, HostZone, OffsetProvider, TestPoint,
};
