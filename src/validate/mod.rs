//! Validation of decision trees.
//!
//! Resolving never validates: a malformed tree simply fails to match. Callers
//! that load trees from untrusted sources can opt into these checks, which
//! use Stillwater's `Validation` type to report ALL problems in one pass
//! instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use tzsniff::core::{DecisionTree, TestPoint};
//! use tzsniff::validate::{TreeRulesBuilder, TreeViolation};
//!
//! let rules = TreeRulesBuilder::new().max_depth(8).build();
//!
//! let tree = DecisionTree::branch(
//!     TestPoint::wall(2000, 1, 1, 0, 27).unwrap(),
//!     [(1000, DecisionTree::leaf("Mars/Olympus_Mons"))],
//! );
//!
//! let violations = rules.violations(&tree);
//! assert!(matches!(violations[0], TreeViolation::OffsetOutOfBounds { offset: 1000, .. }));
//! ```

pub mod builder;
pub mod rules;
pub mod violations;

pub use builder::TreeRulesBuilder;
pub use rules::{TreeCheck, TreeRules, DEFAULT_OFFSET_BOUND};
pub use violations::TreeViolation;
