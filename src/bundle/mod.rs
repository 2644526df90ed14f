//! Versioned, serializable bundle of a generated tree.
//!
//! A bundle carries the tree together with the equivalencies found while
//! generating it, so a resolved representative can be mapped back to every
//! zone it stands for.

use crate::core::{resolve, DecisionTree, OffsetProvider};
use crate::validate::TreeRules;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod error;

pub use error::BundleError;

/// Version identifier for bundle format
pub const BUNDLE_VERSION: u32 = 1;

/// Serializable decision tree plus equivalencies.
///
/// # Example
///
/// ```rust
/// use chrono::FixedOffset;
/// use tzsniff::builder::TreeBuilder;
/// use tzsniff::bundle::TreeBundle;
///
/// let bundle = TreeBuilder::new()
///     .candidate("Africa/Lagos", FixedOffset::east_opt(3600).unwrap())
///     .candidate("Etc/GMT-1", FixedOffset::east_opt(3600).unwrap())
///     .prefer(["Africa/Lagos"])
///     .build()
///     .unwrap()
///     .into_bundle();
///
/// let json = bundle.to_json().unwrap();
/// let restored = TreeBundle::from_json(&json).unwrap();
///
/// assert_eq!(restored.representative_of("Etc/GMT-1"), Some("Africa/Lagos"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeBundle {
    /// Bundle format version
    pub version: u32,

    /// When the tree was generated
    pub generated_at: DateTime<Utc>,

    /// The decision tree
    pub tree: DecisionTree,

    /// Representative name -> names that share its offsets
    #[serde(default)]
    pub equivalencies: BTreeMap<String, Vec<String>>,
}

impl TreeBundle {
    pub fn new(tree: DecisionTree, equivalencies: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            version: BUNDLE_VERSION,
            generated_at: Utc::now(),
            tree,
            equivalencies,
        }
    }

    pub fn to_json(&self) -> Result<String, BundleError> {
        serde_json::to_string_pretty(self).map_err(BundleError::Encode)
    }

    /// Read a bundle, rejecting versions this build does not understand.
    pub fn from_json(json: &str) -> Result<Self, BundleError> {
        let bundle: Self = serde_json::from_str(json).map_err(BundleError::Decode)?;

        if bundle.version != BUNDLE_VERSION {
            return Err(BundleError::UnsupportedVersion {
                found: bundle.version,
                supported: BUNDLE_VERSION,
            });
        }

        Ok(bundle)
    }

    /// Check the bundled tree against `rules`, reporting every violation.
    pub fn validate(&self, rules: &TreeRules) -> Result<(), BundleError> {
        let violations = rules.violations(&self.tree);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(BundleError::MalformedTree(violations))
        }
    }

    /// Resolve the zone identified by `provider` to its representative.
    pub fn resolve<P>(&self, provider: &P) -> Option<&str>
    where
        P: OffsetProvider + ?Sized,
    {
        resolve(&self.tree, provider)
    }

    /// The representative that stands for `name`.
    ///
    /// A name that is itself a leaf of the tree represents itself.
    pub fn representative_of(&self, name: &str) -> Option<&str> {
        if let Some(leaf) = self.tree.leaves().into_iter().find(|leaf| *leaf == name) {
            return Some(leaf);
        }
        self.equivalencies
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|alias| alias == name))
            .map(|(representative, _)| representative.as_str())
    }

    /// Zones indistinguishable from `representative`, excluding itself.
    pub fn aliases(&self, representative: &str) -> &[String] {
        self.equivalencies
            .get(representative)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
