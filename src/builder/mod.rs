//! Generation of decision trees from candidate zones.
//!
//! Every candidate is probed at every test point. Candidates whose offsets
//! agree everywhere collapse to one representative; the rest are split
//! greedily, always probing the test point whose offsets are most evenly
//! spread (highest entropy) among the zones still in play.

pub mod error;
mod table;
pub mod tree;
mod zones;

pub use error::BuildError;
pub use tree::{Candidate, TreeBuilder};
pub use zones::{is_canonical, DEFAULT_PREFERRED};

use crate::bundle::TreeBundle;
use crate::core::{DecisionTree, TestPoint};
use std::collections::BTreeMap;

/// First year of the default test point grid.
pub const GRID_FIRST_YEAR: i32 = 2000;
/// Last year of the default test point grid.
pub const GRID_LAST_YEAR: i32 = 2017;

/// A generated tree and the zones it cannot tell apart.
#[derive(Clone, Debug, PartialEq)]
pub struct BuiltTree {
    pub tree: DecisionTree,
    /// Representative name -> sorted names that share its offsets.
    pub equivalencies: BTreeMap<String, Vec<String>>,
}

impl BuiltTree {
    /// Wrap into a versioned bundle stamped with the current time.
    pub fn into_bundle(self) -> TreeBundle {
        TreeBundle::new(self.tree, self.equivalencies)
    }
}

/// 00:27 wall-clock time on the first of every month, 2000 through 2017.
///
/// The odd minute keeps probes clear of transitions, which happen on the
/// hour or half hour.
///
/// # Example
///
/// ```
/// use tzsniff::builder::default_test_points;
///
/// let points = default_test_points();
/// assert_eq!(points.len(), 18 * 12);
/// assert_eq!(points[0].to_string(), "2000-01-01T00:27:00");
/// ```
pub fn default_test_points() -> Vec<TestPoint> {
    (GRID_FIRST_YEAR..=GRID_LAST_YEAR)
        .flat_map(|year| (1..=12).map(move |month| (year, month)))
        .filter_map(|(year, month)| TestPoint::wall(year, month, 1, 0, 27))
        .collect()
}

/// Generate a tree over the current zones of the IANA database.
///
/// `preferred` names are kept as representatives when they collide, ahead
/// of [`DEFAULT_PREFERRED`].
pub fn build_iana_tree<I, N>(preferred: I) -> Result<BuiltTree, BuildError>
where
    I: IntoIterator<Item = N>,
    N: Into<String>,
{
    TreeBuilder::iana().prefer(preferred).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolve;
    use chrono_tz::Tz;

    #[test]
    fn default_grid_is_monthly_and_ordered() {
        let points = default_test_points();

        assert_eq!(points.len(), 216);
        assert_eq!(points[1], TestPoint::wall(2000, 2, 1, 0, 27).unwrap());
        assert_eq!(points[215], TestPoint::wall(2017, 12, 1, 0, 27).unwrap());
    }

    #[test]
    fn iana_tree_recognises_common_zones() {
        let built = build_iana_tree(["America/New_York", "Europe/Paris"]).unwrap();

        let names = [
            "America/New_York",
            "Europe/Paris",
            "Asia/Kolkata",
            "Australia/Adelaide",
        ];
        for name in names {
            let tz: Tz = name.parse().unwrap();
            let resolved = resolve(&built.tree, &tz).unwrap();
            let same = resolved == name
                || built
                    .equivalencies
                    .get(resolved)
                    .is_some_and(|aliases| aliases.iter().any(|alias| alias == name));
            assert!(same, "{} resolved to {}", name, resolved);
        }

        let new_york: Tz = "America/New_York".parse().unwrap();
        assert_eq!(resolve(&built.tree, &new_york), Some("America/New_York"));
    }

    #[test]
    fn iana_tree_answers_with_current_names() {
        let built = build_iana_tree(Vec::<String>::new()).unwrap();

        for leaf in built.tree.leaves() {
            assert!(is_canonical(leaf), "{} is a compatibility link", leaf);
        }

        let expected = [
            ("America/Los_Angeles", "America/Los_Angeles"),
            ("US/Pacific", "America/Los_Angeles"),
            ("Asia/Tokyo", "Asia/Tokyo"),
            ("ROK", "Asia/Tokyo"),
            ("UTC", "Etc/UTC"),
            ("Zulu", "Etc/UTC"),
        ];
        for (zone, representative) in expected {
            let tz: Tz = zone.parse().unwrap();
            assert_eq!(resolve(&built.tree, &tz), Some(representative), "{}", zone);
        }
        assert!(built.equivalencies.values().flatten().all(|name| is_canonical(name)));
    }

    #[test]
    fn into_bundle_keeps_tree_and_equivalencies() {
        let built = TreeBuilder::new()
            .candidate("UTC", chrono::FixedOffset::east_opt(0).unwrap())
            .build()
            .unwrap();

        let bundle = built.clone().into_bundle();
        assert_eq!(bundle.tree, built.tree);
        assert_eq!(bundle.equivalencies, built.equivalencies);
    }
}
