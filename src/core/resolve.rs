//! Walking a decision tree.
//!
//! Each branch asks "what was the UTC offset at this moment?" of the
//! provider and follows the matching child. There is no backtracking: a
//! branch without a child for the observed offset ends the walk with no
//! answer.

use super::offset::{offset_minutes, HostZone, OffsetProvider};
use super::tree::{DecisionTree, TestPoint};
use tracing::{debug, trace};

/// One probe made during a walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Probe {
    /// Moment that was probed
    pub test_point: TestPoint,
    /// Observed offset, in minutes ahead of UTC
    pub offset_minutes: i32,
    /// Whether the branch had a child for the observed offset
    pub matched: bool,
}

/// Outcome of a walk, with every probe that led to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution<'t> {
    leaf: Option<&'t str>,
    probes: Vec<Probe>,
}

impl<'t> Resolution<'t> {
    /// The resolved leaf, `None` if some branch had no matching child.
    pub fn leaf(&self) -> Option<&'t str> {
        self.leaf
    }

    pub fn is_match(&self) -> bool {
        self.leaf.is_some()
    }

    /// Probes in the order they were made.
    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    /// The probe that ended the walk without a match, if any.
    pub fn miss(&self) -> Option<&Probe> {
        self.probes.last().filter(|probe| !probe.matched)
    }
}

fn walk<'t, P, F>(tree: &'t DecisionTree, provider: &P, mut on_probe: F) -> Option<&'t str>
where
    P: OffsetProvider + ?Sized,
    F: FnMut(Probe),
{
    let mut node = tree;
    loop {
        let branch = match node {
            DecisionTree::Leaf(value) => return Some(value.as_str()),
            DecisionTree::Branch(branch) => branch,
        };

        let offset = offset_minutes(provider.offset_at(&branch.test_point));
        let child = branch.children.get(&offset);
        trace!(test_point = %branch.test_point, offset, matched = child.is_some(), "probe");
        on_probe(Probe {
            test_point: branch.test_point,
            offset_minutes: offset,
            matched: child.is_some(),
        });

        match child {
            Some(child) => node = child,
            None => {
                debug!(
                    test_point = %branch.test_point,
                    offset,
                    known = branch.children.len(),
                    "no branch for observed offset"
                );
                return None;
            }
        }
    }
}

/// Resolve the zone identified by `provider`.
///
/// A leaf resolves to itself without consulting the provider. Walks are
/// iterative, so the call stack does not grow with tree depth.
///
/// # Example
///
/// ```rust
/// use chrono::FixedOffset;
/// use tzsniff::core::{resolve, DecisionTree, TestPoint};
///
/// let tree = DecisionTree::branch(
///     TestPoint::wall(2000, 1, 1, 0, 27).unwrap(),
///     [(300, DecisionTree::leaf("Asia/Tashkent"))],
/// );
///
/// let tashkent = FixedOffset::east_opt(5 * 3600).unwrap();
/// let lima = FixedOffset::west_opt(5 * 3600).unwrap();
///
/// assert_eq!(resolve(&tree, &tashkent), Some("Asia/Tashkent"));
/// assert_eq!(resolve(&tree, &lima), None);
/// ```
pub fn resolve<'t, P>(tree: &'t DecisionTree, provider: &P) -> Option<&'t str>
where
    P: OffsetProvider + ?Sized,
{
    walk(tree, provider, |_| {})
}

/// Like [`resolve`], also recording each probe.
pub fn resolve_with_path<'t, P>(tree: &'t DecisionTree, provider: &P) -> Resolution<'t>
where
    P: OffsetProvider + ?Sized,
{
    let mut probes = Vec::new();
    let leaf = walk(tree, provider, |probe| probes.push(probe));
    Resolution { leaf, probes }
}

/// Resolve the zone the host is configured with.
pub fn resolve_host(tree: &DecisionTree) -> Option<&str> {
    resolve(tree, &HostZone)
}
