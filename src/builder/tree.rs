//! Builder for generating decision trees from candidate zones.

use crate::builder::error::BuildError;
use crate::builder::table::OffsetTable;
use crate::builder::zones::{is_canonical, DEFAULT_PREFERRED};
use crate::builder::{default_test_points, BuiltTree};
use crate::core::{offset_minutes, resolve, OffsetProvider, TestPoint};
use chrono_tz::{Tz, TZ_VARIANTS};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// A named zone the generated tree should be able to recognise.
pub struct Candidate {
    name: String,
    zone: Box<dyn OffsetProvider + Send + Sync>,
}

impl Candidate {
    pub fn new<P>(name: impl Into<String>, zone: P) -> Self
    where
        P: OffsetProvider + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            zone: Box::new(zone),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn offsets(&self, test_points: &[TestPoint]) -> Vec<i32> {
        test_points
            .iter()
            .map(|point| offset_minutes(self.zone.offset_at(point)))
            .collect()
    }
}

/// Builder for generating a decision tree with a fluent API.
///
/// Zones whose offsets agree at every test point cannot be told apart; one
/// of them is kept as the representative and the rest are reported as its
/// equivalencies. Later candidates win, unless a preferred name says
/// otherwise.
pub struct TreeBuilder {
    candidates: Vec<Candidate>,
    test_points: Vec<TestPoint>,
    preferred: Vec<String>,
}

impl TreeBuilder {
    /// Create a builder probing the default test point grid.
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
            test_points: default_test_points(),
            preferred: Vec::new(),
        }
    }

    /// Create a builder seeded with the current zones of the IANA database.
    ///
    /// Compatibility links are left out, and the well-known zones in
    /// [`DEFAULT_PREFERRED`] represent whatever they collide with.
    pub fn iana() -> Self {
        TZ_VARIANTS
            .iter()
            .filter(|tz| is_canonical(tz.name()))
            .fold(Self::new(), |builder, tz| builder.candidate(tz.name(), *tz))
            .prefer(DEFAULT_PREFERRED.iter().copied())
    }

    /// Add a candidate zone.
    pub fn candidate<P>(mut self, name: impl Into<String>, zone: P) -> Self
    where
        P: OffsetProvider + Send + Sync + 'static,
    {
        self.candidates.push(Candidate::new(name, zone));
        self
    }

    /// Add an IANA zone by name.
    pub fn iana_zone(self, name: &str) -> Result<Self, BuildError> {
        let tz: Tz = name
            .parse()
            .map_err(|_| BuildError::UnknownZone(name.to_string()))?;
        Ok(self.candidate(name, tz))
    }

    /// Replace the test points (required to be non-empty).
    pub fn test_points<I>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = TestPoint>,
    {
        self.test_points = points.into_iter().collect();
        self
    }

    /// Names to keep as representatives when they collide with others.
    /// Later names are favoured over earlier ones.
    pub fn prefer<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.preferred.extend(names.into_iter().map(Into::into));
        self
    }

    /// Generate the tree.
    /// Returns an error if the builder fails validation.
    pub fn build(self) -> Result<BuiltTree, BuildError> {
        if self.candidates.is_empty() {
            return Err(BuildError::NoCandidates);
        }
        if self.test_points.is_empty() {
            return Err(BuildError::NoTestPoints);
        }

        let mut index_of = HashMap::new();
        for (index, candidate) in self.candidates.iter().enumerate() {
            if index_of.insert(candidate.name(), index).is_some() {
                return Err(BuildError::DuplicateCandidate(candidate.name.clone()));
            }
        }

        let rows: Vec<Vec<i32>> = self
            .candidates
            .iter()
            .map(|candidate| candidate.offsets(&self.test_points))
            .collect();

        let mut representative_of: HashMap<&[i32], usize> = HashMap::new();
        for (index, row) in rows.iter().enumerate() {
            representative_of.insert(row.as_slice(), index);
        }
        for name in &self.preferred {
            let index = *index_of
                .get(name.as_str())
                .ok_or_else(|| BuildError::UnknownPreferred(name.clone()))?;
            representative_of.insert(rows[index].as_slice(), index);
        }

        let representatives: HashSet<usize> = representative_of.values().copied().collect();
        let mut table = OffsetTable::new(&self.test_points);
        for &index in &representatives {
            table.push(self.candidates[index].name(), rows[index].clone());
        }
        let tree = table.grow()?;

        let mut equivalencies: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (index, candidate) in self.candidates.iter().enumerate() {
            if representatives.contains(&index) {
                continue;
            }
            match resolve(&tree, candidate.zone.as_ref()) {
                Some(representative) => equivalencies
                    .entry(representative.to_string())
                    .or_default()
                    .push(candidate.name.clone()),
                None => debug!(zone = candidate.name(), "candidate fell off its own tree"),
            }
        }
        for aliases in equivalencies.values_mut() {
            aliases.sort();
        }

        debug!(
            candidates = self.candidates.len(),
            unique = representatives.len(),
            test_points = self.test_points.len(),
            depth = tree.max_depth(),
            "generated decision tree"
        );

        Ok(BuiltTree {
            tree,
            equivalencies,
        })
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
