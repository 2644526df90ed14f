//! Offset table and the max-entropy split.

use crate::builder::error::BuildError;
use crate::core::{DecisionTree, TestPoint};
use std::collections::BTreeMap;
use tracing::trace;

/// Offsets of each zone (rows) at each test point (columns).
pub(crate) struct OffsetTable<'a> {
    test_points: &'a [TestPoint],
    names: Vec<&'a str>,
    rows: Vec<Vec<i32>>,
}

impl<'a> OffsetTable<'a> {
    pub(crate) fn new(test_points: &'a [TestPoint]) -> Self {
        Self {
            test_points,
            names: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, name: &'a str, offsets: Vec<i32>) {
        debug_assert_eq!(offsets.len(), self.test_points.len());
        self.names.push(name);
        self.rows.push(offsets);
    }

    /// Grow a tree over all rows. Rows must have pairwise distinct offsets.
    pub(crate) fn grow(&self) -> Result<DecisionTree, BuildError> {
        let mut members: Vec<usize> = (0..self.rows.len()).collect();
        members.sort_by_key(|&row| self.names[row]);
        self.grow_from(&members)
    }

    fn grow_from(&self, members: &[usize]) -> Result<DecisionTree, BuildError> {
        if let [only] = members {
            return Ok(DecisionTree::leaf(self.names[*only]));
        }

        let (column, entropy) = self.best_column(members);
        if entropy <= 0.0 {
            return Err(BuildError::Indistinguishable {
                names: members
                    .iter()
                    .map(|&row| self.names[row].to_string())
                    .collect(),
            });
        }
        trace!(
            test_point = %self.test_points[column],
            entropy,
            zones = members.len(),
            "split"
        );

        let mut partitions: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
        for &row in members {
            partitions
                .entry(self.rows[row][column])
                .or_default()
                .push(row);
        }

        let mut children = BTreeMap::new();
        for (offset, part) in partitions {
            children.insert(offset, self.grow_from(&part)?);
        }
        Ok(DecisionTree::branch(self.test_points[column], children))
    }

    /// Column with the highest entropy; the first one wins ties.
    fn best_column(&self, members: &[usize]) -> (usize, f64) {
        let mut best = (0, f64::NEG_INFINITY);
        for column in 0..self.test_points.len() {
            let entropy = self.column_entropy(members, column);
            if entropy > best.1 {
                best = (column, entropy);
            }
        }
        best
    }

    fn column_entropy(&self, members: &[usize], column: usize) -> f64 {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for &row in members {
            *counts.entry(self.rows[row][column]).or_default() += 1;
        }

        let total = members.len() as f64;
        -counts
            .values()
            .map(|&count| {
                let p = count as f64 / total;
                p * p.log2()
            })
            .sum::<f64>()
    }
}
