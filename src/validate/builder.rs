//! Builder API for creating tree rules.

use crate::core::DecisionTree;
use crate::validate::rules::{TreeCheck, TreeRules, DEFAULT_OFFSET_BOUND};
use crate::validate::violations::TreeViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for creating tree rules
pub struct TreeRulesBuilder {
    max_depth: Option<usize>,
    offset_bound: i32,
    required_checks: Vec<TreeCheck>,
}

impl TreeRulesBuilder {
    pub fn new() -> Self {
        Self {
            max_depth: None,
            offset_bound: DEFAULT_OFFSET_BOUND,
            required_checks: Vec::new(),
        }
    }

    /// Set the maximum number of probes on any path
    pub fn max_depth(mut self, n: usize) -> Self {
        self.max_depth = Some(n);
        self
    }

    /// Set the largest accepted absolute offset key, in minutes
    pub fn offset_bound(mut self, minutes: i32) -> Self {
        self.offset_bound = minutes.abs();
        self
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&DecisionTree) -> Validation<(), NonEmptyVec<TreeViolation>>
            + Send
            + Sync
            + 'static,
    {
        self.required_checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with error message
    pub fn require_pred<F>(mut self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&DecisionTree) -> bool + Send + Sync + 'static,
    {
        let check = move |tree: &DecisionTree| {
            if predicate(tree) {
                Validation::success(())
            } else {
                Validation::fail(TreeViolation::CustomCheckFailed {
                    message: error_msg.clone(),
                })
            }
        };
        self.required_checks.push(Box::new(check));
        self
    }

    /// Build the tree rules
    pub fn build(self) -> TreeRules {
        TreeRules {
            max_depth: self.max_depth,
            offset_bound: self.offset_bound,
            required_checks: self.required_checks,
        }
    }
}

impl Default for TreeRulesBuilder {
    fn default() -> Self {
        Self::new()
    }
}
