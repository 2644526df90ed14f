//! Tree rules checked with Validation.

use crate::core::DecisionTree;
use crate::validate::violations::TreeViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Largest real-world UTC offset, 14 hours, in minutes.
pub const DEFAULT_OFFSET_BOUND: i32 = 14 * 60;

/// Type alias for custom tree checks
pub type TreeCheck =
    Box<dyn Fn(&DecisionTree) -> Validation<(), NonEmptyVec<TreeViolation>> + Send + Sync>;

/// Rules a tree must satisfy before it is trusted.
/// Uses Validation to accumulate ALL violations.
pub struct TreeRules {
    pub(crate) max_depth: Option<usize>,
    pub(crate) offset_bound: i32,
    pub(crate) required_checks: Vec<TreeCheck>,
}

impl Default for TreeRules {
    fn default() -> Self {
        Self {
            max_depth: None,
            offset_bound: DEFAULT_OFFSET_BOUND,
            required_checks: Vec::new(),
        }
    }
}

impl TreeRules {
    /// Check every rule, accumulating ALL violations.
    /// Returns Validation::Success(()) if the tree passes.
    pub fn check(&self, tree: &DecisionTree) -> Validation<(), NonEmptyVec<TreeViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<TreeViolation>>> =
            vec![Validation::success(())];

        for violation in self.structural_violations(tree) {
            checks.push(Validation::fail(violation));
        }

        if let Some(max) = self.max_depth {
            let depth = tree.max_depth();
            if depth > max {
                checks.push(Validation::fail(TreeViolation::DepthExceeded { max, depth }));
            }
        }

        for check_fn in &self.required_checks {
            checks.push(check_fn(tree));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Same as [`check`](Self::check), flattened into a plain list.
    pub fn violations(&self, tree: &DecisionTree) -> Vec<TreeViolation> {
        match self.check(tree) {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    pub fn offset_bound(&self) -> i32 {
        self.offset_bound
    }

    fn structural_violations(&self, tree: &DecisionTree) -> Vec<TreeViolation> {
        let mut found = Vec::new();
        let mut stack = vec![(tree, 0usize)];

        while let Some((node, depth)) = stack.pop() {
            match node {
                DecisionTree::Leaf(value) => {
                    if value.is_empty() {
                        found.push(TreeViolation::EmptyLeaf { depth });
                    }
                }
                DecisionTree::Branch(branch) => {
                    if branch.children.is_empty() {
                        found.push(TreeViolation::EmptyChildren { depth });
                    }
                    for (&offset, child) in &branch.children {
                        if offset.abs() > self.offset_bound {
                            found.push(TreeViolation::OffsetOutOfBounds {
                                offset,
                                bound: self.offset_bound,
                                depth,
                            });
                        }
                        stack.push((child, depth + 1));
                    }
                }
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TestPoint;
    use crate::validate::builder::TreeRulesBuilder;

    fn point() -> TestPoint {
        TestPoint::wall(2000, 1, 1, 0, 27).unwrap()
    }

    fn sound_tree() -> DecisionTree {
        DecisionTree::branch(
            point(),
            [
                (-300, DecisionTree::leaf("America/New_York")),
                (840, DecisionTree::leaf("Pacific/Kiritimati")),
            ],
        )
    }

    #[test]
    fn sound_tree_passes_default_rules() {
        let result = TreeRules::default().check(&sound_tree());
        assert!(result.is_success());
    }

    #[test]
    fn bare_leaf_passes() {
        assert!(TreeRules::default()
            .check(&DecisionTree::leaf("UTC"))
            .is_success());
    }

    #[test]
    fn check_accumulates_all_violations() {
        let tree = DecisionTree::branch(
            point(),
            [
                (900, DecisionTree::leaf("")),
                (0, DecisionTree::branch(point(), [])),
            ],
        );
        let rules = TreeRulesBuilder::new()
            .max_depth(1)
            .require_pred(|_tree| false, "always fails".to_string())
            .build();

        match rules.check(&tree) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 5);
                assert!(errors.iter().any(|e| matches!(
                    e,
                    TreeViolation::OffsetOutOfBounds {
                        offset: 900,
                        depth: 0,
                        ..
                    }
                )));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, TreeViolation::EmptyLeaf { depth: 1 })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, TreeViolation::EmptyChildren { depth: 1 })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, TreeViolation::DepthExceeded { max: 1, depth: 2 })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, TreeViolation::CustomCheckFailed { .. })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn negative_offsets_are_bounded_too() {
        let tree = DecisionTree::branch(point(), [(-841, DecisionTree::leaf("Nowhere"))]);
        let violations = TreeRules::default().violations(&tree);

        assert_eq!(
            violations,
            vec![TreeViolation::OffsetOutOfBounds {
                offset: -841,
                bound: DEFAULT_OFFSET_BOUND,
                depth: 0,
            }]
        );
    }

    #[test]
    fn custom_bound_is_respected() {
        let rules = TreeRulesBuilder::new().offset_bound(60).build();
        assert_eq!(rules.offset_bound(), 60);
        assert!(rules.check(&sound_tree()).is_failure());
    }

    #[test]
    fn custom_validation_check_works() {
        let rules = TreeRulesBuilder::new()
            .require(|tree: &DecisionTree| {
                if tree.leaves().contains(&"Etc/Unknown") {
                    Validation::fail(TreeViolation::CustomCheckFailed {
                        message: "placeholder zone in tree".to_string(),
                    })
                } else {
                    Validation::success(())
                }
            })
            .build();

        assert!(rules.check(&sound_tree()).is_success());
        assert!(rules
            .check(&DecisionTree::leaf("Etc/Unknown"))
            .is_failure());
    }

    #[test]
    fn violations_is_empty_for_sound_tree() {
        assert!(TreeRules::default().violations(&sound_tree()).is_empty());
    }
}
