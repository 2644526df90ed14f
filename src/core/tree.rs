//! Decision tree data model.
//!
//! A tree is an owned, immutable value. Each child is owned by exactly one
//! parent, so a tree is finite and acyclic by construction and every walk
//! terminates after at most `max_depth()` probes.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors produced while reading a test point from its wire form.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TestPointError {
    #[error("epoch milliseconds {0} out of range")]
    MillisOutOfRange(i64),

    #[error("epoch milliseconds {0} are not a whole number")]
    FractionalMillis(f64),

    #[error("unrecognized test point '{0}', expected RFC 3339 or YYYY-MM-DDTHH:MM:SS")]
    Unrecognized(String),
}

/// The moment a branch probes.
///
/// `Instant` is an absolute point on the UTC timeline. `Wall` is a local
/// wall-clock reading, interpreted in whatever zone is being probed, which is
/// how generated trees name their probes (`"2000-01-01T00:27:00"`).
///
/// # Example
///
/// ```rust
/// use tzsniff::core::TestPoint;
///
/// let wall: TestPoint = serde_json::from_str("\"2000-01-01T00:27:00\"").unwrap();
/// assert!(matches!(wall, TestPoint::Wall(_)));
///
/// let instant: TestPoint = serde_json::from_str("946684800000").unwrap();
/// assert!(matches!(instant, TestPoint::Instant(_)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTestPoint", into = "RawTestPoint")]
pub enum TestPoint {
    Instant(DateTime<Utc>),
    Wall(NaiveDateTime),
}

impl TestPoint {
    /// Absolute instant from epoch milliseconds.
    pub fn from_millis(millis: i64) -> Result<Self, TestPointError> {
        Utc.timestamp_millis_opt(millis)
            .single()
            .map(Self::Instant)
            .ok_or(TestPointError::MillisOutOfRange(millis))
    }

    /// Wall-clock reading, `None` if the fields do not form a valid date time.
    pub fn wall(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        chrono::NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .map(Self::Wall)
    }
}

impl fmt::Display for TestPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instant(at) => f.write_str(&at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Wall(local) => write!(f, "{}", local.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

impl std::str::FromStr for TestPoint {
    type Err = TestPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(at) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::Instant(at.with_timezone(&Utc)));
        }
        s.parse::<NaiveDateTime>()
            .map(Self::Wall)
            .map_err(|_| TestPointError::Unrecognized(s.to_string()))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawTestPoint {
    Millis(i64),
    Float(f64),
    Text(String),
}

impl TryFrom<RawTestPoint> for TestPoint {
    type Error = TestPointError;

    fn try_from(raw: RawTestPoint) -> Result<Self, Self::Error> {
        match raw {
            RawTestPoint::Millis(millis) => Self::from_millis(millis),
            RawTestPoint::Float(millis) => {
                if millis.fract() != 0.0 || !millis.is_finite() {
                    return Err(TestPointError::FractionalMillis(millis));
                }
                // Whole values beyond i64 are far outside chrono's range anyway.
                if millis.abs() >= i64::MAX as f64 {
                    return Err(TestPointError::MillisOutOfRange(millis as i64));
                }
                Self::from_millis(millis as i64)
            }
            RawTestPoint::Text(text) => text.parse(),
        }
    }
}

impl From<TestPoint> for RawTestPoint {
    fn from(point: TestPoint) -> Self {
        RawTestPoint::Text(point.to_string())
    }
}

/// A branching decision point keyed by UTC offset in minutes.
///
/// Keys are minutes ahead of UTC: `+60` for UTC+1, `-300` for UTC-5.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    /// Moment whose offset selects the child.
    pub test_point: TestPoint,
    /// Sparse mapping from offset to subtree.
    pub children: BTreeMap<i32, DecisionTree>,
}

/// A node of a time zone decision tree.
///
/// On the wire a leaf is a bare string and a branch is an object with
/// `testPoint` and `children`:
///
/// ```rust
/// use tzsniff::core::DecisionTree;
///
/// let tree = DecisionTree::from_json(r#"{
///     "testPoint": "2000-07-01T00:27:00",
///     "children": { "60": "Europe/London", "0": "Atlantic/Reykjavik" }
/// }"#).unwrap();
///
/// assert_eq!(tree.max_depth(), 1);
/// assert_eq!(tree.leaves(), vec!["Atlantic/Reykjavik", "Europe/London"]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DecisionTree {
    Leaf(String),
    Branch(Branch),
}

impl DecisionTree {
    pub fn leaf(value: impl Into<String>) -> Self {
        Self::Leaf(value.into())
    }

    pub fn branch<I>(test_point: TestPoint, children: I) -> Self
    where
        I: IntoIterator<Item = (i32, DecisionTree)>,
    {
        Self::Branch(Branch {
            test_point,
            children: children.into_iter().collect(),
        })
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Number of probes on the longest path. A leaf has depth 0.
    pub fn max_depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Branch(branch) => {
                1 + branch
                    .children
                    .values()
                    .map(DecisionTree::max_depth)
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// All leaf values, depth first in ascending key order.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Self::Leaf(value) => out.push(value.as_str()),
                Self::Branch(branch) => stack.extend(branch.children.values().rev()),
            }
        }
        out
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Compact JSON, the form shipped to clients.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// Hand-written so that integer child keys are read straight from the
// underlying map; buffering through an untagged enum loses that.
impl<'de> Deserialize<'de> for DecisionTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TreeVisitor)
    }
}

struct TreeVisitor;

impl<'de> Visitor<'de> for TreeVisitor {
    type Value = DecisionTree;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a time zone name or an object with testPoint and children")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(DecisionTree::Leaf(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(DecisionTree::Leaf(value))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut test_point = None;
        let mut children = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "testPoint" => {
                    if test_point.is_some() {
                        return Err(de::Error::duplicate_field("testPoint"));
                    }
                    test_point = Some(map.next_value::<TestPoint>()?);
                }
                "children" => {
                    if children.is_some() {
                        return Err(de::Error::duplicate_field("children"));
                    }
                    children = Some(map.next_value::<BTreeMap<i32, DecisionTree>>()?);
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        let test_point = test_point.ok_or_else(|| de::Error::missing_field("testPoint"))?;
        let children = children.ok_or_else(|| de::Error::missing_field("children"))?;
        Ok(DecisionTree::Branch(Branch {
            test_point,
            children,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan_2000() -> TestPoint {
        TestPoint::wall(2000, 1, 1, 0, 27).unwrap()
    }

    #[test]
    fn leaf_parses_from_bare_string() {
        let tree = DecisionTree::from_json("\"Europe/Paris\"").unwrap();
        assert_eq!(tree, DecisionTree::leaf("Europe/Paris"));
        assert!(tree.is_leaf());
        assert_eq!(tree.max_depth(), 0);
    }

    #[test]
    fn generated_tree_format_parses() {
        let json = r#"{
            "testPoint": "2000-01-01T00:27:00",
            "children": {
                "-300": {
                    "testPoint": "2000-07-01T00:27:00",
                    "children": { "-240": "America/New_York", "-300": "America/Panama" }
                },
                "60": "Europe/Paris"
            }
        }"#;

        let tree = DecisionTree::from_json(json).unwrap();
        assert_eq!(tree.max_depth(), 2);
        assert_eq!(
            tree.leaves(),
            vec!["America/Panama", "America/New_York", "Europe/Paris"]
        );

        match &tree {
            DecisionTree::Branch(branch) => {
                assert_eq!(branch.test_point, jan_2000());
                assert_eq!(branch.children.len(), 2);
                assert!(branch.children.contains_key(&-300));
            }
            DecisionTree::Leaf(_) => panic!("Expected branch"),
        }
    }

    #[test]
    fn epoch_millis_test_point_is_instant() {
        let tree =
            DecisionTree::from_json(r#"{"testPoint": 946684800000, "children": {"0": "UTC"}}"#)
                .unwrap();

        match tree {
            DecisionTree::Branch(branch) => {
                let expected = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
                assert_eq!(branch.test_point, TestPoint::Instant(expected));
            }
            DecisionTree::Leaf(_) => panic!("Expected branch"),
        }
    }

    #[test]
    fn float_epoch_millis_are_accepted_when_whole() {
        let tree =
            DecisionTree::from_json(r#"{"testPoint": 946684800000.0, "children": {"0": "UTC"}}"#)
                .unwrap();

        match tree {
            DecisionTree::Branch(branch) => {
                let expected = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
                assert_eq!(branch.test_point, TestPoint::Instant(expected));
            }
            DecisionTree::Leaf(_) => panic!("Expected branch"),
        }

        assert!(DecisionTree::from_json(
            r#"{"testPoint": 946684800000.5, "children": {"0": "UTC"}}"#
        )
        .is_err());
        assert!(DecisionTree::from_json(r#"{"testPoint": 1e300, "children": {"0": "UTC"}}"#)
            .is_err());
    }

    #[test]
    fn rfc3339_test_point_is_normalized_to_utc() {
        let point: TestPoint = "2000-01-01T02:00:00+02:00".parse().unwrap();
        let expected = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(point, TestPoint::Instant(expected));
        assert_eq!(point.to_string(), "2000-01-01T00:00:00Z");
    }

    #[test]
    fn wall_test_point_displays_like_generator_output() {
        assert_eq!(jan_2000().to_string(), "2000-01-01T00:27:00");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{"testPoint": "2000-01-01T00:27:00", "note": [1, 2], "children": {"0": "UTC"}}"#;
        assert!(DecisionTree::from_json(json).is_ok());
    }

    #[test]
    fn missing_children_is_rejected() {
        let err = DecisionTree::from_json(r#"{"testPoint": "2000-01-01T00:27:00"}"#).unwrap_err();
        assert!(err.to_string().contains("children"));
    }

    #[test]
    fn non_integer_offset_key_is_rejected() {
        let json = r#"{"testPoint": "2000-01-01T00:27:00", "children": {"330.5": "Asia/Kolkata"}}"#;
        assert!(DecisionTree::from_json(json).is_err());
    }

    #[test]
    fn garbage_test_point_is_rejected() {
        let json = r#"{"testPoint": "yesterday", "children": {}}"#;
        assert!(DecisionTree::from_json(json).is_err());
    }

    #[test]
    fn numbers_are_not_trees() {
        assert!(DecisionTree::from_json("42").is_err());
    }

    #[test]
    fn compact_json_matches_generator_layout() {
        let tree = DecisionTree::branch(
            jan_2000(),
            [
                (-300, DecisionTree::leaf("America/New_York")),
                (60, DecisionTree::leaf("Europe/Paris")),
            ],
        );

        assert_eq!(
            tree.to_json().unwrap(),
            r#"{"testPoint":"2000-01-01T00:27:00","children":{"-300":"America/New_York","60":"Europe/Paris"}}"#
        );
    }

    #[test]
    fn from_millis_rejects_out_of_range() {
        assert_eq!(
            TestPoint::from_millis(i64::MAX),
            Err(TestPointError::MillisOutOfRange(i64::MAX))
        );
    }
}
