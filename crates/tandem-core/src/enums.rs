//! Comparison modes, record fields, node kinds and diff categories.
//!
//! All enums serialize in `snake_case` except [`CompareMode`], which uses the
//! `kebab-case` spelling accepted on the command line.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ---------------------------------------------------------------------------
// CompareMode
// ---------------------------------------------------------------------------

/// How the reporter walks the aligned record pairs.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum CompareMode {
    /// Stop at the first record pair that diverges.
    #[default]
    FailFast,
    /// Compare every pair and report all divergences.
    CollectAll,
}

impl CompareMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FailFast => "fail-fast",
            Self::CollectAll => "collect-all",
        }
    }

    #[must_use]
    pub const fn is_fail_fast(self) -> bool {
        matches!(self, Self::FailFast)
    }
}

impl fmt::Display for CompareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RecordField
// ---------------------------------------------------------------------------

/// Which part of an interaction record diverged.
///
/// The declaration order is the order fields are examined within one pair.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Kind,
    Request,
    Response,
}

impl RecordField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kind => "kind",
            Self::Request => "request",
            Self::Response => "response",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NodeKind
// ---------------------------------------------------------------------------

/// Dynamic kind of a payload tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Sequence,
    Mapping,
}

impl NodeKind {
    /// Classify a payload tree node.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Mapping,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DiffCategory
// ---------------------------------------------------------------------------

/// Coarse classification of a tree difference.
///
/// ```text
/// type / key / length difference  → schema_change
/// value looks generated (uuid, …) → dynamic_noise
/// any other value difference      → data_update
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiffCategory {
    SchemaChange,
    DynamicNoise,
    DataUpdate,
}

impl DiffCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SchemaChange => "schema_change",
            Self::DynamicNoise => "dynamic_noise",
            Self::DataUpdate => "data_update",
        }
    }
}

impl fmt::Display for DiffCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// One of the two corpora under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Baseline,
    Candidate,
}

impl Side {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Candidate => "candidate",
        }
    }

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Baseline => Self::Candidate,
            Self::Candidate => Self::Baseline,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(null), NodeKind::Null)]
    #[case(json!(true), NodeKind::Bool)]
    #[case(json!(1.5), NodeKind::Number)]
    #[case(json!("x"), NodeKind::String)]
    #[case(json!([1, 2]), NodeKind::Sequence)]
    #[case(json!({"a": 1}), NodeKind::Mapping)]
    fn node_kind_of(#[case] value: Value, #[case] expected: NodeKind) {
        assert_eq!(NodeKind::of(&value), expected);
    }

    #[test]
    fn compare_mode_uses_kebab_case() {
        assert_eq!(
            serde_json::to_string(&CompareMode::CollectAll).unwrap(),
            "\"collect-all\""
        );
        let mode: CompareMode = serde_json::from_str("\"fail-fast\"").unwrap();
        assert_eq!(mode, CompareMode::FailFast);
        assert_eq!(CompareMode::default(), CompareMode::FailFast);
    }

    #[test]
    fn record_fields_order_kind_request_response() {
        let mut fields = vec![RecordField::Response, RecordField::Kind, RecordField::Request];
        fields.sort();
        assert_eq!(
            fields,
            vec![RecordField::Kind, RecordField::Request, RecordField::Response]
        );
    }

    #[test]
    fn side_other_flips() {
        assert_eq!(Side::Baseline.other(), Side::Candidate);
        assert_eq!(Side::Candidate.other(), Side::Baseline);
    }
}
