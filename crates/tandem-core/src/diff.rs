//! Path-level differences between two payload trees.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::{DiffCategory, NodeKind, Side};
use crate::path::TreePath;

/// What differs at a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiffDetail {
    /// The nodes are of different kinds (e.g. scalar vs mapping).
    TypeMismatch { expected: NodeKind, actual: NodeKind },

    /// Two scalars of the same kind hold different values.
    ValueMismatch { expected: Value, actual: Value },

    /// A mapping key exists on one side only.
    KeyMissing {
        key: String,
        /// The side that lacks the key.
        missing_from: Side,
        /// The value on the side that has it.
        present: Value,
    },

    /// Two sequences have different lengths.
    LengthMismatch { expected: usize, actual: usize },
}

impl DiffDetail {
    /// Short tag used in human-readable output.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::ValueMismatch { .. } => "value_mismatch",
            Self::KeyMissing { .. } => "key_missing",
            Self::LengthMismatch { .. } => "length_mismatch",
        }
    }

    /// Whether this difference changes the shape of the tree.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        !matches!(self, Self::ValueMismatch { .. })
    }
}

/// A single difference inside one payload tree pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TreeDiff {
    /// Location of the difference. For `KeyMissing` this is the path of the
    /// missing key itself.
    #[schemars(with = "String")]
    pub path: TreePath,
    pub detail: DiffDetail,
    pub category: DiffCategory,
}
