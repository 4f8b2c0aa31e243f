//! Comparison report types.
//!
//! A run either matches (every aligned record pair is structurally equal) or
//! mismatches with one or more [`Divergence`]s. Load and alignment failures
//! are errors, not reports, and live in `tandem-capture`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::diff::TreeDiff;
use crate::enums::{CompareMode, DiffCategory, RecordField};
use crate::record::Provenance;

/// One diverging field of one aligned record pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Divergence {
    /// Flat record index shared by both corpora.
    pub index: usize,
    pub field: RecordField,
    pub baseline: Provenance,
    pub candidate: Provenance,
    /// Differences within the field; exactly one in fail-fast mode.
    pub diffs: Vec<TreeDiff>,
}

/// Number of tree differences per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryCounts {
    pub schema_change: usize,
    pub dynamic_noise: usize,
    pub data_update: usize,
}

impl CategoryCounts {
    /// Count every tree difference of every divergence.
    #[must_use]
    pub fn tally(divergences: &[Divergence]) -> Self {
        let mut counts = Self::default();
        for diff in divergences.iter().flat_map(|d| &d.diffs) {
            match diff.category {
                DiffCategory::SchemaChange => counts.schema_change += 1,
                DiffCategory::DynamicNoise => counts.dynamic_noise += 1,
                DiffCategory::DataUpdate => counts.data_update += 1,
            }
        }
        counts
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.schema_change + self.dynamic_noise + self.data_update
    }
}

/// Outcome of comparing two aligned corpora.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Report {
    /// Every record pair is structurally equal.
    Match { records_compared: usize },

    /// At least one record pair diverges.
    Mismatch {
        mode: CompareMode,
        /// Pairs examined before the run stopped.
        records_compared: usize,
        /// Sorted by `(index, field)`.
        divergences: Vec<Divergence>,
        summary: CategoryCounts,
    },
}

impl Report {
    /// Build a report from the divergences a walk produced.
    #[must_use]
    pub fn from_divergences(
        mode: CompareMode,
        records_compared: usize,
        divergences: Vec<Divergence>,
    ) -> Self {
        if divergences.is_empty() {
            return Self::Match { records_compared };
        }
        let summary = CategoryCounts::tally(&divergences);
        Self::Mismatch {
            mode,
            records_compared,
            divergences,
            summary,
        }
    }

    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }

    #[must_use]
    pub const fn records_compared(&self) -> usize {
        match self {
            Self::Match { records_compared } | Self::Mismatch { records_compared, .. } => {
                *records_compared
            }
        }
    }

    #[must_use]
    pub fn divergences(&self) -> &[Divergence] {
        match self {
            Self::Match { .. } => &[],
            Self::Mismatch { divergences, .. } => divergences,
        }
    }

    #[must_use]
    pub fn first_divergence(&self) -> Option<&Divergence> {
        self.divergences().first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffDetail;
    use crate::path::TreePath;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn provenance(key: &str) -> Provenance {
        Provenance {
            session_index: 0,
            session_key: key.into(),
            record_index: 0,
        }
    }

    fn divergence(category: DiffCategory) -> Divergence {
        Divergence {
            index: 0,
            field: RecordField::Response,
            baseline: provenance("s1"),
            candidate: provenance("s1"),
            diffs: vec![TreeDiff {
                path: TreePath::root().key("id"),
                detail: DiffDetail::ValueMismatch {
                    expected: json!(1),
                    actual: json!(2),
                },
                category,
            }],
        }
    }

    #[test]
    fn no_divergences_is_a_match() {
        let report = Report::from_divergences(CompareMode::CollectAll, 4, Vec::new());
        assert!(report.is_match());
        assert_eq!(report.records_compared(), 4);
        assert!(report.first_divergence().is_none());
    }

    #[test]
    fn mismatch_tallies_categories() {
        let report = Report::from_divergences(
            CompareMode::CollectAll,
            3,
            vec![
                divergence(DiffCategory::DataUpdate),
                divergence(DiffCategory::DynamicNoise),
                divergence(DiffCategory::DataUpdate),
            ],
        );
        let Report::Mismatch { summary, .. } = &report else {
            panic!("expected mismatch");
        };
        assert_eq!(summary.data_update, 2);
        assert_eq!(summary.dynamic_noise, 1);
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn outcome_tag_is_serialized() {
        let report = Report::Match {
            records_compared: 2,
        };
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({"outcome": "match", "records_compared": 2})
        );
    }
}
