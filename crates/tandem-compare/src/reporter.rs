//! Positional walk over two aligned corpora.
//!
//! Record pairs are visited by flat index. Within a pair the fields are
//! examined in [`RecordField`] order: `kind`, then `request`, then
//! `response`. Fail-fast stops at the first diverging field; collect-all
//! compares every pair on the rayon pool and sorts the divergences by
//! `(index, field)` afterwards.

use rayon::prelude::*;
use serde_json::Value;
use tandem_capture::AlignedCorpora;
use tandem_config::CompareConfig;
use tandem_core::diff::{DiffDetail, TreeDiff};
use tandem_core::enums::{CompareMode, DiffCategory, RecordField};
use tandem_core::path::TreePath;
use tandem_core::record::FlatRecord;
use tandem_core::report::{Divergence, Report};

use crate::error::CompareError;
use crate::selector::{FieldSelector, IgnoreRules};
use crate::tree::StructuralComparator;

/// Compares aligned corpora and builds a [`Report`].
#[derive(Debug, Clone)]
pub struct DivergenceReporter {
    mode: CompareMode,
    compare_kind: bool,
    selector: FieldSelector,
    request: StructuralComparator,
    response: StructuralComparator,
}

impl Default for DivergenceReporter {
    fn default() -> Self {
        Self {
            mode: CompareMode::default(),
            compare_kind: true,
            selector: FieldSelector::default(),
            request: StructuralComparator::default(),
            response: StructuralComparator::default(),
        }
    }
}

impl DivergenceReporter {
    /// # Errors
    ///
    /// Returns `CompareError::InvalidPattern` for a malformed ignore pattern.
    pub fn new(config: &CompareConfig) -> Result<Self, CompareError> {
        let rules = IgnoreRules::parse(&config.ignore)?;
        let comparator = |field| {
            StructuralComparator::new(config.mode)
                .with_noise_classification(config.classify_noise)
                .with_ignore(rules.for_field(field).to_vec())
        };

        Ok(Self {
            mode: config.mode,
            compare_kind: config.compare_kind,
            selector: FieldSelector::from_config(config),
            request: comparator(RecordField::Request),
            response: comparator(RecordField::Response),
        })
    }

    /// Compare every aligned pair and report the outcome.
    #[must_use]
    pub fn run(&self, aligned: &AlignedCorpora<'_>) -> Report {
        if aligned.is_empty() {
            tracing::warn!("both corpora are empty; nothing to compare");
            return Report::Match {
                records_compared: 0,
            };
        }

        let report = match self.mode {
            CompareMode::FailFast => self.run_fail_fast(aligned),
            CompareMode::CollectAll => self.run_collect_all(aligned),
        };

        tracing::info!(
            mode = %self.mode,
            records_compared = report.records_compared(),
            divergences = report.divergences().len(),
            first_divergence = ?report.first_divergence().map(|d| d.index),
            outcome = if report.is_match() { "match" } else { "mismatch" },
            "comparison finished"
        );
        report
    }

    fn run_fail_fast(&self, aligned: &AlignedCorpora<'_>) -> Report {
        for (baseline, candidate) in aligned.pairs() {
            let divergences = self.compare_pair(baseline, candidate);
            if !divergences.is_empty() {
                return Report::from_divergences(self.mode, baseline.index + 1, divergences);
            }
        }
        Report::from_divergences(self.mode, aligned.len(), Vec::new())
    }

    fn run_collect_all(&self, aligned: &AlignedCorpora<'_>) -> Report {
        let mut divergences: Vec<Divergence> = aligned
            .baseline()
            .par_iter()
            .zip(aligned.candidate())
            .flat_map_iter(|(baseline, candidate)| self.compare_pair(baseline, candidate))
            .collect();
        divergences.sort_by_key(|d| (d.index, d.field));

        Report::from_divergences(self.mode, aligned.len(), divergences)
    }

    /// Divergences of one record pair, in field order. Fail-fast stops at
    /// the first diverging field.
    fn compare_pair(&self, baseline: &FlatRecord<'_>, candidate: &FlatRecord<'_>) -> Vec<Divergence> {
        let mut divergences = Vec::new();

        for field in [RecordField::Kind, RecordField::Request, RecordField::Response] {
            let diffs = self.compare_field(field, baseline, candidate);
            if diffs.is_empty() {
                continue;
            }

            tracing::debug!(
                index = baseline.index,
                field = %field,
                diffs = diffs.len(),
                baseline_session = %baseline.provenance.session_key,
                candidate_session = %candidate.provenance.session_key,
                "record pair diverges"
            );
            divergences.push(Divergence {
                index: baseline.index,
                field,
                baseline: baseline.provenance.clone(),
                candidate: candidate.provenance.clone(),
                diffs,
            });

            if self.mode.is_fail_fast() {
                break;
            }
        }

        divergences
    }

    fn compare_field(
        &self,
        field: RecordField,
        baseline: &FlatRecord<'_>,
        candidate: &FlatRecord<'_>,
    ) -> Vec<TreeDiff> {
        let (expected, actual) = match field {
            RecordField::Kind => return self.compare_kinds(&baseline.record.kind, &candidate.record.kind),
            RecordField::Request => (&baseline.record.request, &candidate.record.request),
            RecordField::Response => (&baseline.record.response, &candidate.record.response),
        };
        let comparator = if field == RecordField::Request {
            &self.request
        } else {
            &self.response
        };

        comparator.compare(
            &self.selector.project(field, expected),
            &self.selector.project(field, actual),
        )
    }

    fn compare_kinds(&self, expected: &str, actual: &str) -> Vec<TreeDiff> {
        if !self.compare_kind || expected == actual {
            return Vec::new();
        }
        vec![TreeDiff {
            path: TreePath::root(),
            detail: DiffDetail::ValueMismatch {
                expected: Value::from(expected),
                actual: Value::from(actual),
            },
            category: DiffCategory::SchemaChange,
        }]
    }
}
