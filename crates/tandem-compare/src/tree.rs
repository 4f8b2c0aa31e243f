//! Structural comparison of two payload trees.
//!
//! Traversal order is fixed: mapping keys in byte order, sequence elements
//! by ascending index. Within one mapping, missing keys are reported before
//! any difference below a shared key; a sequence length difference is
//! reported before its elements are walked.

use std::collections::BTreeSet;
use std::ops::ControlFlow;

use serde_json::{Map, Number, Value};
use tandem_core::diff::{DiffDetail, TreeDiff};
use tandem_core::enums::{CompareMode, NodeKind, Side};
use tandem_core::path::TreePath;

use crate::noise;
use crate::selector::PathPattern;

type Walk = ControlFlow<()>;

/// Compares an expected (baseline) tree against an actual (candidate) tree.
#[derive(Debug, Clone)]
pub struct StructuralComparator {
    mode: CompareMode,
    classify_noise: bool,
    ignore: Vec<PathPattern>,
}

impl Default for StructuralComparator {
    fn default() -> Self {
        Self::new(CompareMode::default())
    }
}

impl StructuralComparator {
    #[must_use]
    pub const fn new(mode: CompareMode) -> Self {
        Self {
            mode,
            classify_noise: true,
            ignore: Vec::new(),
        }
    }

    /// Skip differences at or below any of `patterns`.
    #[must_use]
    pub fn with_ignore(mut self, patterns: Vec<PathPattern>) -> Self {
        self.ignore = patterns;
        self
    }

    #[must_use]
    pub const fn with_noise_classification(mut self, enabled: bool) -> Self {
        self.classify_noise = enabled;
        self
    }

    /// All differences between the two trees, in traversal order. Empty
    /// means equal. In fail-fast mode at most one difference is returned.
    #[must_use]
    pub fn compare(&self, expected: &Value, actual: &Value) -> Vec<TreeDiff> {
        let mut diffs = Vec::new();
        let _ = self.walk(&TreePath::root(), expected, actual, &mut diffs);
        diffs
    }

    fn is_ignored(&self, path: &TreePath) -> bool {
        self.ignore.iter().any(|pattern| pattern.covers(path))
    }

    fn walk(&self, path: &TreePath, expected: &Value, actual: &Value, out: &mut Vec<TreeDiff>) -> Walk {
        if self.is_ignored(path) {
            return Walk::Continue(());
        }

        match (expected, actual) {
            (Value::Object(e), Value::Object(a)) => self.walk_mapping(path, e, a, out),
            (Value::Array(e), Value::Array(a)) => self.walk_sequence(path, e, a, out),
            _ => {
                let (expected_kind, actual_kind) = (NodeKind::of(expected), NodeKind::of(actual));
                if expected_kind != actual_kind {
                    self.record(
                        path.clone(),
                        DiffDetail::TypeMismatch {
                            expected: expected_kind,
                            actual: actual_kind,
                        },
                        out,
                    )
                } else if scalars_equal(expected, actual) {
                    Walk::Continue(())
                } else {
                    self.record(
                        path.clone(),
                        DiffDetail::ValueMismatch {
                            expected: expected.clone(),
                            actual: actual.clone(),
                        },
                        out,
                    )
                }
            }
        }
    }

    fn walk_mapping(
        &self,
        path: &TreePath,
        expected: &Map<String, Value>,
        actual: &Map<String, Value>,
        out: &mut Vec<TreeDiff>,
    ) -> Walk {
        let keys: BTreeSet<&str> = expected
            .keys()
            .chain(actual.keys())
            .map(String::as_str)
            .collect();

        for &key in &keys {
            let missing = match (expected.get(key), actual.get(key)) {
                (Some(present), None) => Some((Side::Candidate, present)),
                (None, Some(present)) => Some((Side::Baseline, present)),
                _ => None,
            };
            if let Some((missing_from, present)) = missing {
                self.record(
                    path.key(key),
                    DiffDetail::KeyMissing {
                        key: key.to_string(),
                        missing_from,
                        present: present.clone(),
                    },
                    out,
                )?;
            }
        }

        for &key in &keys {
            if let (Some(e), Some(a)) = (expected.get(key), actual.get(key)) {
                self.walk(&path.key(key), e, a, out)?;
            }
        }

        Walk::Continue(())
    }

    fn walk_sequence(
        &self,
        path: &TreePath,
        expected: &[Value],
        actual: &[Value],
        out: &mut Vec<TreeDiff>,
    ) -> Walk {
        if expected.len() != actual.len() {
            self.record(
                path.clone(),
                DiffDetail::LengthMismatch {
                    expected: expected.len(),
                    actual: actual.len(),
                },
                out,
            )?;
        }

        for (index, (e, a)) in expected.iter().zip(actual).enumerate() {
            self.walk(&path.index(index), e, a, out)?;
        }

        Walk::Continue(())
    }

    fn record(&self, path: TreePath, detail: DiffDetail, out: &mut Vec<TreeDiff>) -> Walk {
        if self.is_ignored(&path) {
            return Walk::Continue(());
        }

        let category = noise::categorize(&detail, self.classify_noise);
        out.push(TreeDiff {
            path,
            detail,
            category,
        });

        if self.mode.is_fail_fast() {
            Walk::Break(())
        } else {
            Walk::Continue(())
        }
    }
}

/// Scalars of the same kind. Numbers compare by value: integers exactly,
/// anything involving a float as `f64`, so `1` equals `1.0`.
fn scalars_equal(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(e), Value::Number(a)) => numbers_equal(e, a),
        _ => expected == actual,
    }
}

#[allow(clippy::float_cmp)]
fn numbers_equal(expected: &Number, actual: &Number) -> bool {
    match (as_integer(expected), as_integer(actual)) {
        (Some(e), Some(a)) => e == a,
        _ => expected.as_f64() == actual.as_f64(),
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}
