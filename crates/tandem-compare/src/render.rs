//! Plain-text rendering of reports.

use std::fmt::Write as _;

use tandem_core::diff::{DiffDetail, TreeDiff};
use tandem_core::record::Provenance;
use tandem_core::report::{Divergence, Report};

/// The detail of a difference without its path, e.g.
/// `expected "pending", actual "completed"`.
#[must_use]
pub fn describe_detail(detail: &DiffDetail) -> String {
    match detail {
        DiffDetail::TypeMismatch { expected, actual } => {
            format!("expected {expected}, actual {actual}")
        }
        DiffDetail::ValueMismatch { expected, actual } => {
            format!("expected {expected}, actual {actual}")
        }
        DiffDetail::KeyMissing {
            key,
            missing_from,
            present,
        } => format!(
            "key '{key}' missing from {missing_from}, {} has {present}",
            missing_from.other()
        ),
        DiffDetail::LengthMismatch { expected, actual } => {
            format!("expected {expected} elements, actual {actual}")
        }
    }
}

/// One line describing a tree difference, e.g.
/// `status: value_mismatch, expected "pending", actual "completed" [data_update]`.
#[must_use]
pub fn describe_diff(diff: &TreeDiff) -> String {
    format!(
        "{}: {}, {} [{}]",
        diff.path,
        diff.detail.tag(),
        describe_detail(&diff.detail),
        diff.category
    )
}

/// `session#record` for one side of a pair.
#[must_use]
pub fn describe_provenance(provenance: &Provenance) -> String {
    format!("{}#{}", provenance.session_key, provenance.record_index)
}

fn write_divergence(out: &mut String, divergence: &Divergence) {
    let _ = writeln!(
        out,
        "record {} {}: baseline {} / candidate {}",
        divergence.index,
        divergence.field,
        describe_provenance(&divergence.baseline),
        describe_provenance(&divergence.candidate),
    );
    for diff in &divergence.diffs {
        let _ = writeln!(out, "  {}", describe_diff(diff));
    }
}

/// Multi-line human-readable report.
#[must_use]
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    match report {
        Report::Match { records_compared } => {
            let _ = writeln!(out, "MATCH: {records_compared} record pair(s) equivalent");
        }
        Report::Mismatch {
            mode,
            records_compared,
            divergences,
            summary,
        } => {
            let _ = writeln!(
                out,
                "MISMATCH ({mode}): {} divergence(s) after {records_compared} record pair(s)",
                divergences.len()
            );
            for divergence in divergences {
                write_divergence(&mut out, divergence);
            }
            let _ = writeln!(
                out,
                "summary: {} diff(s), schema_change={} dynamic_noise={} data_update={}",
                summary.total(),
                summary.schema_change,
                summary.dynamic_noise,
                summary.data_update
            );
        }
    }
    out
}
