use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;
use tandem_compare::render::{describe_detail, describe_provenance, render_text};
use tandem_core::report::Report;
use tandem_core::summary::CorpusSummary;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// A command result that can be printed in every output format.
pub trait Render: Serialize {
    /// Human-readable form.
    fn text(&self) -> String;

    /// Column headers and rows for `--format table`.
    fn table(&self) -> (Vec<&'static str>, Vec<Vec<String>>);
}

/// Render a command result to a string in the requested format.
pub fn render<T: Render>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(value.text().trim_end().to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => {
            let prefs = ui::prefs();
            let (headers, rows) = value.table();
            Ok(table::render_table(
                &headers,
                &rows,
                table::TableOptions {
                    max_width: prefs.term_width,
                    color: prefs.table_color,
                },
            ))
        }
    }
}

/// Print a command result in the requested format.
pub fn output<T: Render>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

impl Render for Report {
    fn text(&self) -> String {
        render_text(self)
    }

    fn table(&self) -> (Vec<&'static str>, Vec<Vec<String>>) {
        match self {
            Self::Match { records_compared } => (
                vec!["outcome", "records_compared"],
                vec![vec!["match".to_string(), records_compared.to_string()]],
            ),
            Self::Mismatch { divergences, .. } => {
                let rows = divergences
                    .iter()
                    .flat_map(|divergence| {
                        divergence.diffs.iter().map(move |diff| {
                            vec![
                                divergence.index.to_string(),
                                divergence.field.to_string(),
                                describe_provenance(&divergence.baseline),
                                describe_provenance(&divergence.candidate),
                                diff.path.to_string(),
                                diff.detail.tag().to_string(),
                                diff.category.to_string(),
                                describe_detail(&diff.detail),
                            ]
                        })
                    })
                    .collect();
                (
                    vec![
                        "index",
                        "field",
                        "baseline",
                        "candidate",
                        "path",
                        "diff",
                        "category",
                        "detail",
                    ],
                    rows,
                )
            }
        }
    }
}

impl Render for CorpusSummary {
    fn text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "corpus {}", self.root.display());
        for session in &self.sessions {
            let _ = writeln!(
                out,
                "  {}: {} record(s) [{}] {}",
                session.key,
                session.records,
                kinds_cell(&session.kinds),
                session.artifact.display()
            );
        }
        let _ = writeln!(
            out,
            "total: {} record(s) in {} session(s)",
            self.total_records,
            self.sessions.len()
        );
        out
    }

    fn table(&self) -> (Vec<&'static str>, Vec<Vec<String>>) {
        let rows = self
            .sessions
            .iter()
            .map(|session| {
                vec![
                    session.key.clone(),
                    session.records.to_string(),
                    kinds_cell(&session.kinds),
                    session.artifact.display().to_string(),
                ]
            })
            .collect();
        (vec!["session", "records", "kinds", "artifact"], rows)
    }
}

/// JSON Schema documents print as JSON even in text mode.
impl Render for Value {
    fn text(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_string())
    }

    fn table(&self) -> (Vec<&'static str>, Vec<Vec<String>>) {
        let rows = match self {
            Self::Object(map) => map
                .iter()
                .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
                .collect(),
            other => vec![vec![String::new(), value_to_cell(other)]],
        };
        (vec!["key", "value"], rows)
    }
}

fn kinds_cell(kinds: &std::collections::BTreeMap<String, usize>) -> String {
    kinds
        .iter()
        .map(|(kind, count)| format!("{kind}={count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::String(v) => v.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tandem_core::diff::{DiffDetail, TreeDiff};
    use tandem_core::enums::{CompareMode, DiffCategory, RecordField};
    use tandem_core::path::TreePath;
    use tandem_core::record::Provenance;
    use tandem_core::report::Divergence;
    use tandem_core::summary::SessionSummary;

    use super::*;

    fn mismatch() -> Report {
        let provenance = Provenance {
            session_index: 1,
            session_key: "s2".into(),
            record_index: 0,
        };
        Report::from_divergences(
            CompareMode::FailFast,
            2,
            vec![Divergence {
                index: 1,
                field: RecordField::Response,
                baseline: provenance.clone(),
                candidate: provenance,
                diffs: vec![TreeDiff {
                    path: TreePath::root().key("status"),
                    detail: DiffDetail::ValueMismatch {
                        expected: json!("pending"),
                        actual: json!("completed"),
                    },
                    category: DiffCategory::DataUpdate,
                }],
            }],
        )
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&mismatch(), OutputFormat::Json).expect("json render should work");
        let parsed: Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["outcome"], "mismatch");
        assert_eq!(parsed["divergences"][0]["diffs"][0]["path"], "status");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&mismatch(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        let parsed: Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["summary"]["data_update"], 1);
    }

    #[test]
    fn report_table_has_one_row_per_diff() {
        let (headers, rows) = mismatch().table();
        assert_eq!(headers.len(), rows[0].len());
        assert_eq!(
            rows,
            vec![vec![
                "1".to_string(),
                "response".to_string(),
                "s2#0".to_string(),
                "s2#0".to_string(),
                "status".to_string(),
                "value_mismatch".to_string(),
                "data_update".to_string(),
                r#"expected "pending", actual "completed""#.to_string(),
            ]]
        );
    }

    #[test]
    fn text_render_has_no_trailing_newline() {
        let out = render(
            &Report::Match {
                records_compared: 4,
            },
            OutputFormat::Text,
        )
        .unwrap();
        assert_eq!(out, "MATCH: 4 record pair(s) equivalent");
    }

    #[test]
    fn summary_text_lists_sessions() {
        let summary = CorpusSummary {
            root: PathBuf::from("captures"),
            sessions: vec![SessionSummary {
                key: "test-set-0".into(),
                artifact: PathBuf::from("captures/test-set-0/mocks.yaml"),
                records: 3,
                kinds: BTreeMap::from([("Http".to_string(), 2), ("Postgres".to_string(), 1)]),
            }],
            total_records: 3,
        };
        let text = summary.text();
        assert!(text.contains("test-set-0: 3 record(s) [Http=2, Postgres=1]"), "{text}");
        assert!(text.ends_with("total: 3 record(s) in 1 session(s)\n"));

        let (headers, rows) = summary.table();
        assert_eq!(headers, vec!["session", "records", "kinds", "artifact"]);
        assert_eq!(rows[0][1], "3");
    }
}
