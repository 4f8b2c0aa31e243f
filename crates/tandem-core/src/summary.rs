//! Per-session corpus summaries for `tandem inspect`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::record::{Corpus, Session};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SessionSummary {
    pub key: String,
    pub artifact: PathBuf,
    pub records: usize,
    /// Record count per kind, sorted by kind.
    pub kinds: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CorpusSummary {
    pub root: PathBuf,
    pub sessions: Vec<SessionSummary>,
    pub total_records: usize,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        let mut kinds = BTreeMap::new();
        for record in &session.records {
            *kinds.entry(record.kind.clone()).or_insert(0) += 1;
        }
        Self {
            key: session.key.clone(),
            artifact: session.artifact.clone(),
            records: session.records.len(),
            kinds,
        }
    }
}

impl From<&Corpus> for CorpusSummary {
    fn from(corpus: &Corpus) -> Self {
        Self {
            root: corpus.root.clone(),
            sessions: corpus.sessions.iter().map(SessionSummary::from).collect(),
            total_records: corpus.record_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::InteractionRecord;
    use serde_json::{Value, json};

    fn record(kind: &str) -> InteractionRecord {
        InteractionRecord {
            kind: kind.into(),
            name: None,
            request: json!({}),
            response: json!({}),
            metadata: Value::Null,
        }
    }

    #[test]
    fn summary_counts_kinds_per_session() {
        let corpus = Corpus {
            root: PathBuf::from("keploy"),
            sessions: vec![Session {
                key: "test-set-0".into(),
                artifact: PathBuf::from("keploy/test-set-0/mocks.yaml"),
                records: vec![record("Http"), record("Postgres"), record("Http")],
            }],
        };

        let summary = CorpusSummary::from(&corpus);
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.sessions[0].kinds["Http"], 2);
        assert_eq!(summary.sessions[0].kinds["Postgres"], 1);
    }
}
