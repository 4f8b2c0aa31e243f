//! Captured interaction records and the corpora that hold them.
//!
//! A corpus is one capture run: an ordered list of sessions, each holding the
//! records of one session directory in capture order. Everything here is
//! immutable once the loader hands it out.

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One captured request/response transaction.
///
/// This is also the envelope of a JSONL capture line. `metadata` carries
/// timings, headers and anything else the capture tool recorded; it never
/// takes part in equality checks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct InteractionRecord {
    /// Protocol or mock kind (`Http`, `gRPC`, `Postgres`, ...).
    pub kind: String,

    /// Optional capture name (e.g. `mock-12`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Request payload tree.
    pub request: Value,

    /// Response payload tree.
    pub response: Value,

    /// Opaque capture metadata.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub metadata: Value,
}

/// The records of one session directory, in capture order.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Session directory name.
    pub key: String,
    /// Capture artifact the records were read from.
    pub artifact: PathBuf,
    pub records: Vec<InteractionRecord>,
}

/// Every session of one capture run, in lexicographic session order.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    pub root: PathBuf,
    pub sessions: Vec<Session>,
}

impl Corpus {
    /// Total number of records across all sessions.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.sessions.iter().map(|s| s.records.len()).sum()
    }

    #[must_use]
    pub fn session_keys(&self) -> Vec<&str> {
        self.sessions.iter().map(|s| s.key.as_str()).collect()
    }
}

/// Where a flat record came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Provenance {
    /// Position of the session within its corpus.
    pub session_index: usize,
    /// Session directory name.
    pub session_key: String,
    /// Position of the record within its session.
    pub record_index: usize,
}

/// A record borrowed from a corpus, tagged with its flat position.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRecord<'a> {
    /// Position in the flattened corpus (0..N).
    pub index: usize,
    pub provenance: Provenance,
    pub record: &'a InteractionRecord,
}
