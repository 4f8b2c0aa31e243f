//! Capture artifact parsing.
//!
//! Two formats are understood, chosen by file extension:
//!
//! - `.yaml` / `.yml`: a multi-document stream of capture envelopes
//!   (`version`, `kind`, `name`, `spec`) as written by mock recorders. The
//!   request lives under `spec.req`, `spec.request` or `spec.requests`; the
//!   response under `spec.resp`, `spec.response` or `spec.responses`. Every
//!   other `spec` key, plus `version`, becomes record metadata. A document
//!   that already has top-level `request`/`response` keys is read as a plain
//!   [`InteractionRecord`].
//! - `.jsonl`: one [`InteractionRecord`] per line. Blank lines are skipped
//!   and do not count as records, matching empty YAML documents.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use serde_jsonlines::JsonLinesReader;
use tandem_core::record::InteractionRecord;

use crate::error::LoadError;

const REQUEST_KEYS: [&str; 3] = ["req", "request", "requests"];
const RESPONSE_KEYS: [&str; 3] = ["resp", "response", "responses"];

/// On-disk capture format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Yaml,
    JsonLines,
}

impl ArtifactFormat {
    /// Pick the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Some(Self::Yaml),
            Some("jsonl") => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// Parse every record of a session's capture artifact, in file order.
///
/// # Errors
///
/// Returns `LoadError::UnsupportedArtifact` for unknown extensions,
/// `LoadError::Io` when the file cannot be read and
/// `LoadError::RecordParseError` for the first malformed record.
pub fn read_records(session: &str, path: &Path) -> Result<Vec<InteractionRecord>, LoadError> {
    match ArtifactFormat::from_path(path) {
        Some(ArtifactFormat::Yaml) => {
            let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_yaml_stream(&content).map_err(|(record, reason)| LoadError::RecordParseError {
                session: session.to_string(),
                path: path.to_path_buf(),
                record,
                reason,
            })
        }
        Some(ArtifactFormat::JsonLines) => read_json_lines(session, path),
        None => Err(LoadError::UnsupportedArtifact {
            session: session.to_string(),
            path: path.to_path_buf(),
        }),
    }
}

fn read_json_lines(session: &str, path: &Path) -> Result<Vec<InteractionRecord>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let body: String = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .flat_map(|line| [line, "\n"])
        .collect();

    JsonLinesReader::new(body.as_bytes())
        .read_all::<InteractionRecord>()
        .enumerate()
        .map(|(index, line)| {
            line.map_err(|e| LoadError::RecordParseError {
                session: session.to_string(),
                path: path.to_path_buf(),
                record: Some(index),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Parse a YAML capture stream. Errors carry the zero-based document
/// position (when known) and a reason.
///
/// Empty documents are skipped and do not count as records.
///
/// # Errors
///
/// Returns the position and reason of the first malformed document.
pub fn parse_yaml_stream(content: &str) -> Result<Vec<InteractionRecord>, (Option<usize>, String)> {
    let mut records = Vec::new();

    for (position, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let value = Value::deserialize(document).map_err(|e| (Some(position), e.to_string()))?;
        if value.is_null() {
            continue;
        }
        let record = record_from_document(value).map_err(|reason| (Some(position), reason))?;
        records.push(record);
    }

    Ok(records)
}

/// Convert one capture document into a record.
///
/// # Errors
///
/// Returns a human-readable reason when the document is not a capture
/// envelope or plain record.
pub fn record_from_document(document: Value) -> Result<InteractionRecord, String> {
    let Value::Object(mut doc) = document else {
        return Err("capture document must be a mapping".to_string());
    };

    if !doc.contains_key("spec") && doc.contains_key("request") && doc.contains_key("response") {
        return serde_json::from_value(Value::Object(doc)).map_err(|e| e.to_string());
    }

    let kind = match doc.remove("kind") {
        Some(Value::String(kind)) => kind,
        Some(other) => return Err(format!("'kind' must be a string, found {other}")),
        None => return Err("missing 'kind'".to_string()),
    };

    let name = match doc.remove("name") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(name),
        Some(other) => return Err(format!("'name' must be a string, found {other}")),
    };

    let mut spec = match doc.remove("spec") {
        Some(Value::Object(spec)) => spec,
        Some(_) => return Err("'spec' must be a mapping".to_string()),
        None => return Err("missing 'spec'".to_string()),
    };

    let request = take_first(&mut spec, &REQUEST_KEYS)
        .ok_or_else(|| format!("spec has no request ({})", REQUEST_KEYS.join("/")))?;
    let response = take_first(&mut spec, &RESPONSE_KEYS)
        .ok_or_else(|| format!("spec has no response ({})", RESPONSE_KEYS.join("/")))?;

    let mut metadata = Map::new();
    if let Some(version) = doc.remove("version") {
        metadata.insert("version".to_string(), version);
    }
    metadata.extend(spec);

    Ok(InteractionRecord {
        kind,
        name,
        request,
        response,
        metadata: if metadata.is_empty() {
            Value::Null
        } else {
            Value::Object(metadata)
        },
    })
}

/// Remove and return the value of the first key in `keys` present in `map`.
fn take_first(map: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    keys.iter().find_map(|key| map.remove(*key))
}
