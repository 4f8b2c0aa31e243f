//! Load-time and alignment error types.
//!
//! Both are terminal for a comparison run: nothing is compared once either
//! is raised.

use std::path::PathBuf;

use tandem_core::enums::Side;
use thiserror::Error;

/// A corpus could not be loaded. No partial corpus is ever returned.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The corpus root does not exist or is not a directory.
    #[error("Capture directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    /// A session directory has none of the configured capture files.
    #[error("Session '{session}' has no capture artifact in {} (looked for {})", .dir.display(), .tried.join(", "))]
    ArtifactMissing {
        session: String,
        dir: PathBuf,
        tried: Vec<String>,
    },

    /// The capture artifact holds zero records.
    #[error("Session '{session}' is empty: {} contains no records", .path.display())]
    SessionEmpty { session: String, path: PathBuf },

    /// A record could not be parsed into an interaction record.
    #[error("Session '{session}': failed to parse record{} in {}: {reason}", record_label(.record), .path.display())]
    RecordParseError {
        session: String,
        path: PathBuf,
        /// Zero-based position of the offending record, when known.
        record: Option<usize>,
        reason: String,
    },

    /// The artifact extension is not one the loader understands.
    #[error("Session '{session}': unsupported capture format {}", .path.display())]
    UnsupportedArtifact { session: String, path: PathBuf },

    /// Filesystem access failed.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The loader's worker pool could not be started.
    #[error("Failed to start capture loader workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

#[allow(clippy::ref_option)]
fn record_label(record: &Option<usize>) -> String {
    record.map_or_else(String::new, |index| format!(" #{index}"))
}

const fn larger_side(baseline: &usize, candidate: &usize) -> Side {
    if *baseline > *candidate {
        Side::Baseline
    } else {
        Side::Candidate
    }
}

/// Two corpora cannot be compared positionally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlignmentError {
    /// The flattened corpora have different record counts.
    #[error("Record count mismatch: baseline has {baseline}, candidate has {candidate} ({} is larger)", larger_side(.baseline, .candidate))]
    CountMismatch { baseline: usize, candidate: usize },
}

impl AlignmentError {
    /// The corpus with more records.
    #[must_use]
    pub const fn larger(&self) -> Side {
        match self {
            Self::CountMismatch {
                baseline,
                candidate,
            } => larger_side(baseline, candidate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_mismatch_names_larger_side() {
        let err = AlignmentError::CountMismatch {
            baseline: 5,
            candidate: 4,
        };
        assert_eq!(err.larger(), Side::Baseline);
        assert_eq!(
            err.to_string(),
            "Record count mismatch: baseline has 5, candidate has 4 (baseline is larger)"
        );
    }

    #[test]
    fn parse_error_mentions_record_position() {
        let err = LoadError::RecordParseError {
            session: "s1".into(),
            path: PathBuf::from("s1/mocks.yaml"),
            record: Some(3),
            reason: "spec has no response".into(),
        };
        let message = err.to_string();
        assert!(message.contains("record #3"), "{message}");
        assert!(message.contains("s1/mocks.yaml"), "{message}");
    }
}
