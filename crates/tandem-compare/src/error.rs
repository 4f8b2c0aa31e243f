use tandem_capture::{AlignmentError, LoadError};
use thiserror::Error;

/// Why a comparison run produced no report.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("Failed to load baseline corpus: {0}")]
    Baseline(#[source] LoadError),

    #[error("Failed to load candidate corpus: {0}")]
    Candidate(#[source] LoadError),

    #[error(transparent)]
    Alignment(#[from] AlignmentError),

    #[error("Invalid ignore pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
