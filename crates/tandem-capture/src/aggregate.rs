//! Flattening and alignment of corpora.
//!
//! Sessions are concatenated in session order; each record keeps its
//! `(session_index, record_index)` provenance. Two corpora are only ever
//! compared through an [`AlignedCorpora`], which can only be built when both
//! flatten to the same number of records.

use tandem_core::record::{Corpus, FlatRecord, Provenance};

use crate::error::AlignmentError;

/// Flatten a corpus into one ordered sequence of records.
#[must_use]
pub fn flatten(corpus: &Corpus) -> Vec<FlatRecord<'_>> {
    let mut flat = Vec::with_capacity(corpus.record_count());
    for (session_index, session) in corpus.sessions.iter().enumerate() {
        for (record_index, record) in session.records.iter().enumerate() {
            flat.push(FlatRecord {
                index: flat.len(),
                provenance: Provenance {
                    session_index,
                    session_key: session.key.clone(),
                    record_index,
                },
                record,
            });
        }
    }
    flat
}

/// Two flattened corpora of equal length, ready for a positional walk.
#[derive(Debug, Clone)]
pub struct AlignedCorpora<'a> {
    baseline: Vec<FlatRecord<'a>>,
    candidate: Vec<FlatRecord<'a>>,
}

impl<'a> AlignedCorpora<'a> {
    /// Number of record pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.baseline.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.baseline.is_empty()
    }

    #[must_use]
    pub fn baseline(&self) -> &[FlatRecord<'a>] {
        &self.baseline
    }

    #[must_use]
    pub fn candidate(&self) -> &[FlatRecord<'a>] {
        &self.candidate
    }

    /// Record pairs in flat-index order.
    pub fn pairs(&self) -> impl ExactSizeIterator<Item = (&FlatRecord<'a>, &FlatRecord<'a>)> {
        self.baseline.iter().zip(self.candidate.iter())
    }
}

/// Flatten both corpora and check that they line up.
///
/// # Errors
///
/// Returns `AlignmentError::CountMismatch` when the total record counts
/// differ. Nothing is flattened in that case.
pub fn align<'a>(
    baseline: &'a Corpus,
    candidate: &'a Corpus,
) -> Result<AlignedCorpora<'a>, AlignmentError> {
    let (baseline_count, candidate_count) = (baseline.record_count(), candidate.record_count());
    if baseline_count != candidate_count {
        return Err(AlignmentError::CountMismatch {
            baseline: baseline_count,
            candidate: candidate_count,
        });
    }

    if baseline.session_keys() != candidate.session_keys() {
        tracing::debug!(
            baseline = ?baseline.session_keys(),
            candidate = ?candidate.session_keys(),
            "session keys differ; aligning by flat position"
        );
    }

    Ok(AlignedCorpora {
        baseline: flatten(baseline),
        candidate: flatten(candidate),
    })
}
