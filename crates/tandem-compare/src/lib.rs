//! # tandem-compare
//!
//! Structural comparison of two capture corpora.
//!
//! - [`tree`] compares one pair of payload trees
//! - [`selector`] narrows what is compared (field inclusion, ignore patterns)
//! - [`noise`] tags value changes that look like generated data
//! - [`reporter`] walks aligned corpora and builds a
//!   [`Report`](tandem_core::report::Report)
//! - [`render`] turns a report into text
//!
//! [`compare_roots`] runs the whole pipeline from two directories.

pub mod error;
pub mod noise;
pub mod render;
pub mod reporter;
pub mod selector;
pub mod tree;

pub use error::CompareError;
pub use reporter::DivergenceReporter;
pub use tree::StructuralComparator;

use std::path::Path;

use tandem_capture::CaptureLoader;
use tandem_config::{CaptureConfig, CompareConfig};
use tandem_core::report::Report;

/// Load both corpora, align them and compare every record pair.
///
/// # Errors
///
/// Returns `CompareError` when a corpus fails to load, the record counts
/// differ, or an ignore pattern is malformed. Ignore patterns are checked
/// before anything is read from disk.
pub fn compare_roots(
    baseline: &Path,
    candidate: &Path,
    compare: &CompareConfig,
    capture: &CaptureConfig,
) -> Result<Report, CompareError> {
    let reporter = DivergenceReporter::new(compare)?;
    let loader = CaptureLoader::new(capture.clone());

    let baseline_corpus = loader.load(baseline).map_err(CompareError::Baseline)?;
    let candidate_corpus = loader.load(candidate).map_err(CompareError::Candidate)?;

    let aligned = tandem_capture::align(&baseline_corpus, &candidate_corpus)?;
    Ok(reporter.run(&aligned))
}
