//! # tandem-capture
//!
//! Reads capture corpora from disk and aligns two of them for comparison.
//!
//! A corpus root holds one directory per session; each session directory
//! holds one capture artifact (multi-document YAML or JSONL). Loading is
//! read-only and fans out across sessions on a bounded rayon pool, but the
//! resulting [`Corpus`](tandem_core::record::Corpus) is always in
//! lexicographic session order.
//!
//! - [`layout`]: session discovery and exclusion rules
//! - [`artifact`]: capture file parsing
//! - [`loader`]: the `CaptureLoader` entry point
//! - [`aggregate`]: flattening and count alignment

pub mod aggregate;
pub mod artifact;
pub mod error;
pub mod layout;
pub mod loader;

pub use aggregate::{AlignedCorpora, align, flatten};
pub use error::{AlignmentError, LoadError};
pub use loader::CaptureLoader;
