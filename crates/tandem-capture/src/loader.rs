//! Corpus loading.
//!
//! Sessions are independent read-only files, so they load in parallel on a
//! bounded rayon pool. The indexed parallel iterator keeps results in
//! discovery order, which fixes every session and record index regardless
//! of how the pool schedules the work.

use std::path::Path;

use rayon::prelude::*;
use tandem_config::CaptureConfig;
use tandem_core::record::{Corpus, Session};

use crate::artifact;
use crate::error::LoadError;
use crate::layout::{self, SessionDir};

/// Loads capture corpora from disk.
#[derive(Debug, Clone, Default)]
pub struct CaptureLoader {
    config: CaptureConfig,
}

impl CaptureLoader {
    #[must_use]
    pub const fn new(config: CaptureConfig) -> Self {
        Self { config }
    }

    /// Load every session under `root`.
    ///
    /// When several sessions are malformed, the error of the first one in
    /// session order is returned.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the root is missing, a session has no artifact,
    /// an artifact is empty or malformed, or the worker pool cannot start.
    pub fn load(&self, root: &Path) -> Result<Corpus, LoadError> {
        let dirs = layout::discover_sessions(root, &self.config)?;
        if dirs.is_empty() {
            tracing::warn!(root = %root.display(), "capture directory contains no sessions");
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .build()?;

        let loaded: Vec<Result<Session, LoadError>> =
            pool.install(|| dirs.par_iter().map(|dir| self.load_session(dir)).collect());
        let sessions = loaded.into_iter().collect::<Result<Vec<_>, _>>()?;

        let corpus = Corpus {
            root: root.to_path_buf(),
            sessions,
        };
        tracing::info!(
            root = %root.display(),
            sessions = corpus.sessions.len(),
            records = corpus.record_count(),
            "loaded capture corpus"
        );
        Ok(corpus)
    }

    fn load_session(&self, dir: &SessionDir) -> Result<Session, LoadError> {
        let artifact = layout::locate_artifact(dir, &self.config)?;
        let records = artifact::read_records(&dir.key, &artifact)?;

        if records.is_empty() {
            return Err(LoadError::SessionEmpty {
                session: dir.key.clone(),
                path: artifact,
            });
        }

        tracing::debug!(
            session = %dir.key,
            artifact = %artifact.display(),
            records = records.len(),
            "loaded session"
        );

        Ok(Session {
            key: dir.key.clone(),
            artifact,
            records,
        })
    }
}
