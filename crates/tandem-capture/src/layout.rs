//! Session discovery under a corpus root.
//!
//! Every child directory of the root is a session unless its name is on the
//! exclusion list or it contains the marker file. Exclusions are resolved
//! here, once, before any capture file is opened.

use std::path::{Path, PathBuf};

use tandem_config::CaptureConfig;

use crate::error::LoadError;

/// A session directory found under a corpus root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDir {
    /// Directory name; the session's stable key.
    pub key: String,
    pub path: PathBuf,
}

/// List session directories under `root`, sorted by name.
///
/// # Errors
///
/// Returns `LoadError::DirectoryNotFound` when `root` is not a directory and
/// `LoadError::Io` when it cannot be listed.
pub fn discover_sessions(root: &Path, config: &CaptureConfig) -> Result<Vec<SessionDir>, LoadError> {
    if !root.is_dir() {
        return Err(LoadError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let io_err = |source| LoadError::Io {
        path: root.to_path_buf(),
        source,
    };

    let mut sessions = Vec::new();
    for entry in std::fs::read_dir(root).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let key = entry.file_name().to_string_lossy().into_owned();
        if config.exclude.iter().any(|name| name == &key) {
            tracing::debug!(session = %key, "skipping excluded directory");
            continue;
        }
        if !config.marker_file.is_empty() && path.join(&config.marker_file).is_file() {
            tracing::debug!(session = %key, marker = %config.marker_file, "skipping marked directory");
            continue;
        }

        sessions.push(SessionDir { key, path });
    }

    sessions.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(sessions)
}

/// Find the capture artifact of a session: the first configured name that
/// exists as a file.
///
/// # Errors
///
/// Returns `LoadError::ArtifactMissing` when none of the names exist.
pub fn locate_artifact(session: &SessionDir, config: &CaptureConfig) -> Result<PathBuf, LoadError> {
    config
        .artifact_names
        .iter()
        .map(|name| session.path.join(name))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| LoadError::ArtifactMissing {
            session: session.key.clone(),
            dir: session.path.clone(),
            tried: config.artifact_names.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mkdir(root: &Path, name: &str) -> PathBuf {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn sessions_are_sorted_and_reports_excluded() {
        let root = tempfile::tempdir().unwrap();
        mkdir(root.path(), "test-set-1");
        mkdir(root.path(), "reports");
        mkdir(root.path(), "test-set-0");
        mkdir(root.path(), "test-set-10");
        std::fs::write(root.path().join("config.yaml"), "x: 1").unwrap();

        let sessions = discover_sessions(root.path(), &CaptureConfig::default()).unwrap();
        let keys: Vec<_> = sessions.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["test-set-0", "test-set-1", "test-set-10"]);
    }

    #[test]
    fn reports_directory_is_excluded_by_name_not_position() {
        let root = tempfile::tempdir().unwrap();
        mkdir(root.path(), "a-session");
        mkdir(root.path(), "reports");
        mkdir(root.path(), "z-session");

        let sessions = discover_sessions(root.path(), &CaptureConfig::default()).unwrap();
        let keys: Vec<_> = sessions.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["a-session", "z-session"]);
    }

    #[test]
    fn marker_file_excludes_directory() {
        let root = tempfile::tempdir().unwrap();
        mkdir(root.path(), "s1");
        let scratch = mkdir(root.path(), "scratch");
        std::fs::write(scratch.join(".tandem-skip"), "").unwrap();

        let sessions = discover_sessions(root.path(), &CaptureConfig::default()).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].key, "s1");
    }

    #[test]
    fn missing_root_is_directory_not_found() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("nope");
        let err = discover_sessions(&missing, &CaptureConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::DirectoryNotFound { path } if path == missing));
    }

    #[test]
    fn artifact_lookup_follows_configured_order() {
        let root = tempfile::tempdir().unwrap();
        let dir = mkdir(root.path(), "s1");
        std::fs::write(dir.join("mocks.jsonl"), "").unwrap();
        std::fs::write(dir.join("mocks.yml"), "").unwrap();

        let session = SessionDir {
            key: "s1".into(),
            path: dir.clone(),
        };
        let artifact = locate_artifact(&session, &CaptureConfig::default()).unwrap();
        assert_eq!(artifact, dir.join("mocks.yml"));
    }

    #[test]
    fn missing_artifact_lists_tried_names() {
        let root = tempfile::tempdir().unwrap();
        let dir = mkdir(root.path(), "s1");
        let session = SessionDir {
            key: "s1".into(),
            path: dir,
        };
        let err = locate_artifact(&session, &CaptureConfig::default()).unwrap_err();
        let LoadError::ArtifactMissing { tried, .. } = err else {
            panic!("expected ArtifactMissing");
        };
        assert_eq!(tried.len(), 3);
    }
}
