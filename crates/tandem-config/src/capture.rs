//! Capture-layout configuration: which directories are sessions and which
//! file inside each one holds the records.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_exclude() -> Vec<String> {
    vec!["reports".to_string(), "testReports".to_string()]
}

fn default_marker_file() -> String {
    ".tandem-skip".to_string()
}

fn default_artifact_names() -> Vec<String> {
    vec![
        "mocks.yaml".to_string(),
        "mocks.yml".to_string(),
        "mocks.jsonl".to_string(),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CaptureConfig {
    /// Directory names under a corpus root that are never sessions.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// A directory containing a file with this name is not a session.
    #[serde(default = "default_marker_file")]
    pub marker_file: String,

    /// Candidate capture file names, tried in order inside each session.
    #[serde(default = "default_artifact_names")]
    pub artifact_names: Vec<String>,

    /// Session-loading worker threads; 0 lets rayon decide.
    #[serde(default)]
    pub workers: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            exclude: default_exclude(),
            marker_file: default_marker_file(),
            artifact_names: default_artifact_names(),
            workers: 0,
        }
    }
}

impl CaptureConfig {
    /// Reject layouts the loader cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when no artifact name is configured
    /// or an artifact name is not a plain file name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.artifact_names.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "capture.artifact_names".into(),
                reason: "at least one capture file name is required".into(),
            });
        }

        if let Some(bad) = self
            .artifact_names
            .iter()
            .find(|name| name.is_empty() || name.contains(['/', '\\']))
        {
            return Err(ConfigError::InvalidValue {
                field: "capture.artifact_names".into(),
                reason: format!("'{bad}' is not a plain file name"),
            });
        }

        Ok(())
    }
}
