//! Comparison configuration: mode, field inclusion and noise handling.

use serde::{Deserialize, Serialize};
use tandem_core::enums::CompareMode;
use tandem_core::path::TreePath;

use crate::error::ConfigError;

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CompareConfig {
    /// `fail-fast` (default) or `collect-all`.
    #[serde(default)]
    pub mode: CompareMode,

    /// Whether a differing record `kind` counts as a divergence.
    #[serde(default = "default_true")]
    pub compare_kind: bool,

    /// Top-level request keys to compare; empty compares the whole tree.
    #[serde(default)]
    pub request_fields: Vec<String>,

    /// Top-level response keys to compare; empty compares the whole tree.
    #[serde(default)]
    pub response_fields: Vec<String>,

    /// Paths skipped during comparison, e.g. `response.header.Date`.
    /// A `*` segment matches any single key or index.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Tag value differences that look like generated ids or timestamps.
    #[serde(default = "default_true")]
    pub classify_noise: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            mode: CompareMode::default(),
            compare_kind: true,
            request_fields: Vec::new(),
            response_fields: Vec::new(),
            ignore: Vec::new(),
            classify_noise: true,
        }
    }
}

impl CompareConfig {
    /// Check that every ignore pattern parses and is rooted at a record field.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first bad pattern.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for pattern in &self.ignore {
            TreePath::parse_rooted(pattern).map_err(|e| ConfigError::InvalidValue {
                field: "compare.ignore".into(),
                reason: e.to_string(),
            })?;
        }

        if let Some(empty) = self
            .request_fields
            .iter()
            .chain(&self.response_fields)
            .find(|field| field.is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "compare.request_fields/response_fields".into(),
                reason: format!("empty field name '{empty}'"),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = CompareConfig::default();
        assert_eq!(config.mode, CompareMode::FailFast);
        assert!(config.compare_kind);
        assert!(config.classify_noise);
        assert!(config.request_fields.is_empty());
        assert!(config.ignore.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn ignore_patterns_must_be_rooted_at_a_field() {
        let config = CompareConfig {
            ignore: vec!["body.id".into()],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = CompareConfig {
            ignore: vec!["response.header.Date".into(), "request.body.*.ts".into()],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn ignore_pattern_errors_name_the_rooting_rule() {
        let config = CompareConfig {
            ignore: vec!["kind".into()],
            ..Default::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("must start with 'request' or 'response'"), "{err}");
    }

    #[test]
    fn malformed_ignore_pattern_is_rejected() {
        let config = CompareConfig {
            ignore: vec!["response..body".into()],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("compare.ignore"));
        assert!(err.to_string().contains("response..body"));
    }
}
