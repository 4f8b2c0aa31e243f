use anyhow::Context;
use figment::providers::Serialized;
use serde::Serialize;
use tandem_config::TandemConfig;
use tandem_core::enums::CompareMode;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{CompareArgs, LoadArgs};

/// Command-line values layered over every other configuration source.
///
/// Unset flags are skipped so lower layers keep their values. List flags are
/// appended to the configured lists.
#[derive(Debug, Default, Serialize)]
pub struct ConfigOverrides {
    capture: CaptureOverrides,
    compare: CompareOverrides,
}

#[derive(Debug, Default, Serialize)]
struct CaptureOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    workers: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    exclude: Vec<String>,
}

#[derive(Debug, Default, Serialize)]
struct CompareOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<CompareMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    compare_kind: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    classify_noise: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    request_fields: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    response_fields: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ignore: Vec<String>,
}

impl ConfigOverrides {
    pub fn from_load(args: &LoadArgs) -> Self {
        Self {
            capture: CaptureOverrides {
                workers: args.workers,
                exclude: args.exclude.clone(),
            },
            compare: CompareOverrides::default(),
        }
    }

    pub fn from_compare(args: &CompareArgs) -> Self {
        Self {
            compare: CompareOverrides {
                mode: args.mode.map(CompareMode::from),
                compare_kind: args.no_kind.then_some(false),
                classify_noise: args.no_noise.then_some(false),
                request_fields: args.request_fields.clone(),
                response_fields: args.response_fields.clone(),
                ignore: args.ignore.clone(),
            },
            ..Self::from_load(&args.load)
        }
    }
}

/// Load `.env`, build the config chain and merge command-line overrides.
pub fn load_config(flags: &GlobalFlags, overrides: &ConfigOverrides) -> anyhow::Result<TandemConfig> {
    load_dotenv()?;

    let figment = TandemConfig::figment(flags.config.as_deref())?
        .admerge(Serialized::defaults(overrides));
    let config = TandemConfig::extract(figment).context("invalid configuration")?;

    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded dotenv file");
            Ok(())
        }
        Err(error) if error.not_found() => Ok(()),
        Err(error) => Err(anyhow::Error::from(error).context("failed to load .env file")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::cli::root_commands::ModeArg;

    fn compare_args() -> CompareArgs {
        CompareArgs {
            baseline: "a".into(),
            candidate: "b".into(),
            mode: None,
            request_fields: Vec::new(),
            response_fields: Vec::new(),
            ignore: Vec::new(),
            no_kind: false,
            no_noise: false,
            load: LoadArgs::default(),
        }
    }

    #[test]
    fn unset_flags_serialize_to_nothing() {
        let overrides = ConfigOverrides::from_compare(&compare_args());
        assert_eq!(
            serde_json::to_value(&overrides).unwrap(),
            json!({"capture": {}, "compare": {}})
        );
    }

    #[test]
    fn set_flags_are_carried() {
        let args = CompareArgs {
            mode: Some(ModeArg::CollectAll),
            no_kind: true,
            ignore: vec!["response.header.Date".into()],
            load: LoadArgs {
                workers: Some(2),
                exclude: Vec::new(),
            },
            ..compare_args()
        };
        assert_eq!(
            serde_json::to_value(ConfigOverrides::from_compare(&args)).unwrap(),
            json!({
                "capture": {"workers": 2},
                "compare": {
                    "mode": "collect-all",
                    "compare_kind": false,
                    "ignore": ["response.header.Date"]
                }
            })
        );
    }

    #[test]
    fn overrides_win_and_lists_append() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display().to_string());
            jail.create_file(
                "ci.toml",
                r#"
                [capture]
                workers = 8

                [compare]
                mode = "fail-fast"
                ignore = ["response.header.Date"]
                "#,
            )?;

            let args = CompareArgs {
                mode: Some(ModeArg::CollectAll),
                ignore: vec!["response.body.id".into()],
                load: LoadArgs {
                    workers: Some(2),
                    exclude: Vec::new(),
                },
                ..compare_args()
            };
            let flags = GlobalFlags {
                format: crate::cli::OutputFormat::Json,
                quiet: false,
                verbose: false,
                config: Some("ci.toml".into()),
            };

            let config = load_config(&flags, &ConfigOverrides::from_compare(&args))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.capture.workers, 2);
            assert_eq!(config.compare.mode, CompareMode::CollectAll);
            assert_eq!(
                config.compare.ignore,
                vec!["response.header.Date", "response.body.id"]
            );
            assert!(config.compare.compare_kind);
            Ok(())
        });
    }
}
