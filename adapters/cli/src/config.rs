use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

const SUPPORTED_CONFIG_VERSION: u32 = 1;
const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings read from the optional TOML configuration file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub(crate) struct CliConfig {
    version: u32,
    /// Tracing filter directive used when `MAZE_PUZZLE_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub(crate) log_filter: String,
    /// Whether JSON output is pretty-printed.
    #[serde(default = "default_pretty")]
    pub(crate) pretty: bool,
    /// Step limit forced onto every loaded puzzle.
    #[serde(default)]
    pub(crate) max_steps: Option<u32>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            log_filter: default_log_filter(),
            pretty: default_pretty(),
            max_steps: None,
        }
    }
}

impl CliConfig {
    /// Loads the configuration at `path`, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid config file at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("failed to parse config toml")?;
        if config.version != SUPPORTED_CONFIG_VERSION {
            bail!(
                "unsupported config version {}; expected {}",
                config.version,
                SUPPORTED_CONFIG_VERSION
            );
        }
        if config.max_steps == Some(0) {
            bail!("max_steps override must be positive");
        }
        Ok(config)
    }
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

const fn default_pretty() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fills_defaults() {
        let config = CliConfig::parse("version = 1").expect("config parses");
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn parse_reads_every_setting() {
        let config = CliConfig::parse(
            r#"
                version = 1
                log_filter = "maze_puzzle=debug"
                pretty = false
                max_steps = 25
            "#,
        )
        .expect("config parses");

        assert_eq!(config.log_filter, "maze_puzzle=debug");
        assert!(!config.pretty);
        assert_eq!(config.max_steps, Some(25));
    }

    #[test]
    fn parse_rejects_unknown_versions() {
        let error = CliConfig::parse("version = 2").expect_err("version rejected");
        assert!(error.to_string().contains("unsupported config version 2"));
    }

    #[test]
    fn parse_rejects_zero_step_override() {
        assert!(CliConfig::parse("version = 1\nmax_steps = 0").is_err());
    }

    #[test]
    fn missing_path_yields_defaults() {
        assert_eq!(CliConfig::load(None).expect("defaults"), CliConfig::default());
    }
}
