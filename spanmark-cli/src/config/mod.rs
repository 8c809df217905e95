//! Pipeline configuration file

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::Deserialize;
use spanmark_engine::SignalSpec;
use std::fs;
use std::path::{Path, PathBuf};

/// Pipeline configuration loaded from TOML.
///
/// ```toml
/// threads = 4
/// language_config = "languages.toml"
/// word_lists = "wordlists"
///
/// [[signals]]
/// name = "gopher_v1"
/// options = { tokenizer = "whitespace" }
/// ```
///
/// Relative paths are resolved against the file's directory.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Signals to run
    #[serde(default)]
    pub signals: Vec<SignalSpec>,

    /// Number of worker threads
    #[serde(default)]
    pub threads: Option<usize>,

    /// External language configuration table
    #[serde(default)]
    pub language_config: Option<PathBuf>,

    /// Directory of per-language banned word lists
    #[serde(default)]
    pub word_lists: Option<PathBuf>,
}

impl PipelineConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Load a configuration file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.language_config = config.language_config.map(|p| base.join(p));
            config.word_lists = config.word_lists.map(|p| base.join(p));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = PipelineConfig::from_toml_str(
            r#"
            threads = 2

            [[signals]]
            name = "c4_v2"

            [[signals]]
            name = "gopher_v1"
            options = { ignore_empty_lines = true }
            "#,
        )
        .unwrap();

        assert_eq!(config.threads, Some(2));
        assert_eq!(config.signals.len(), 2);
        assert_eq!(config.signals[0], SignalSpec::new("c4_v2"));
        assert_eq!(
            config.signals[1].options.get("ignore_empty_lines"),
            Some(&toml::Value::Boolean(true))
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let error = PipelineConfig::from_toml_str("thread = 2").unwrap_err();
        assert!(error.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_relative_paths_follow_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pipeline.toml");
        std::fs::write(
            &path,
            "language_config = \"langs.toml\"\nword_lists = \"lists\"\n",
        )
        .unwrap();

        let config = PipelineConfig::from_path(&path).unwrap();
        assert_eq!(config.language_config, Some(dir.path().join("langs.toml")));
        assert_eq!(config.word_lists, Some(dir.path().join("lists")));
    }
}
