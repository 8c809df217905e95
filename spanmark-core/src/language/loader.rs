use super::config::{LanguageConfig, DEFAULT_LANGUAGE};
use crate::error::{Result, SignalError};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

static EMBEDDED_CONFIGS: OnceLock<LanguageConfigs> = OnceLock::new();

const EMBEDDED_LANGUAGES: &str = include_str!("../../configs/languages.toml");

/// Source of per-language settings.
///
/// Lookups never fail: a missing language resolves to a fallback config.
pub trait LanguageConfigSource: Send + Sync {
    /// Settings for `code`, or the fallback when `code` is unknown
    fn config(&self, code: &str) -> LanguageConfig;

    /// True if `code` names a language written without spaces between words
    fn is_spaceless(&self, code: &str) -> bool;

    /// Languages with an explicit entry
    fn languages(&self) -> Vec<String>;
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LanguageFile {
    spaceless_languages: BTreeSet<String>,
    languages: BTreeMap<String, LanguageConfig>,
}

/// Language table loaded from TOML
#[derive(Debug, Clone, Default)]
pub struct LanguageConfigs {
    languages: BTreeMap<String, LanguageConfig>,
    spaceless: BTreeSet<String>,
}

impl LanguageConfigs {
    /// Table compiled into the binary
    pub fn embedded() -> &'static LanguageConfigs {
        EMBEDDED_CONFIGS.get_or_init(|| {
            Self::from_toml_str(EMBEDDED_LANGUAGES).unwrap_or_else(|e| {
                warn!("embedded language table is invalid ({e}); using defaults");
                Self::default()
            })
        })
    }

    /// Parse a table in the `languages.toml` schema
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: LanguageFile = toml::from_str(content)
            .map_err(|e| SignalError::Configuration(format!("failed to parse language table: {e}")))?;

        Ok(Self {
            languages: file.languages,
            spaceless: file.spaceless_languages,
        })
    }

    /// Read and parse a table from disk
    pub fn try_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SignalError::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        let configs = Self::from_toml_str(&content)?;
        debug!(
            path = %path.display(),
            languages = configs.languages.len(),
            "loaded language table"
        );
        Ok(configs)
    }

    /// Read a table from disk, falling back to the embedded table on failure
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match Self::try_from_path(path) {
            Ok(configs) => configs,
            Err(e) => {
                warn!("{e}; falling back to the embedded language table");
                Self::embedded().clone()
            }
        }
    }

    fn lookup(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages
            .get(code)
            .or_else(|| self.languages.values().find(|config| config.answers_to(code)))
    }
}

impl LanguageConfigSource for LanguageConfigs {
    fn config(&self, code: &str) -> LanguageConfig {
        if let Some(config) = self.lookup(code) {
            return config.clone();
        }

        if let Some(config) = self.lookup(DEFAULT_LANGUAGE) {
            warn!("no configuration for language '{code}', using '{DEFAULT_LANGUAGE}'");
            return config.clone();
        }

        warn!("no configuration for language '{code}', using built-in defaults");
        LanguageConfig::default()
    }

    fn is_spaceless(&self, code: &str) -> bool {
        if self.spaceless.contains(code) {
            return true;
        }
        self.lookup(code)
            .is_some_and(|config| self.spaceless.contains(&config.iso639_3))
    }

    fn languages(&self) -> Vec<String> {
        self.languages.keys().cloned().collect()
    }
}
