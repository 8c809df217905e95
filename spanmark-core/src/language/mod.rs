//! Per-language settings consumed by the lexical signals

mod config;
mod loader;

pub use config::{LanguageConfig, DEFAULT_ALPHANUM_PATTERN, DEFAULT_LANGUAGE};
pub use loader::{LanguageConfigSource, LanguageConfigs};
