//! Banned word and phrase lists

use crate::error::{Result, SignalError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const AGNOSTIC_LIST: &str = include_str!("../configs/wordlists/naughty_words.txt");

/// Banned single words and multi-word phrases, lowercased
#[derive(Debug, Clone, Default)]
pub struct BannedContent {
    words: HashSet<String>,
    phrases: Vec<String>,
}

impl BannedContent {
    /// Parse a list with one entry per line.
    ///
    /// Entries containing a space are phrases, everything else is a word.
    pub fn parse(content: &str) -> Self {
        let mut words = HashSet::new();
        let mut phrases = Vec::new();

        for entry in content.lines() {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let entry = entry.to_lowercase();
            if entry.contains(' ') {
                if !phrases.contains(&entry) {
                    phrases.push(entry);
                }
            } else {
                words.insert(entry);
            }
        }

        Self { words, phrases }
    }

    /// The list compiled into the binary
    pub fn agnostic() -> Self {
        Self::parse(AGNOSTIC_LIST)
    }

    /// Number of banned words
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Number of banned phrases
    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    /// Check already-lowercased text.
    ///
    /// Words must match a whole whitespace-delimited token. Phrases match
    /// anywhere, including inside a longer word.
    pub fn matches(&self, lowered: &str) -> bool {
        lowered.split_whitespace().any(|token| self.words.contains(token))
            || self.phrases.iter().any(|phrase| lowered.contains(phrase.as_str()))
    }
}

/// Source of banned content keyed by language
pub trait WordListSource: Send + Sync {
    /// Lists for `language`, falling back to the agnostic list with a warning
    fn banned_content(&self, language: &str) -> BannedContent;
}

/// Word lists read from `naughty_words_<lang>.txt` files in a directory
#[derive(Debug, Clone, Default)]
pub struct WordLists {
    directory: Option<PathBuf>,
}

impl WordLists {
    /// Only the embedded agnostic list
    pub fn embedded() -> Self {
        Self::default()
    }

    /// Per-language lists from `directory`
    pub fn from_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
        }
    }

    /// Path of the list for `language`, if a directory is configured
    pub fn path_for(&self, language: &str) -> Option<PathBuf> {
        self.directory
            .as_ref()
            .map(|dir| dir.join(format!("naughty_words_{language}.txt")))
    }

    fn read(path: &Path) -> Result<BannedContent> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SignalError::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        Ok(BannedContent::parse(&content))
    }
}

impl WordListSource for WordLists {
    fn banned_content(&self, language: &str) -> BannedContent {
        if language == "agnostic" {
            return BannedContent::agnostic();
        }

        if let Some(path) = self.path_for(language).filter(|p| p.exists()) {
            match Self::read(&path) {
                Ok(content) => {
                    debug!(
                        language,
                        words = content.word_count(),
                        phrases = content.phrase_count(),
                        "loaded banned word list"
                    );
                    return content;
                }
                Err(e) => warn!("{e}"),
            }
        }

        warn!(
            "no banned word list for language '{language}'; \
             falling back to the language-agnostic list, results may be unreliable"
        );
        BannedContent::agnostic()
    }
}
