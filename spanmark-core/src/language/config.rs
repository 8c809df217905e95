use serde::{Deserialize, Serialize};

/// Language used when a lookup misses
pub const DEFAULT_LANGUAGE: &str = "en";

/// Pattern matching any letter or digit in any script
pub const DEFAULT_ALPHANUM_PATTERN: &str = r"\p{L}|\p{N}";

/// Settings for one language.
///
/// Every field is optional in the TOML source; missing fields take the
/// English defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Lines with fewer whitespace-delimited words are flagged
    pub min_words_per_line: usize,
    /// Marks that count as a valid line ending
    pub eol_punctuation: Vec<String>,
    /// Regex matched against paragraphs to detect "real" text
    pub alphanum_pattern: String,
    /// Two-letter code, as emitted by most language classifiers
    pub iso639_1: String,
    /// Three-letter code
    pub iso639_3: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            min_words_per_line: 3,
            eol_punctuation: [".", "?", "!", "\""].iter().map(|s| s.to_string()).collect(),
            alphanum_pattern: DEFAULT_ALPHANUM_PATTERN.to_string(),
            iso639_1: DEFAULT_LANGUAGE.to_string(),
            iso639_3: "eng".to_string(),
        }
    }
}

impl LanguageConfig {
    /// True if `line` ends with one of the configured terminal marks
    pub fn ends_with_eol_punctuation(&self, line: &str) -> bool {
        self.eol_punctuation
            .iter()
            .any(|mark| !mark.is_empty() && line.ends_with(mark.as_str()))
    }

    /// True if `code` names this language in either code system
    pub fn answers_to(&self, code: &str) -> bool {
        self.iso639_1 == code || self.iso639_3 == code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_english() {
        let config = LanguageConfig::default();
        assert_eq!(config.min_words_per_line, 3);
        assert!(config.ends_with_eol_punctuation("Hello world."));
        assert!(config.ends_with_eol_punctuation("He said \"no\""));
        assert!(!config.ends_with_eol_punctuation("Short"));
        assert!(config.answers_to("en"));
        assert!(config.answers_to("eng"));
    }

    #[test]
    fn test_partial_table_fills_defaults() {
        let config: LanguageConfig = toml::from_str("min_words_per_line = 5").unwrap();
        assert_eq!(config.min_words_per_line, 5);
        assert_eq!(config.iso639_1, "en");
        assert_eq!(config.alphanum_pattern, DEFAULT_ALPHANUM_PATTERN);
    }

    #[test]
    fn test_multibyte_terminal_marks() {
        let config = LanguageConfig {
            eol_punctuation: vec!["。".to_string()],
            ..LanguageConfig::default()
        };
        assert!(config.ends_with_eol_punctuation("今日は晴れです。"));
        assert!(!config.ends_with_eol_punctuation("今日は晴れです"));
    }
}
