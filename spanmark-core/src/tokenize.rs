//! Tokenizers used by the repetition and length signals
//!
//! The signals treat tokenization as an opaque service: text goes in, an
//! ordered list of tokens with known character lengths comes out.

use crate::error::{Result, SignalError, TokenizerError};
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

/// One token and its length in characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token text
    pub text: String,
    /// Length of `text` in characters
    pub char_len: usize,
}

impl Token {
    /// Build a token, measuring its character length
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let char_len = text.chars().count();
        Self { text, char_len }
    }
}

/// Splits text into an ordered sequence of tokens
pub trait SubwordTokenizer: Send + Sync {
    /// Registry key of this tokenizer
    fn name(&self) -> &str;

    /// Tokenize `text`
    fn tokenize(&self, text: &str) -> std::result::Result<Vec<Token>, TokenizerError>;

    /// Number of tokens in `text`
    fn count(&self, text: &str) -> std::result::Result<usize, TokenizerError> {
        Ok(self.tokenize(text)?.len())
    }
}

/// UAX #29 word-boundary segments, with whitespace-only segments dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordTokenizer;

impl SubwordTokenizer for UnicodeWordTokenizer {
    fn name(&self) -> &str {
        "unicode_words"
    }

    fn tokenize(&self, text: &str) -> std::result::Result<Vec<Token>, TokenizerError> {
        Ok(text
            .split_word_bounds()
            .filter(|segment| !segment.chars().all(char::is_whitespace))
            .map(Token::new)
            .collect())
    }

    fn count(&self, text: &str) -> std::result::Result<usize, TokenizerError> {
        Ok(text
            .split_word_bounds()
            .filter(|segment| !segment.chars().all(char::is_whitespace))
            .count())
    }
}

/// Runs of non-whitespace characters
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl SubwordTokenizer for WhitespaceTokenizer {
    fn name(&self) -> &str {
        "whitespace"
    }

    fn tokenize(&self, text: &str) -> std::result::Result<Vec<Token>, TokenizerError> {
        Ok(text.split_whitespace().map(Token::new).collect())
    }

    fn count(&self, text: &str) -> std::result::Result<usize, TokenizerError> {
        Ok(text.split_whitespace().count())
    }
}

/// Byte-pair encoding tokenizer backed by `tiktoken-rs`
#[cfg(feature = "tiktoken")]
pub struct TiktokenTokenizer {
    name: String,
    bpe: tiktoken_rs::CoreBPE,
}

#[cfg(feature = "tiktoken")]
impl TiktokenTokenizer {
    /// Load one of the bundled encodings (`cl100k_base`, `o200k_base`)
    pub fn new(encoding: &str) -> Result<Self> {
        let bpe = match encoding {
            "cl100k_base" => tiktoken_rs::cl100k_base(),
            "o200k_base" => tiktoken_rs::o200k_base(),
            _ => return Err(SignalError::UnknownTokenizer(encoding.to_string())),
        }
        .map_err(|e| TokenizerError::new(format!("failed to load {encoding}: {e}")))?;

        Ok(Self {
            name: encoding.to_string(),
            bpe,
        })
    }
}

#[cfg(feature = "tiktoken")]
impl std::fmt::Debug for TiktokenTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenTokenizer")
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(feature = "tiktoken")]
impl SubwordTokenizer for TiktokenTokenizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn tokenize(&self, text: &str) -> std::result::Result<Vec<Token>, TokenizerError> {
        let ids = self.bpe.encode_ordinary(text);
        let mut tokens = Vec::with_capacity(ids.len());
        let mut pending = Vec::new();

        // A multibyte character can be split across ids; hold them back
        // until they decode to valid UTF-8.
        for id in ids {
            pending.push(id);
            if let Ok(piece) = self.bpe.decode(pending.clone()) {
                tokens.push(Token::new(piece));
                pending.clear();
            }
        }

        if !pending.is_empty() {
            return Err(TokenizerError::new(format!(
                "{} produced {} undecodable trailing ids",
                self.name,
                pending.len()
            )));
        }

        Ok(tokens)
    }

    fn count(&self, text: &str) -> std::result::Result<usize, TokenizerError> {
        Ok(self.bpe.encode_ordinary(text).len())
    }
}

/// Names of the tokenizers [`tokenizer_by_name`] can build
pub fn available_tokenizers() -> Vec<&'static str> {
    let mut names = vec!["unicode_words", "whitespace"];
    if cfg!(feature = "tiktoken") {
        names.extend(["cl100k_base", "o200k_base"]);
    }
    names
}

/// Build a built-in tokenizer by name
pub fn tokenizer_by_name(name: &str) -> Result<Arc<dyn SubwordTokenizer>> {
    match name {
        "unicode_words" => Ok(Arc::new(UnicodeWordTokenizer)),
        "whitespace" => Ok(Arc::new(WhitespaceTokenizer)),
        #[cfg(feature = "tiktoken")]
        "cl100k_base" | "o200k_base" => Ok(Arc::new(TiktokenTokenizer::new(name)?)),
        _ => Err(SignalError::UnknownTokenizer(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_unicode_words_keep_punctuation() {
        let tokens = UnicodeWordTokenizer.tokenize("Hello, world!").unwrap();
        assert_eq!(texts(&tokens), vec!["Hello", ",", "world", "!"]);
        assert_eq!(tokens[0].char_len, 5);
    }

    #[test]
    fn test_unicode_words_drop_whitespace() {
        let tokens = UnicodeWordTokenizer.tokenize("  a \n\n b\t").unwrap();
        assert_eq!(texts(&tokens), vec!["a", "b"]);
        assert_eq!(UnicodeWordTokenizer.count("  a \n\n b\t").unwrap(), 2);
    }

    #[test]
    fn test_unicode_words_measure_characters() {
        let tokens = UnicodeWordTokenizer.tokenize("café").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].char_len, 4);
    }

    #[test]
    fn test_whitespace_tokenizer() {
        let tokens = WhitespaceTokenizer.tokenize("Hello, world!  ").unwrap();
        assert_eq!(texts(&tokens), vec!["Hello,", "world!"]);
        assert_eq!(WhitespaceTokenizer.count("").unwrap(), 0);
    }

    #[test]
    fn test_tokenizer_by_name() {
        assert_eq!(tokenizer_by_name("whitespace").unwrap().name(), "whitespace");
        assert!(matches!(
            tokenizer_by_name("no-such-tokenizer"),
            Err(SignalError::UnknownTokenizer(_))
        ));
        assert!(available_tokenizers().contains(&"unicode_words"));
    }
}
