//! Error types for signal construction and evaluation
//!
//! Degenerate input (empty text, no tokens) is never an error: signals
//! define their ratios as 0.0 instead. Errors are reserved for bad
//! configuration, which surfaces when a signal is built, and for failures
//! of the external tokenizer or classifier, which fail one document.

use thiserror::Error;

/// Failure reported by a [`SubwordTokenizer`](crate::tokenize::SubwordTokenizer)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TokenizerError {
    message: String,
}

impl TokenizerError {
    /// Wrap a tokenizer failure message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure reported by a [`LanguageClassifier`](crate::classify::LanguageClassifier)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClassifierError {
    message: String,
}

impl ClassifierError {
    /// Wrap a classifier failure message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised while building or running a signal
#[derive(Debug, Error)]
pub enum SignalError {
    /// No factory is registered under this key
    #[error("unknown signal '{0}'")]
    UnknownSignal(String),

    /// A factory is already registered under this key
    #[error("signal '{0}' is already registered")]
    DuplicateSignal(String),

    /// Construction options could not be parsed or failed validation
    #[error("invalid options for signal '{signal}': {reason}")]
    InvalidOptions {
        /// Signal being constructed
        signal: String,
        /// What was wrong with the options
        reason: String,
    },

    /// The requested tokenizer is not available
    #[error("unknown tokenizer '{0}'")]
    UnknownTokenizer(String),

    /// Configuration file could not be read or parsed
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The external tokenizer failed on a document
    #[error("tokenizer failed: {0}")]
    Tokenizer(#[from] TokenizerError),

    /// The external language classifier failed on a document
    #[error("language classifier failed: {0}")]
    Classifier(#[from] ClassifierError),
}

impl SignalError {
    /// Shorthand for [`SignalError::InvalidOptions`]
    pub fn invalid_options(signal: impl Into<String>, reason: impl Into<String>) -> Self {
        SignalError::InvalidOptions {
            signal: signal.into(),
            reason: reason.into(),
        }
    }

    /// True for failures of an external service while processing a document
    pub fn is_external(&self) -> bool {
        matches!(self, SignalError::Tokenizer(_) | SignalError::Classifier(_))
    }
}

/// Result type for signal operations
pub type Result<T> = std::result::Result<T, SignalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_signal_display() {
        let error = SignalError::UnknownSignal("gopher_v9".to_string());
        assert_eq!(error.to_string(), "unknown signal 'gopher_v9'");
    }

    #[test]
    fn test_external_errors_convert() {
        let error: SignalError = TokenizerError::new("model not loaded").into();
        assert!(error.is_external());
        assert_eq!(error.to_string(), "tokenizer failed: model not loaded");

        let error = SignalError::invalid_options("random_number_v1", "seed must be positive");
        assert!(!error.is_external());
        assert_eq!(
            error.to_string(),
            "invalid options for signal 'random_number_v1': seed must be positive"
        );
    }
}
