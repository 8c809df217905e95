//! Language classifier interface and the whatlang adapter

use crate::error::ClassifierError;
use crate::language::LanguageConfig;

/// One language guess
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePrediction {
    /// Classifier label, also used as the span type
    pub language: String,
    /// Classifier confidence, not necessarily normalized
    pub confidence: f64,
}

impl LanguagePrediction {
    /// Create a prediction
    pub fn new(language: impl Into<String>, confidence: f64) -> Self {
        Self {
            language: language.into(),
            confidence,
        }
    }
}

/// Identifies the language of a piece of text
pub trait LanguageClassifier: Send + Sync {
    /// Predictions for `text`, possibly empty and possibly exhaustive
    fn classify(&self, text: &str) -> Result<Vec<LanguagePrediction>, ClassifierError>;

    /// Label this classifier uses for the language described by `config`
    fn label_for(&self, config: &LanguageConfig) -> String {
        config.iso639_1.clone()
    }
}

/// Adapter over the `whatlang` trigram detector.
///
/// Emits at most one prediction, labelled with the ISO 639-3 code.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangClassifier;

impl LanguageClassifier for WhatlangClassifier {
    fn classify(&self, text: &str) -> Result<Vec<LanguagePrediction>, ClassifierError> {
        Ok(whatlang::detect(text)
            .map(|info| vec![LanguagePrediction::new(info.lang().code(), info.confidence())])
            .unwrap_or_default())
    }

    fn label_for(&self, config: &LanguageConfig) -> String {
        config.iso639_3.clone()
    }
}
