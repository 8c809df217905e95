//! Language identification signals and document-level aggregation

use crate::classify::{LanguageClassifier, LanguagePrediction};
use crate::context::TaggerContext;
use crate::error::Result;
use crate::language::DEFAULT_LANGUAGE;
use crate::options::{parse_options, Options};
use crate::tagger::Tagger;
use serde::{Deserialize, Serialize};
use spanmark_model::{split_paragraphs, DocResult, Document, Span};
use std::sync::Arc;
use tracing::debug;

/// Append `doc_<label>` and `doc_not_<label>` spans to `result`.
///
/// The score is the length-weighted mean of every span typed `label`:
/// `sum((end - start) * score) / document length`. An empty document
/// scores 0.0 for both spans.
pub fn add_document_language_score(result: &mut DocResult<'_>, label: &str) {
    let length = result.doc().char_len();
    let (score, complement) = if length == 0 {
        (0.0, 0.0)
    } else {
        let weighted: f64 = result
            .spans_of_type(label)
            .map(|span| span.char_len() as f64 * span.score())
            .sum();
        let score = weighted / length as f64;
        (score, 1.0 - score)
    };

    result.push(Span::with_score(0, length, format!("doc_{label}"), score));
    result.push(Span::with_score(
        0,
        length,
        format!("doc_not_{label}"),
        complement,
    ));
}

/// Which part of the document is classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageScope {
    /// The whole text at once
    Document,
    /// Each non-empty paragraph on its own
    Paragraphs,
}

/// Options of the language signals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LanguageOptions {
    /// Target language, resolved through the language configuration
    pub language: String,
}

impl Default for LanguageOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Classifier-backed language signal
pub struct LanguageTagger {
    classifier: Arc<dyn LanguageClassifier>,
    scope: LanguageScope,
    target: Option<String>,
    include_negative: bool,
    document_score: bool,
}

impl std::fmt::Debug for LanguageTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageTagger")
            .field("scope", &self.scope)
            .field("target", &self.target)
            .field("include_negative", &self.include_negative)
            .field("document_score", &self.document_score)
            .finish()
    }
}

impl LanguageTagger {
    /// Report every prediction the classifier makes for the whole document
    pub fn all_languages(classifier: Arc<dyn LanguageClassifier>) -> Self {
        Self {
            classifier,
            scope: LanguageScope::Document,
            target: None,
            include_negative: false,
            document_score: false,
        }
    }

    /// Report only `target`, with its `not_` complement.
    ///
    /// When the classifier does not predict `target` for a piece of text, a
    /// `target` span with score 0.0 is emitted instead. With
    /// [`LanguageScope::Paragraphs`] the paragraph spans are also folded into
    /// a document-level score.
    pub fn targeted(
        classifier: Arc<dyn LanguageClassifier>,
        target: impl Into<String>,
        scope: LanguageScope,
    ) -> Self {
        Self {
            classifier,
            scope,
            target: Some(target.into()),
            include_negative: true,
            document_score: scope == LanguageScope::Paragraphs,
        }
    }

    fn predictions(&self, text: &str) -> Result<Vec<LanguagePrediction>> {
        let normalized = text.to_lowercase().replace('\n', " ");
        let predictions = self.classifier.classify(normalized.trim())?;

        Ok(match &self.target {
            None => predictions,
            Some(target) => {
                let matching: Vec<_> = predictions
                    .into_iter()
                    .filter(|p| &p.language == target)
                    .collect();
                if matching.is_empty() {
                    vec![LanguagePrediction::new(target.clone(), 0.0)]
                } else {
                    matching
                }
            }
        })
    }
}

impl Tagger for LanguageTagger {
    fn predict<'d>(&self, doc: &'d Document) -> Result<DocResult<'d>> {
        let mut spans = Vec::new();

        match self.scope {
            LanguageScope::Document => {
                for prediction in self.predictions(doc.text())? {
                    spans.push(Span::with_score(
                        0,
                        doc.char_len(),
                        prediction.language,
                        prediction.confidence,
                    ));
                }
            }
            LanguageScope::Paragraphs => {
                for paragraph in split_paragraphs(doc.text(), true) {
                    for prediction in self.predictions(paragraph.text())? {
                        spans.push(Span::with_score(
                            paragraph.start(),
                            paragraph.end(),
                            prediction.language,
                            prediction.confidence,
                        ));
                    }
                }
            }
        }

        if self.include_negative {
            let negatives: Vec<Span> = spans
                .iter()
                .map(|span| span.complement(format!("not_{}", span.kind())))
                .collect();
            spans.extend(negatives);
        }

        let mut result = DocResult::with_spans(doc, spans);
        if let (true, Some(target)) = (self.document_score, &self.target) {
            add_document_language_score(&mut result, target);
        }
        Ok(result)
    }
}

pub(crate) fn build_language(
    signal: &str,
    context: &TaggerContext,
    options: &Options,
    scope: Option<LanguageScope>,
) -> Result<Box<dyn Tagger>> {
    let options: LanguageOptions = parse_options(signal, options)?;
    let classifier = context.classifier();

    let tagger = match scope {
        None => LanguageTagger::all_languages(classifier),
        Some(scope) => {
            let config = context.languages().config(&options.language);
            let label = classifier.label_for(&config);
            debug!(signal, language = %options.language, %label, "configured language signal");
            LanguageTagger::targeted(classifier, label, scope)
        }
    };
    Ok(Box::new(tagger))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClassifierError, SignalError};

    /// Classifies by a marker word, with a fixed confidence
    struct MarkerClassifier;

    impl LanguageClassifier for MarkerClassifier {
        fn classify(&self, text: &str) -> std::result::Result<Vec<LanguagePrediction>, ClassifierError> {
            if text.contains("broken") {
                return Err(ClassifierError::new("model unavailable"));
            }
            if text.contains("hola") {
                Ok(vec![
                    LanguagePrediction::new("es", 0.9),
                    LanguagePrediction::new("en", 0.1),
                ])
            } else {
                Ok(vec![LanguagePrediction::new("en", 0.8)])
            }
        }
    }

    fn score(result: &DocResult<'_>, kind: &str) -> f64 {
        result.spans_of_type(kind).map(|s| s.score()).sum()
    }

    #[test]
    fn test_single_paragraph_document_score() {
        let doc = Document::new("d", "hello there friend");
        let tagger =
            LanguageTagger::targeted(Arc::new(MarkerClassifier), "en", LanguageScope::Paragraphs);
        let result = tagger.predict(&doc).unwrap();

        assert!((score(&result, "en") - 0.8).abs() < 1e-9);
        assert!((score(&result, "not_en") - 0.2).abs() < 1e-9);
        assert!((score(&result, "doc_en") - 0.8).abs() < 1e-9);
        assert!((score(&result, "doc_not_en") - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_length_weighted_document_score() {
        // 10 characters of English at 0.8, then 9 of Spanish with English at 0.1
        let doc = Document::new("d", "aaaa bbbb\nhola hola");
        let tagger =
            LanguageTagger::targeted(Arc::new(MarkerClassifier), "en", LanguageScope::Paragraphs);
        let result = tagger.predict(&doc).unwrap();
        let expected = (10.0 * 0.8 + 9.0 * 0.1) / 19.0;
        assert!((score(&result, "doc_en") - expected).abs() < 1e-9);
        assert_eq!(result.spans_of_type("es").count(), 0);
    }

    #[test]
    fn test_missing_target_scores_zero() {
        let doc = Document::new("d", "hola amigo");
        let tagger =
            LanguageTagger::targeted(Arc::new(MarkerClassifier), "de", LanguageScope::Document);
        let result = tagger.predict(&doc).unwrap();
        assert_eq!(score(&result, "de"), 0.0);
        assert_eq!(score(&result, "not_de"), 1.0);
        assert_eq!(result.spans_of_type("doc_de").count(), 0);
    }

    #[test]
    fn test_all_languages_document() {
        let doc = Document::new("d", "hola amigo");
        let tagger = LanguageTagger::all_languages(Arc::new(MarkerClassifier));
        let result = tagger.predict(&doc).unwrap();
        let kinds: Vec<&str> = result.spans().iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec!["es", "en"]);
    }

    #[test]
    fn test_empty_document_scores_zero() {
        let doc = Document::new("d", "");
        let mut result = DocResult::new(&doc);
        add_document_language_score(&mut result, "en");
        assert_eq!(score(&result, "doc_en"), 0.0);
        assert_eq!(score(&result, "doc_not_en"), 0.0);
    }

    #[test]
    fn test_classifier_failure_propagates() {
        let doc = Document::new("d", "this is broken");
        let tagger = LanguageTagger::all_languages(Arc::new(MarkerClassifier));
        let error = tagger.predict(&doc).unwrap_err();
        assert!(matches!(error, SignalError::Classifier(_)));
    }
}
