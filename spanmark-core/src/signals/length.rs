//! Length and counting signals
//!
//! Each counter comes in a document-scoped form (one span) and, for most
//! measures, a paragraph-scoped form that emits one span per paragraph and
//! a `document` span whose score is the sum of the paragraph scores. The
//! paragraph form can also emit `negative_paragraph` / `negative_document`
//! spans carrying the negated scores, so "shorter than N" can be expressed
//! as a greater-than threshold.

use crate::context::TaggerContext;
use crate::error::{Result, SignalError};
use crate::options::{parse_options, Options};
use crate::tagger::Tagger;
use crate::tokenize::SubwordTokenizer;
use regex::Regex;
use serde::{Deserialize, Serialize};
use spanmark_model::{char_len, split_paragraphs, DocResult, Document, Span};
use std::fmt;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

const WORD_PUNCT_PATTERN: &str = r"\w+|[^\w\s]+";

/// What a length signal counts
#[derive(Clone)]
pub enum LengthMeasure {
    /// UTF-8 encoded size
    Bytes,
    /// Always 1, for counting documents downstream
    Docs,
    /// Characters
    Chars,
    /// Characters after trimming surrounding whitespace
    CharsStripped,
    /// Runs of word characters and runs of punctuation
    WordPunct(Regex),
    /// Non-whitespace UAX #29 word-boundary segments of the trimmed text
    UnicodeWords,
    /// Tokens from a tokenizer, over the trimmed text
    Subword(Arc<dyn SubwordTokenizer>),
}

impl fmt::Debug for LengthMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthMeasure::Bytes => f.write_str("Bytes"),
            LengthMeasure::Docs => f.write_str("Docs"),
            LengthMeasure::Chars => f.write_str("Chars"),
            LengthMeasure::CharsStripped => f.write_str("CharsStripped"),
            LengthMeasure::WordPunct(_) => f.write_str("WordPunct"),
            LengthMeasure::UnicodeWords => f.write_str("UnicodeWords"),
            LengthMeasure::Subword(tokenizer) => {
                f.debug_tuple("Subword").field(&tokenizer.name()).finish()
            }
        }
    }
}

impl LengthMeasure {
    /// Word/punctuation run counter
    pub fn word_punct() -> Result<Self> {
        let pattern = Regex::new(WORD_PUNCT_PATTERN)
            .map_err(|e| SignalError::Configuration(format!("invalid length pattern: {e}")))?;
        Ok(LengthMeasure::WordPunct(pattern))
    }

    /// Measure `text`
    pub fn measure(&self, text: &str) -> Result<f64> {
        let value = match self {
            LengthMeasure::Bytes => text.len(),
            LengthMeasure::Docs => 1,
            LengthMeasure::Chars => char_len(text),
            LengthMeasure::CharsStripped => char_len(text.trim()),
            LengthMeasure::WordPunct(pattern) => pattern.find_iter(text).count(),
            LengthMeasure::UnicodeWords => text
                .trim()
                .split_word_bounds()
                .filter(|w| !w.trim().is_empty())
                .count(),
            LengthMeasure::Subword(tokenizer) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0
                } else {
                    tokenizer.count(trimmed)?
                }
            }
        };
        Ok(value as f64)
    }
}

/// One span over the whole document
#[derive(Debug, Clone)]
pub struct DocumentLengthTagger {
    kind: &'static str,
    measure: LengthMeasure,
}

impl DocumentLengthTagger {
    /// Emit spans of type `kind` scored by `measure`
    pub fn new(kind: &'static str, measure: LengthMeasure) -> Self {
        Self { kind, measure }
    }
}

impl Tagger for DocumentLengthTagger {
    fn predict<'d>(&self, doc: &'d Document) -> Result<DocResult<'d>> {
        let score = self.measure.measure(doc.text())?;
        Ok(DocResult::with_spans(
            doc,
            vec![Span::with_score(0, doc.char_len(), self.kind, score)],
        ))
    }
}

/// One span per paragraph plus a summed document span
#[derive(Debug, Clone)]
pub struct ParagraphLengthTagger {
    measure: LengthMeasure,
    remove_empty: bool,
    include_negative: bool,
}

impl ParagraphLengthTagger {
    /// Paragraph counter
    pub fn new(measure: LengthMeasure, remove_empty: bool, include_negative: bool) -> Self {
        Self {
            measure,
            remove_empty,
            include_negative,
        }
    }
}

impl Tagger for ParagraphLengthTagger {
    fn predict<'d>(&self, doc: &'d Document) -> Result<DocResult<'d>> {
        let paragraphs = split_paragraphs(doc.text(), self.remove_empty);
        let mut result = DocResult::new(doc);
        let mut total = 0.0;

        for paragraph in &paragraphs {
            let score = self.measure.measure(paragraph.text())?;
            let span = Span::with_score(paragraph.start(), paragraph.end(), "paragraph", score);
            if self.include_negative {
                let negative = span.negated("negative_paragraph");
                result.push(span);
                result.push(negative);
            } else {
                result.push(span);
            }
            total += score;
        }

        let document = Span::with_score(0, doc.char_len(), "document", total);
        if self.include_negative {
            let negative = document.negated("negative_document");
            result.push(document);
            result.push(negative);
        } else {
            result.push(document);
        }
        Ok(result)
    }
}

/// Options of the length signals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LengthOptions {
    /// Drop whitespace-only paragraphs; paragraph signals only
    pub remove_empty: Option<bool>,
    /// Emit negated companion spans; paragraph signals only
    pub include_negative: Option<bool>,
    /// Tokenizer name; subword signals only
    pub tokenizer: Option<String>,
}

/// Measure selected by a length signal's registry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MeasureKind {
    Bytes,
    Docs,
    Chars,
    CharsStripped,
    WordPunct,
    UnicodeWords,
    Subword,
}

/// Scope and defaults of a length signal's registry entry
#[derive(Debug, Clone, Copy)]
pub(crate) enum LengthScope {
    Document(&'static str),
    Paragraphs {
        remove_empty: bool,
        include_negative: bool,
    },
}

pub(crate) fn build_length(
    signal: &str,
    context: &TaggerContext,
    options: &Options,
    kind: MeasureKind,
    scope: LengthScope,
) -> Result<Box<dyn Tagger>> {
    let options: LengthOptions = parse_options(signal, options)?;

    if options.tokenizer.is_some() && kind != MeasureKind::Subword {
        return Err(SignalError::invalid_options(
            signal,
            "`tokenizer` only applies to subword length signals",
        ));
    }

    let measure = match kind {
        MeasureKind::Bytes => LengthMeasure::Bytes,
        MeasureKind::Docs => LengthMeasure::Docs,
        MeasureKind::Chars => LengthMeasure::Chars,
        MeasureKind::CharsStripped => LengthMeasure::CharsStripped,
        MeasureKind::WordPunct => LengthMeasure::word_punct()?,
        MeasureKind::UnicodeWords => LengthMeasure::UnicodeWords,
        MeasureKind::Subword => LengthMeasure::Subword(
            context.tokenizer(options.tokenizer.as_deref().unwrap_or("unicode_words"))?,
        ),
    };

    match scope {
        LengthScope::Document(span_kind) => {
            if options.remove_empty.is_some() || options.include_negative.is_some() {
                return Err(SignalError::invalid_options(
                    signal,
                    "`remove_empty` and `include_negative` only apply to paragraph signals",
                ));
            }
            Ok(Box::new(DocumentLengthTagger::new(span_kind, measure)))
        }
        LengthScope::Paragraphs {
            remove_empty,
            include_negative,
        } => Ok(Box::new(ParagraphLengthTagger::new(
            measure,
            options.remove_empty.unwrap_or(remove_empty),
            options.include_negative.unwrap_or(include_negative),
        ))),
    }
}
