//! Paragraphs made of nothing but punctuation and symbols

use crate::context::TaggerContext;
use crate::error::{Result, SignalError};
use crate::language::{DEFAULT_ALPHANUM_PATTERN, DEFAULT_LANGUAGE};
use crate::options::{parse_options, Options};
use crate::tagger::Tagger;
use regex::Regex;
use serde::{Deserialize, Serialize};
use spanmark_model::{split_paragraphs, DocResult, Document, Span};
use tracing::warn;

const ALL_PUNCT_PATTERN: &str = concat!(
    r"^(\p{P}|\s|[",
    r"\x{1F300}-\x{1F64F}",
    r"\x{1F680}-\x{1F6FF}",
    r"\x{2600}-\x{26FF}\x{2700}-\x{27BF}",
    r"]+)+$"
);

/// Options of the punctuation signal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PunctuationOptions {
    /// Language whose alphanumeric pattern is used
    pub language: String,
}

impl Default for PunctuationOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Flags paragraphs with no letters or digits that are only punctuation,
/// whitespace and pictographs.
///
/// Emits one `all_punct` span per such paragraph, or a single
/// document-scoped `all_punct` span scored 0 when there is none.
#[derive(Debug, Clone)]
pub struct PunctuationTagger {
    has_alphanum: Regex,
    all_punct: Regex,
}

impl PunctuationTagger {
    /// Build with the given alphanumeric pattern
    pub fn new(alphanum_pattern: &str) -> Result<Self> {
        let has_alphanum = match Regex::new(alphanum_pattern) {
            Ok(regex) => regex,
            Err(e) => {
                warn!("invalid alphanumeric pattern '{alphanum_pattern}' ({e}); using the default");
                Regex::new(DEFAULT_ALPHANUM_PATTERN).map_err(pattern_error)?
            }
        };

        Ok(Self {
            has_alphanum,
            all_punct: Regex::new(ALL_PUNCT_PATTERN).map_err(pattern_error)?,
        })
    }
}

fn pattern_error(e: regex::Error) -> SignalError {
    SignalError::Configuration(format!("invalid punctuation pattern: {e}"))
}

impl Tagger for PunctuationTagger {
    fn predict<'d>(&self, doc: &'d Document) -> Result<DocResult<'d>> {
        let mut spans: Vec<Span> = split_paragraphs(doc.text(), true)
            .into_iter()
            .filter(|p| !self.has_alphanum.is_match(p.text()) && self.all_punct.is_match(p.text()))
            .map(|p| Span::new(p.start(), p.end(), "all_punct"))
            .collect();

        if spans.is_empty() {
            spans.push(Span::with_score(0, doc.char_len(), "all_punct", 0.0));
        }
        Ok(DocResult::with_spans(doc, spans))
    }
}

pub(crate) fn build_punctuation(
    signal: &str,
    context: &TaggerContext,
    options: &Options,
) -> Result<Box<dyn Tagger>> {
    let options: PunctuationOptions = parse_options(signal, options)?;
    let config = context.languages().config(&options.language);
    Ok(Box::new(PunctuationTagger::new(&config.alphanum_pattern)?))
}
