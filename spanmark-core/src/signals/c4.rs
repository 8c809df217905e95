//! Lexical heuristics in the style of the C4 and mC4 cleaning rules
//!
//! Two independent profiles share the document-level checks (banned
//! content and markup markers):
//!
//! - [`C4Tagger`] flags every physical line that lacks terminal punctuation
//!   or has too few words, and counts lines.
//! - [`LongLineTagger`] counts only long lines and flags documents with too
//!   few of them.

use crate::context::TaggerContext;
use crate::error::Result;
use crate::language::{LanguageConfig, DEFAULT_LANGUAGE};
use crate::options::{parse_options, Options};
use crate::tagger::Tagger;
use crate::wordlist::BannedContent;
use serde::{Deserialize, Serialize};
use spanmark_model::{split_lines, DocResult, Document, LineSplit, Span};
use tracing::debug;

/// How the `javascript` marker is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JavascriptMatch {
    /// A whitespace-delimited token equal to `javascript`
    Token,
    /// `javascript` anywhere in the text
    Substring,
}

/// Which markup and boilerplate markers are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    /// A literal `{`
    pub curly_brace: bool,
    /// The phrase `lorem ipsum`
    pub lorem_ipsum: bool,
    /// The word `javascript`
    pub javascript: bool,
}

impl Markers {
    /// Every marker enabled
    pub fn all() -> Self {
        Self {
            curly_brace: true,
            lorem_ipsum: true,
            javascript: true,
        }
    }

    /// Every marker disabled
    pub fn none() -> Self {
        Self {
            curly_brace: false,
            lorem_ipsum: false,
            javascript: false,
        }
    }
}

/// Marker switches as written in options; unset switches keep the
/// profile's default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerOptions {
    /// Report a literal `{`
    pub curly_brace: Option<bool>,
    /// Report `lorem ipsum`
    pub lorem_ipsum: Option<bool>,
    /// Report `javascript`
    pub javascript: Option<bool>,
}

impl MarkerOptions {
    /// Fill unset switches from `defaults`
    pub fn resolve(self, defaults: Markers) -> Markers {
        Markers {
            curly_brace: self.curly_brace.unwrap_or(defaults.curly_brace),
            lorem_ipsum: self.lorem_ipsum.unwrap_or(defaults.lorem_ipsum),
            javascript: self.javascript.unwrap_or(defaults.javascript),
        }
    }
}

/// Options of the per-line profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct C4Options {
    /// Language whose configuration and word list are used
    pub language: String,
    /// Marker switches; all markers are on unless disabled
    pub markers: MarkerOptions,
    /// Overrides the variant's `javascript` matching rule
    pub javascript_match: Option<JavascriptMatch>,
}

impl Default for C4Options {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            markers: MarkerOptions::default(),
            javascript_match: None,
        }
    }
}

/// Options of the long-line profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LongLineOptions {
    /// Language whose word list is used
    pub language: String,
    /// Lines shorter than this many characters are ignored
    pub min_line_length: usize,
    /// Documents with fewer long lines are flagged
    pub min_long_lines: usize,
    /// Marker switches; all markers are off unless enabled
    pub markers: MarkerOptions,
}

impl Default for LongLineOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            min_line_length: 200,
            min_long_lines: 3,
            markers: MarkerOptions::default(),
        }
    }
}

/// Document-level checks shared by both profiles
#[derive(Debug, Clone)]
struct DocumentChecks {
    banned: BannedContent,
    markers: Markers,
    javascript_match: JavascriptMatch,
}

impl DocumentChecks {
    fn apply(&self, lowered: &str, char_count: usize, spans: &mut Vec<Span>) {
        if self.markers.curly_brace && lowered.contains('{') {
            spans.push(Span::new(0, char_count, "has_curly_brace"));
        }

        if self.markers.lorem_ipsum && lowered.contains("lorem ipsum") {
            spans.push(Span::new(0, char_count, "has_lorem_ipsum"));
        }

        if self.markers.javascript {
            let found = match self.javascript_match {
                JavascriptMatch::Token => lowered.split_whitespace().any(|w| w == "javascript"),
                JavascriptMatch::Substring => lowered.contains("javascript"),
            };
            if found {
                spans.push(Span::new(0, char_count, "has_javascript"));
            }
        }

        if self.banned.matches(lowered) {
            spans.push(Span::new(0, char_count, "has_naughty_word"));
        }
    }
}

/// Per-line punctuation and word-count profile
#[derive(Debug, Clone)]
pub struct C4Tagger {
    checks: DocumentChecks,
    config: LanguageConfig,
    check_word_count: bool,
}

impl C4Tagger {
    /// Build the profile from resolved collaborators
    pub fn new(
        banned: BannedContent,
        config: LanguageConfig,
        markers: Markers,
        javascript_match: JavascriptMatch,
        spaceless: bool,
    ) -> Self {
        Self {
            checks: DocumentChecks {
                banned,
                markers,
                javascript_match,
            },
            config,
            check_word_count: !spaceless,
        }
    }

    /// Build from options, with `javascript_match` defaulting to `default_match`
    pub fn from_options(
        context: &TaggerContext,
        options: &C4Options,
        default_match: JavascriptMatch,
    ) -> Self {
        let languages = context.languages();
        let config = languages.config(&options.language);
        let spaceless = languages.is_spaceless(&options.language);
        debug!(
            language = %options.language,
            spaceless,
            min_words = config.min_words_per_line,
            "configured per-line profile"
        );

        Self::new(
            context.word_lists().banned_content(&options.language),
            config,
            options.markers.resolve(Markers::all()),
            options.javascript_match.unwrap_or(default_match),
            spaceless,
        )
    }
}

impl Tagger for C4Tagger {
    fn predict<'d>(&self, doc: &'d Document) -> Result<DocResult<'d>> {
        let char_count = doc.char_len();
        let mut spans = Vec::new();

        self.checks
            .apply(&doc.text().to_lowercase(), char_count, &mut spans);

        let lines = split_lines(doc.text(), LineSplit::Verbatim);
        let line_count = lines.len();

        for (index, line) in lines.iter().enumerate() {
            // The newline belongs to the line it terminates.
            let end = if index + 1 < line_count {
                line.end() + 1
            } else {
                line.end()
            };
            let content = line.text().trim();

            if !self.config.ends_with_eol_punctuation(content) {
                spans.push(Span::new(
                    line.start(),
                    end,
                    "lines_with_no_ending_punctuation",
                ));
            }

            if self.check_word_count
                && content.split_whitespace().count() < self.config.min_words_per_line
            {
                spans.push(Span::new(line.start(), end, "lines_with_too_few_words"));
            }
        }

        spans.push(Span::with_score(
            0,
            char_count,
            "line_count",
            line_count as f64,
        ));
        Ok(DocResult::with_spans(doc, spans))
    }
}

/// Long-line profile
#[derive(Debug, Clone)]
pub struct LongLineTagger {
    checks: DocumentChecks,
    min_line_length: usize,
    min_long_lines: usize,
}

impl LongLineTagger {
    /// Build from options
    pub fn from_options(context: &TaggerContext, options: &LongLineOptions) -> Self {
        Self {
            checks: DocumentChecks {
                banned: context.word_lists().banned_content(&options.language),
                markers: options.markers.resolve(Markers::none()),
                javascript_match: JavascriptMatch::Substring,
            },
            min_line_length: options.min_line_length,
            min_long_lines: options.min_long_lines,
        }
    }
}

impl Tagger for LongLineTagger {
    fn predict<'d>(&self, doc: &'d Document) -> Result<DocResult<'d>> {
        let char_count = doc.char_len();
        let mut spans = Vec::new();

        let long_lines = split_lines(doc.text(), LineSplit::Verbatim)
            .iter()
            .filter(|line| line.char_len() >= self.min_line_length)
            .count();

        if long_lines < self.min_long_lines {
            spans.push(Span::new(0, char_count, "filtered_by_line_length"));
        }

        self.checks
            .apply(&doc.text().to_lowercase(), char_count, &mut spans);

        spans.push(Span::with_score(
            0,
            char_count,
            "line_count",
            long_lines as f64,
        ));
        Ok(DocResult::with_spans(doc, spans))
    }
}

pub(crate) fn build_c4(
    signal: &str,
    context: &TaggerContext,
    options: &Options,
    default_match: JavascriptMatch,
) -> Result<Box<dyn Tagger>> {
    let options: C4Options = parse_options(signal, options)?;
    Ok(Box::new(C4Tagger::from_options(
        context,
        &options,
        default_match,
    )))
}

pub(crate) fn build_long_line(
    signal: &str,
    context: &TaggerContext,
    options: &Options,
) -> Result<Box<dyn Tagger>> {
    let options: LongLineOptions = parse_options(signal, options)?;
    Ok(Box::new(LongLineTagger::from_options(context, &options)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagger(banned: &str, markers: Markers, javascript_match: JavascriptMatch) -> C4Tagger {
        C4Tagger::new(
            BannedContent::parse(banned),
            LanguageConfig::default(),
            markers,
            javascript_match,
            false,
        )
    }

    fn spans_of<'a>(result: &'a DocResult<'_>, kind: &'a str) -> Vec<(usize, usize)> {
        result
            .spans_of_type(kind)
            .map(|s| (s.start(), s.end()))
            .collect()
    }

    #[test]
    fn test_hello_world_scenario() {
        let doc = Document::new("d", "Hello world.\nShort\n");
        let result = tagger("", Markers::all(), JavascriptMatch::Token)
            .predict(&doc)
            .unwrap();

        assert_eq!(
            spans_of(&result, "lines_with_no_ending_punctuation"),
            vec![(13, 19), (19, 19)]
        );
        assert_eq!(
            spans_of(&result, "lines_with_too_few_words"),
            vec![(0, 13), (13, 19), (19, 19)]
        );
        assert_eq!(result.total_score("line_count"), 3.0);
    }

    #[test]
    fn test_last_line_without_newline() {
        let doc = Document::new("d", "One two three.\nfour five six");
        let result = tagger("", Markers::all(), JavascriptMatch::Token)
            .predict(&doc)
            .unwrap();
        assert_eq!(
            spans_of(&result, "lines_with_no_ending_punctuation"),
            vec![(15, 28)]
        );
        assert!(spans_of(&result, "lines_with_too_few_words").is_empty());
        assert_eq!(result.total_score("line_count"), 2.0);
    }

    #[test]
    fn test_trailing_whitespace_is_ignored() {
        let doc = Document::new("d", "This line ends well.   ");
        let result = tagger("", Markers::all(), JavascriptMatch::Token)
            .predict(&doc)
            .unwrap();
        assert!(spans_of(&result, "lines_with_no_ending_punctuation").is_empty());
    }

    #[test]
    fn test_spaceless_language_skips_word_count() {
        let tagger = C4Tagger::new(
            BannedContent::default(),
            LanguageConfig::default(),
            Markers::all(),
            JavascriptMatch::Token,
            true,
        );
        let doc = Document::new("d", "短い.");
        let result = tagger.predict(&doc).unwrap();
        assert!(spans_of(&result, "lines_with_too_few_words").is_empty());
    }

    #[test]
    fn test_banned_content_is_case_insensitive() {
        let doc = Document::new("d", "Some BADWORD here.");
        let result = tagger("badword\n", Markers::all(), JavascriptMatch::Token)
            .predict(&doc)
            .unwrap();
        assert_eq!(spans_of(&result, "has_naughty_word"), vec![(0, 18)]);
    }

    #[test]
    fn test_banned_phrase_inside_word() {
        let doc = Document::new("d", "xxbad phraseyy");
        let result = tagger("bad phrase\n", Markers::all(), JavascriptMatch::Token)
            .predict(&doc)
            .unwrap();
        assert_eq!(result.spans_of_type("has_naughty_word").count(), 1);
    }

    #[test]
    fn test_javascript_matching_rules() {
        let doc = Document::new("d", "Please enable JavaScript.");
        let token = tagger("", Markers::all(), JavascriptMatch::Token)
            .predict(&doc)
            .unwrap();
        // "javascript." is not the bare token
        assert_eq!(token.spans_of_type("has_javascript").count(), 0);

        let substring = tagger("", Markers::all(), JavascriptMatch::Substring)
            .predict(&doc)
            .unwrap();
        assert_eq!(substring.spans_of_type("has_javascript").count(), 1);
    }

    #[test]
    fn test_markers_can_be_disabled() {
        let doc = Document::new("d", "{ lorem ipsum javascript }");
        let all = tagger("", Markers::all(), JavascriptMatch::Token)
            .predict(&doc)
            .unwrap();
        assert_eq!(all.spans_of_type("has_curly_brace").count(), 1);
        assert_eq!(all.spans_of_type("has_lorem_ipsum").count(), 1);
        assert_eq!(all.spans_of_type("has_javascript").count(), 1);

        let markers = Markers {
            lorem_ipsum: false,
            ..Markers::all()
        };
        let some = tagger("", markers, JavascriptMatch::Token)
            .predict(&doc)
            .unwrap();
        assert_eq!(some.spans_of_type("has_lorem_ipsum").count(), 0);
        assert_eq!(some.spans_of_type("has_curly_brace").count(), 1);
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new("d", "");
        let result = tagger("", Markers::all(), JavascriptMatch::Token)
            .predict(&doc)
            .unwrap();
        assert_eq!(result.total_score("line_count"), 1.0);
        assert_eq!(spans_of(&result, "lines_with_too_few_words"), vec![(0, 0)]);
    }

    #[test]
    fn test_long_line_profile() {
        let long = "a".repeat(200);
        let text = format!("{long}\nshort\n{long}");
        let doc = Document::new("d", text);

        let tagger = LongLineTagger::from_options(&TaggerContext::new(), &LongLineOptions::default());
        let result = tagger.predict(&doc).unwrap();
        assert_eq!(result.spans_of_type("filtered_by_line_length").count(), 1);
        assert_eq!(result.total_score("line_count"), 2.0);
        assert_eq!(result.spans_of_type("has_curly_brace").count(), 0);

        let options = LongLineOptions {
            min_long_lines: 2,
            ..LongLineOptions::default()
        };
        let tagger = LongLineTagger::from_options(&TaggerContext::new(), &options);
        let result = tagger.predict(&doc).unwrap();
        assert_eq!(result.spans_of_type("filtered_by_line_length").count(), 0);
    }

    #[test]
    fn test_options_from_table() {
        let table: Options = toml::from_str(
            r#"
            language = "es"
            javascript_match = "substring"

            [markers]
            curly_brace = false
            "#,
        )
        .unwrap();
        let options: C4Options = parse_options("c4_v1", &table).unwrap();
        assert_eq!(options.language, "es");
        assert_eq!(options.javascript_match, Some(JavascriptMatch::Substring));
        let markers = options.markers.resolve(Markers::all());
        assert!(!markers.curly_brace);
        assert!(markers.javascript);
        assert!(markers.lorem_ipsum);
    }

    #[test]
    fn test_partial_markers_keep_long_line_defaults() {
        let table: Options = toml::from_str(
            r#"
            [markers]
            curly_brace = true
            "#,
        )
        .unwrap();
        let options: LongLineOptions = parse_options("mc4", &table).unwrap();
        assert_eq!(
            options.markers.resolve(Markers::none()),
            Markers {
                curly_brace: true,
                ..Markers::none()
            }
        );

        let tagger = LongLineTagger::from_options(&TaggerContext::new(), &options);
        let doc = Document::new("d", "{ lorem ipsum javascript }");
        let result = tagger.predict(&doc).unwrap();
        assert_eq!(result.spans_of_type("has_curly_brace").count(), 1);
        assert_eq!(result.spans_of_type("has_lorem_ipsum").count(), 0);
        assert_eq!(result.spans_of_type("has_javascript").count(), 0);
    }
}
