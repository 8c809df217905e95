//! Repetition statistics in the style of the Gopher quality rules
//!
//! The statistics are computed over the token sequence produced by an
//! injected [`SubwordTokenizer`]. For every window size `n` in `2..=10` the
//! contiguous token n-grams are counted, each occurrence weighted by the
//! summed character length of its tokens:
//!
//! - for `n` in `2..=4` the weight of the single most frequent n-gram,
//! - for `n` in `5..=10` the weight of every n-gram seen more than once,
//!
//! both divided by the total weight of all n-grams of that size. Overlapping
//! windows share tokens, so a token can be counted once per window it
//! appears in.

use crate::context::TaggerContext;
use crate::error::Result;
use crate::options::{parse_options, Options};
use crate::tagger::Tagger;
use crate::tokenize::{SubwordTokenizer, Token};
use serde::{Deserialize, Serialize};
use spanmark_model::{char_len, split_lines, DocResult, Document, LineSplit, Span};
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tracing::debug;

/// Window sizes reported as "most common n-gram" fractions
pub const MOST_COMMON_WINDOWS: RangeInclusive<usize> = 2..=4;

/// Window sizes reported as "duplicate n-gram" fractions
pub const DUPLICATE_WINDOWS: RangeInclusive<usize> = 5..=10;

/// Document-level repetition statistics
#[derive(Debug, Clone, PartialEq)]
pub struct GopherStatistics {
    /// Raw document length in characters
    pub character_count: usize,
    /// Number of tokens
    pub token_count: usize,
    /// Median token length in characters
    pub median_token_length: f64,
    /// Share of tokens containing a letter or digit
    pub fraction_of_tokens_with_alpha_character: f64,
    /// `(n, fraction)` for each window size in [`MOST_COMMON_WINDOWS`]
    pub most_common_ngram_fractions: Vec<(usize, f64)>,
    /// `(n, fraction)` for each window size in [`DUPLICATE_WINDOWS`]
    pub duplicate_ngram_fractions: Vec<(usize, f64)>,
    /// Share of lines that occur more than once
    pub fraction_of_duplicate_lines: f64,
    /// Characters in repeated lines over characters in tokens
    pub fraction_of_characters_in_duplicate_lines: f64,
}

impl GopherStatistics {
    /// All-zero statistics for a text of `character_count` characters
    pub fn empty(character_count: usize) -> Self {
        Self {
            character_count,
            token_count: 0,
            median_token_length: 0.0,
            fraction_of_tokens_with_alpha_character: 0.0,
            most_common_ngram_fractions: MOST_COMMON_WINDOWS.map(|n| (n, 0.0)).collect(),
            duplicate_ngram_fractions: DUPLICATE_WINDOWS.map(|n| (n, 0.0)).collect(),
            fraction_of_duplicate_lines: 0.0,
            fraction_of_characters_in_duplicate_lines: 0.0,
        }
    }

    /// Compute the statistics of `text` given its tokens.
    ///
    /// `lines` selects how the text is split for the line duplication
    /// fractions.
    pub fn compute(text: &str, tokens: &[Token], lines: LineSplit) -> Self {
        let character_count = char_len(text);
        let mut stats = Self::empty(character_count);
        if character_count == 0 {
            return stats;
        }

        let lengths: Vec<usize> = tokens.iter().map(|t| t.char_len).collect();
        let token_chars: usize = lengths.iter().sum();

        stats.token_count = tokens.len();
        stats.median_token_length = median(&lengths);
        stats.fraction_of_tokens_with_alpha_character = tokens
            .iter()
            .filter(|t| t.text.chars().any(char::is_alphanumeric))
            .count() as f64
            / tokens.len().max(1) as f64;

        let ngrams = NgramIndex::new(tokens);
        stats.most_common_ngram_fractions = MOST_COMMON_WINDOWS
            .map(|n| (n, ngrams.most_common_fraction(n)))
            .collect();
        stats.duplicate_ngram_fractions = DUPLICATE_WINDOWS
            .map(|n| (n, ngrams.duplicate_fraction(n)))
            .collect();

        let (duplicate_lines, duplicate_line_fraction) = line_duplication(text, lines, token_chars);
        stats.fraction_of_duplicate_lines = duplicate_lines;
        stats.fraction_of_characters_in_duplicate_lines = duplicate_line_fraction;
        stats
    }

    /// Document-scoped spans, one per statistic
    pub fn to_spans(&self) -> Vec<Span> {
        let end = self.character_count;
        let mut spans = Vec::with_capacity(15);

        for (n, value) in &self.most_common_ngram_fractions {
            spans.push(Span::with_score(
                0,
                end,
                format!("fraction_of_characters_in_most_common_{n}grams"),
                *value,
            ));
        }
        for (n, value) in &self.duplicate_ngram_fractions {
            spans.push(Span::with_score(
                0,
                end,
                format!("fraction_of_characters_in_duplicate_{n}grams"),
                *value,
            ));
        }

        spans.extend([
            Span::with_score(0, end, "character_count", self.character_count as f64),
            Span::with_score(0, end, "token_count", self.token_count as f64),
            Span::with_score(0, end, "median_token_length", self.median_token_length),
            Span::with_score(
                0,
                end,
                "fraction_of_tokens_with_alpha_character",
                self.fraction_of_tokens_with_alpha_character,
            ),
            Span::with_score(
                0,
                end,
                "fraction_of_duplicate_lines",
                self.fraction_of_duplicate_lines,
            ),
            Span::with_score(
                0,
                end,
                "fraction_of_characters_in_duplicate_lines",
                self.fraction_of_characters_in_duplicate_lines,
            ),
        ]);
        spans
    }
}

/// Median with the even-count midpoint averaged; 0.0 for no values
fn median(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    }
}

/// Token texts plus prefix sums of their character lengths
struct NgramIndex<'t> {
    texts: Vec<&'t str>,
    prefix: Vec<usize>,
}

/// Occurrence count and first window index of one n-gram
#[derive(Clone, Copy)]
struct NgramTally {
    count: usize,
    first: usize,
}

impl<'t> NgramIndex<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        let mut prefix = Vec::with_capacity(tokens.len() + 1);
        prefix.push(0);
        let mut total = 0;
        for token in tokens {
            total += token.char_len;
            prefix.push(total);
        }
        Self {
            texts: tokens.iter().map(|t| t.text.as_str()).collect(),
            prefix,
        }
    }

    /// Character weight of the window of size `n` starting at token `start`
    fn weight(&self, start: usize, n: usize) -> usize {
        self.prefix[start + n] - self.prefix[start]
    }

    fn window_count(&self, n: usize) -> usize {
        (self.texts.len() + 1).saturating_sub(n)
    }

    fn total_weight(&self, n: usize) -> usize {
        (0..self.window_count(n)).map(|i| self.weight(i, n)).sum()
    }

    fn tally(&self, n: usize) -> HashMap<&[&'t str], NgramTally> {
        let mut counts: HashMap<&[&'t str], NgramTally> = HashMap::new();
        for (index, window) in self.texts.windows(n).enumerate() {
            counts
                .entry(window)
                .and_modify(|tally| tally.count += 1)
                .or_insert(NgramTally {
                    count: 1,
                    first: index,
                });
        }
        counts
    }

    fn most_common_fraction(&self, n: usize) -> f64 {
        if self.window_count(n) == 0 {
            return 0.0;
        }

        // Ties go to the n-gram that appears first.
        let best = self
            .tally(n)
            .into_values()
            .max_by(|a, b| a.count.cmp(&b.count).then(b.first.cmp(&a.first)));

        match best {
            Some(tally) => {
                let weight = tally.count * self.weight(tally.first, n);
                weight as f64 / self.total_weight(n).max(1) as f64
            }
            None => 0.0,
        }
    }

    fn duplicate_fraction(&self, n: usize) -> f64 {
        if self.window_count(n) == 0 {
            return 0.0;
        }

        let counts = self.tally(n);
        let duplicated: usize = self
            .texts
            .windows(n)
            .enumerate()
            .filter(|(_, window)| counts.get(window).is_some_and(|t| t.count > 1))
            .map(|(index, _)| self.weight(index, n))
            .sum();

        duplicated as f64 / self.total_weight(n).max(1) as f64
    }
}

/// `(fraction of duplicate lines, fraction of characters in duplicate lines)`
fn line_duplication(text: &str, policy: LineSplit, token_chars: usize) -> (f64, f64) {
    let lines = split_lines(text, policy);
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for line in &lines {
        *counts.entry(line.text()).or_default() += 1;
    }

    let mut duplicate_lines = 0;
    let mut duplicate_chars = 0;
    for (line, count) in counts {
        if count > 1 {
            duplicate_lines += count;
            duplicate_chars += char_len(line) * count;
        }
    }

    (
        duplicate_lines as f64 / lines.len().max(1) as f64,
        duplicate_chars as f64 / token_chars.max(1) as f64,
    )
}

/// Options of the repetition signals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GopherOptions {
    /// Tokenizer name; `unicode_words` when unset
    pub tokenizer: Option<String>,
    /// Collapse runs of newlines before counting duplicate lines
    pub ignore_empty_lines: Option<bool>,
}

/// Repetition statistics signal
pub struct GopherTagger {
    tokenizer: Arc<dyn SubwordTokenizer>,
    lines: LineSplit,
}

impl GopherTagger {
    /// Build with an explicit tokenizer and line policy
    pub fn new(tokenizer: Arc<dyn SubwordTokenizer>, lines: LineSplit) -> Self {
        Self { tokenizer, lines }
    }
}

impl std::fmt::Debug for GopherTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GopherTagger")
            .field("tokenizer", &self.tokenizer.name())
            .field("lines", &self.lines)
            .finish()
    }
}

impl Tagger for GopherTagger {
    fn predict<'d>(&self, doc: &'d Document) -> Result<DocResult<'d>> {
        let stats = if doc.is_empty() {
            GopherStatistics::empty(0)
        } else {
            let tokens = self.tokenizer.tokenize(doc.text())?;
            GopherStatistics::compute(doc.text(), &tokens, self.lines)
        };
        Ok(DocResult::with_spans(doc, stats.to_spans()))
    }
}

pub(crate) fn build_gopher(
    signal: &str,
    context: &TaggerContext,
    options: &Options,
    ignore_empty_lines: bool,
) -> Result<Box<dyn Tagger>> {
    let options: GopherOptions = parse_options(signal, options)?;
    let tokenizer = context.tokenizer(options.tokenizer.as_deref().unwrap_or("unicode_words"))?;
    let lines = if options.ignore_empty_lines.unwrap_or(ignore_empty_lines) {
        LineSplit::CollapseBlank
    } else {
        LineSplit::Verbatim
    };
    debug!(signal, tokenizer = tokenizer.name(), ?lines, "configured repetition signal");
    Ok(Box::new(GopherTagger::new(tokenizer, lines)))
}
