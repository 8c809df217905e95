//! Repeated-content spans
//!
//! Two detectors share one output shape. The character detector finds a
//! unit of text followed by at least three more copies of itself, each copy
//! optionally preceded by one whitespace character. The token detector finds
//! runs of tokens that repeat with a fixed period. Every hit becomes a
//! `repetition` span; three document aggregates summarize them.

use crate::context::TaggerContext;
use crate::error::{Result, SignalError};
use crate::options::{parse_options, Options};
use crate::tagger::Tagger;
use crate::tokenize::{SubwordTokenizer, Token};
use serde::{Deserialize, Serialize};
use spanmark_model::{split_paragraphs, DocResult, Document, Span};
use std::cmp::Reverse;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Copies of a character unit required after its first occurrence
const MIN_CHAR_REPEATS: usize = 3;

/// Full periods a token sequence must span
pub const MIN_TOKEN_TIMES: usize = 3;

/// Default shortest token period
pub const DEFAULT_MIN_PERIOD: usize = 1;

/// Default longest token period
pub const DEFAULT_MAX_PERIOD: usize = 13;

/// A run of `times` full periods over `items[start..end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicSequence {
    /// First item of the run
    pub start: usize,
    /// One past the last item of the run
    pub end: usize,
    /// Period length in items
    pub period: usize,
    /// Number of full periods
    pub times: usize,
}

fn repeats<T: PartialEq>(items: &[T], covered: &[bool], j: usize, period: usize) -> bool {
    items[j] == items[j + period] && !covered[j] && !covered[j + period]
}

/// Find runs where `items[j] == items[j + period]` spanning at least
/// `min_times` full periods.
///
/// Periods are tried from shortest to longest; items claimed by a shorter
/// period are not reused by a longer one. Results are ordered by start.
pub fn find_periodic_sequences<T: PartialEq>(
    items: &[T],
    min_period: usize,
    max_period: usize,
    min_times: usize,
) -> Vec<PeriodicSequence> {
    let n = items.len();
    let mut covered = vec![false; n];
    let mut found = Vec::new();

    for period in min_period.max(1)..=max_period {
        let mut i = 0;
        while i + period < n {
            if !repeats(items, &covered, i, period) {
                i += 1;
                continue;
            }

            let mut j = i;
            while j + period < n && repeats(items, &covered, j, period) {
                j += 1;
            }

            let times = (j - i + period) / period;
            if times >= min_times.max(2) {
                let end = i + times * period;
                covered[i..end].iter_mut().for_each(|c| *c = true);
                found.push(PeriodicSequence {
                    start: i,
                    end,
                    period,
                    times,
                });
                i = end;
            } else {
                i = j.max(i + 1);
            }
        }
    }

    found.sort_by_key(|s| (s.start, s.end));
    found
}

/// A detected repetition in character offsets
#[derive(Debug, Clone, Copy, PartialEq)]
struct Repetition {
    start: usize,
    end: usize,
    score: f64,
}

impl Repetition {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn shifted(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            ..self
        }
    }
}

/// End of the repetition of the shortest unit starting at `i`, and the
/// unit's length
fn char_repetition_at(chars: &[char], i: usize) -> Option<(usize, usize)> {
    let n = chars.len();
    let mut len = 1;

    while i + len * (MIN_CHAR_REPEATS + 1) <= n {
        if chars[i + len - 1] == '\n' {
            return None;
        }

        let unit = &chars[i..i + len];
        let mut pos = i + len;
        let mut copies = 0;
        loop {
            if pos < n && chars[pos].is_whitespace() && chars[pos + 1..].starts_with(unit) {
                pos += 1 + len;
            } else if chars[pos..].starts_with(unit) {
                pos += len;
            } else {
                break;
            }
            copies += 1;
        }

        if copies >= MIN_CHAR_REPEATS {
            return Some((pos, len));
        }
        len += 1;
    }
    None
}

/// Non-overlapping character repetitions, scanned left to right.
///
/// The score is the number of non-overlapping occurrences of the unit in
/// the matched text.
fn find_char_repetitions(text: &str) -> Vec<Repetition> {
    let chars: Vec<char> = text.chars().collect();
    let mut found = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match char_repetition_at(&chars, i) {
            Some((end, len)) => {
                let unit: String = chars[i..i + len].iter().collect();
                let matched: String = chars[i..end].iter().collect();
                found.push(Repetition {
                    start: i,
                    end,
                    score: matched.matches(unit.as_str()).count() as f64,
                });
                i = end;
            }
            None => i += 1,
        }
    }
    found
}

/// Character offsets of each token, located in order within `text`.
///
/// A token that cannot be found is placed, empty, at the current position.
fn token_offsets(text: &str, tokens: &[Token]) -> Vec<(usize, usize)> {
    let mut offsets = Vec::with_capacity(tokens.len());
    let mut byte_cursor = 0;
    let mut char_cursor = 0;

    for token in tokens {
        match text[byte_cursor..].find(token.text.as_str()) {
            Some(found) if !token.text.is_empty() => {
                let start = char_cursor + text[byte_cursor..byte_cursor + found].chars().count();
                byte_cursor += found + token.text.len();
                char_cursor = start + token.char_len;
                offsets.push((start, char_cursor));
            }
            _ => offsets.push((char_cursor, char_cursor)),
        }
    }
    offsets
}

/// What counts as a repeated unit
#[derive(Clone)]
pub enum RepetitionUnit {
    /// Runs of characters
    Characters,
    /// Periodic runs of tokens
    Tokens {
        /// Tokenizer producing the sequence
        tokenizer: Arc<dyn SubwordTokenizer>,
        /// Shortest period tried
        min_period: usize,
        /// Longest period tried
        max_period: usize,
    },
}

impl fmt::Debug for RepetitionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepetitionUnit::Characters => f.write_str("Characters"),
            RepetitionUnit::Tokens {
                tokenizer,
                min_period,
                max_period,
            } => f
                .debug_struct("Tokens")
                .field("tokenizer", &tokenizer.name())
                .field("min_period", min_period)
                .field("max_period", max_period)
                .finish(),
        }
    }
}

impl RepetitionUnit {
    fn extract(&self, text: &str) -> Result<Vec<Repetition>> {
        match self {
            RepetitionUnit::Characters => Ok(find_char_repetitions(text)),
            RepetitionUnit::Tokens {
                tokenizer,
                min_period,
                max_period,
            } => {
                let tokens = tokenizer.tokenize(text)?;
                let offsets = token_offsets(text, &tokens);
                let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();

                Ok(
                    find_periodic_sequences(&texts, *min_period, *max_period, MIN_TOKEN_TIMES)
                        .into_iter()
                        .map(|seq| Repetition {
                            start: offsets[seq.start].0,
                            end: offsets[seq.end - 1].1,
                            score: seq.times as f64,
                        })
                        .collect(),
                )
            }
        }
    }
}

/// How a repetition signal walks the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepetitionProfile {
    /// Repeated units are tokens rather than characters
    pub tokens: bool,
    /// Search each paragraph separately
    pub per_paragraph: bool,
    /// Emit the aggregates even when nothing repeats
    pub keep_stats_when_empty: bool,
    /// Drop spans contained in an earlier span
    pub skip_nested: bool,
    /// Search fixed-size windows of this many characters
    pub chunk_chars: Option<usize>,
}

/// Emits `repetition` spans and the `doc_*_repetition` aggregates
#[derive(Debug, Clone)]
pub struct RepetitionsTagger {
    unit: RepetitionUnit,
    profile: RepetitionProfile,
}

impl RepetitionsTagger {
    /// Create a tagger searching for `unit` repetitions
    pub fn new(unit: RepetitionUnit, profile: RepetitionProfile) -> Self {
        Self { unit, profile }
    }

    /// Pieces of `text` searched independently, with their character offsets
    fn pieces<'t>(&self, text: &'t str) -> Vec<(usize, &'t str)> {
        if self.profile.per_paragraph {
            return split_paragraphs(text, false)
                .into_iter()
                .map(|paragraph| (paragraph.start(), paragraph.text()))
                .collect();
        }

        let Some(chunk) = self.profile.chunk_chars.filter(|&c| c > 0) else {
            return vec![(0, text)];
        };

        let mut bounds: Vec<usize> = text
            .char_indices()
            .map(|(byte, _)| byte)
            .step_by(chunk)
            .collect();
        bounds.push(text.len());

        bounds
            .windows(2)
            .enumerate()
            .map(|(index, window)| (index * chunk, &text[window[0]..window[1]]))
            .collect()
    }

    fn collect(&self, text: &str) -> Result<Vec<Repetition>> {
        let mut found = Vec::new();
        for (offset, piece) in self.pieces(text) {
            let mut hits = self.unit.extract(piece)?;
            if self.profile.skip_nested {
                hits = drop_nested(hits);
            }
            found.extend(hits.into_iter().map(|hit| hit.shifted(offset)));
        }
        Ok(found)
    }
}

/// Keep spans not contained in the previously kept one, after sorting by
/// start, longest first, highest score first
fn drop_nested(mut hits: Vec<Repetition>) -> Vec<Repetition> {
    hits.sort_by(|a, b| {
        (a.start, Reverse(a.end))
            .cmp(&(b.start, Reverse(b.end)))
            .then(b.score.total_cmp(&a.score))
    });

    let mut kept: Vec<Repetition> = Vec::with_capacity(hits.len());
    for hit in hits {
        if let Some(last) = kept.last() {
            if hit.start >= last.start && hit.end <= last.end {
                continue;
            }
        }
        kept.push(hit);
    }
    kept
}

impl Tagger for RepetitionsTagger {
    fn predict<'d>(&self, doc: &'d Document) -> Result<DocResult<'d>> {
        let char_count = doc.char_len();
        let found = self.collect(doc.text())?;

        let mut result = DocResult::new(doc);
        for hit in &found {
            result.push(Span::with_score(hit.start, hit.end, "repetition", hit.score));
        }

        if self.profile.keep_stats_when_empty || !found.is_empty() {
            let max_score = found.iter().map(|r| r.score).fold(0.0, f64::max);
            let max_length = found.iter().map(Repetition::len).max().unwrap_or(0);
            let covered: usize = found.iter().map(Repetition::len).sum();
            let fraction = if char_count == 0 {
                0.0
            } else {
                covered as f64 / char_count as f64
            };

            result.push(Span::with_score(
                0,
                char_count,
                "doc_max_score_repetition",
                max_score,
            ));
            result.push(Span::with_score(
                0,
                char_count,
                "doc_max_length_repetition",
                max_length as f64,
            ));
            result.push(Span::with_score(
                0,
                char_count,
                "doc_frac_repetition",
                fraction,
            ));
        }
        Ok(result)
    }
}

/// Options of the repetition signals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepetitionOptions {
    /// Tokenizer name; token signals only
    pub tokenizer: Option<String>,
    /// Shortest period; token signals only
    pub min_period: Option<usize>,
    /// Longest period; token signals only
    pub max_period: Option<usize>,
}

pub(crate) fn build_repetitions(
    signal: &str,
    context: &TaggerContext,
    options: &Options,
    profile: RepetitionProfile,
) -> Result<Box<dyn Tagger>> {
    let options: RepetitionOptions = parse_options(signal, options)?;

    let unit = if profile.tokens {
        let min_period = options.min_period.unwrap_or(DEFAULT_MIN_PERIOD);
        let max_period = options.max_period.unwrap_or(DEFAULT_MAX_PERIOD);
        if min_period == 0 || min_period > max_period {
            return Err(SignalError::invalid_options(
                signal,
                format!("period range {min_period}..={max_period} is empty or starts at 0"),
            ));
        }
        RepetitionUnit::Tokens {
            tokenizer: context.tokenizer(options.tokenizer.as_deref().unwrap_or("unicode_words"))?,
            min_period,
            max_period,
        }
    } else {
        if options.tokenizer.is_some() || options.min_period.is_some() || options.max_period.is_some() {
            return Err(SignalError::invalid_options(
                signal,
                "`tokenizer`, `min_period` and `max_period` only apply to token repetition signals",
            ));
        }
        RepetitionUnit::Characters
    };

    debug!(signal, unit = ?unit, "configured repetition signal");
    Ok(Box::new(RepetitionsTagger::new(unit, profile)))
}
