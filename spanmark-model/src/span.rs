//! Scored, typed annotations over character ranges

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A scored annotation over `start..end` of a document's text.
///
/// Offsets are character offsets into the owning document. `kind` names the
/// signal that produced the span (serialized as `type`); a single signal may
/// emit several kinds. `score` is a per-kind payload: a count, a fraction, a
/// boolean encoded as 1/0, or the negation of another span's score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    start: usize,
    end: usize,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    kind: String,
    score: f64,
}

impl Span {
    /// Default score for presence-style spans
    pub const PRESENT: f64 = 1.0;

    /// Create a span with the default score of 1.0
    pub fn new(start: usize, end: usize, kind: impl Into<String>) -> Self {
        Self::with_score(start, end, kind, Self::PRESENT)
    }

    /// Create a span carrying an explicit score
    pub fn with_score(start: usize, end: usize, kind: impl Into<String>, score: f64) -> Self {
        debug_assert!(start <= end, "span start {start} past end {end}");
        Self {
            start,
            end,
            kind: kind.into(),
            score,
        }
    }

    /// Character offset where the span starts
    pub fn start(&self) -> usize {
        self.start
    }

    /// Character offset one past the end of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Signal type identifier
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Numeric payload
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Number of characters covered
    pub fn char_len(&self) -> usize {
        self.end - self.start
    }

    /// Same range, new kind, score negated.
    ///
    /// Filters that only support "keep if score > threshold" can then express
    /// "keep if value < N" as "keep if negated value > -N".
    pub fn negated(&self, kind: impl Into<String>) -> Self {
        Self::with_score(self.start, self.end, kind, -self.score)
    }

    /// Same range, new kind, score replaced by `1 - score`
    pub fn complement(&self, kind: impl Into<String>) -> Self {
        Self::with_score(self.start, self.end, kind, 1.0 - self.score)
    }
}
