//! Per-document signal output

use crate::{Document, Span};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Spans produced for one document.
///
/// The document is borrowed: a result never outlives the record it
/// describes. Spans keep insertion order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DocResult<'d> {
    doc: &'d Document,
    spans: Vec<Span>,
}

impl<'d> DocResult<'d> {
    /// Empty result for `doc`
    pub fn new(doc: &'d Document) -> Self {
        Self {
            doc,
            spans: Vec::new(),
        }
    }

    /// Result for `doc` with the given spans
    pub fn with_spans(doc: &'d Document, spans: Vec<Span>) -> Self {
        Self { doc, spans }
    }

    /// The annotated document
    pub fn doc(&self) -> &'d Document {
        self.doc
    }

    /// Spans in emission order
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Append a span
    pub fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    /// Iterator over spans of one type
    pub fn spans_of_type<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Span> + 'a {
        self.spans.iter().filter(move |span| span.kind() == kind)
    }

    /// Sum of the scores of every span of one type
    pub fn total_score(&self, kind: &str) -> f64 {
        self.spans_of_type(kind).map(Span::score).sum()
    }

    /// Append the spans of another result computed on the same document
    pub fn merge(&mut self, other: DocResult<'d>) {
        debug_assert!(
            std::ptr::eq(self.doc, other.doc) || self.doc.id() == other.doc.id(),
            "merging results of different documents"
        );
        self.spans.extend(other.spans);
    }

    /// Give up the borrow and keep only the spans
    pub fn into_spans(self) -> Vec<Span> {
        self.spans
    }
}

impl Extend<Span> for DocResult<'_> {
    fn extend<I: IntoIterator<Item = Span>>(&mut self, iter: I) {
        self.spans.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_order() {
        let doc = Document::new("d", "abc");
        let mut first = DocResult::with_spans(&doc, vec![Span::new(0, 3, "a")]);
        let second = DocResult::with_spans(&doc, vec![Span::new(0, 1, "b"), Span::new(1, 3, "a")]);
        first.merge(second);

        let kinds: Vec<_> = first.spans().iter().map(Span::kind).collect();
        assert_eq!(kinds, ["a", "b", "a"]);
        assert_eq!(first.spans_of_type("a").count(), 2);
    }

    #[test]
    fn test_total_score() {
        let doc = Document::new("d", "abcdef");
        let result = DocResult::with_spans(
            &doc,
            vec![
                Span::with_score(0, 2, "paragraph", 2.0),
                Span::with_score(2, 6, "paragraph", 4.0),
                Span::with_score(0, 6, "document", 6.0),
            ],
        );
        assert_eq!(result.total_score("paragraph"), 6.0);
        assert_eq!(result.total_score("missing"), 0.0);
    }
}
