//! Engine output types

use serde::{Deserialize, Serialize};
use spanmark_core::{DocResult, Span};
use std::collections::BTreeMap;

/// One attribute value: `[start, end, score]` in character offsets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeSpan(pub usize, pub usize, pub f64);

impl From<&Span> for AttributeSpan {
    fn from(span: &Span) -> Self {
        Self(span.start(), span.end(), span.score())
    }
}

/// Attributes produced for one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentAttributes {
    /// Document identifier
    pub id: String,
    /// Spans keyed by `<signal>__<span type>`, in emission order per key
    pub attributes: BTreeMap<String, Vec<AttributeSpan>>,
}

impl DocumentAttributes {
    /// Empty attribute set for `id`
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Fold one signal's result into the map
    pub fn record(&mut self, signal: &str, result: &DocResult<'_>) {
        for span in result.spans() {
            self.attributes
                .entry(attribute_key(signal, span.kind()))
                .or_default()
                .push(AttributeSpan::from(span));
        }
    }

    /// Spans stored under `signal__kind`
    pub fn get(&self, signal: &str, kind: &str) -> Option<&[AttributeSpan]> {
        self.attributes
            .get(&attribute_key(signal, kind))
            .map(Vec::as_slice)
    }
}

/// Attribute key for a span type emitted by a signal
pub fn attribute_key(signal: &str, kind: &str) -> String {
    format!("{signal}__{kind}")
}

/// A signal that failed on one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFailure {
    /// Document identifier
    pub id: String,
    /// Signal that failed
    pub signal: String,
    /// Rendered error
    pub error: String,
}

/// Result of running the engine over a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchOutput {
    /// Attributes per document, in input order
    pub documents: Vec<DocumentAttributes>,
    /// Failures, in input order
    pub failures: Vec<DocumentFailure>,
}

impl BatchOutput {
    /// True when no signal failed on any document
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Distinct identifiers of documents with at least one failure
    pub fn failed_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for failure in &self.failures {
            if ids.last() != Some(&failure.id.as_str()) {
                ids.push(&failure.id);
            }
        }
        ids
    }

    pub(crate) fn push(&mut self, attributes: DocumentAttributes, failures: Vec<DocumentFailure>) {
        self.documents.push(attributes);
        self.failures.extend(failures);
    }
}
