//! Corpus documents

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque per-document key-value metadata
pub type Metadata = BTreeMap<String, String>;

/// A single corpus record.
///
/// Documents are built once per record and only ever lent to signals by
/// shared reference.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Document {
    id: String,
    text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    metadata: Metadata,
}

impl Document {
    /// Create a document without metadata
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata: Metadata::new(),
        }
    }

    /// Create a document with metadata attached
    pub fn with_metadata(id: impl Into<String>, text: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata,
        }
    }

    /// Record identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Full document text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attached metadata
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Length of the text in characters; the upper bound of every span offset
    pub fn char_len(&self) -> usize {
        crate::char_len(&self.text)
    }

    /// True for zero-length text
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len_is_not_byte_len() {
        let doc = Document::new("a", "naïve café");
        assert_eq!(doc.char_len(), 10);
        assert_eq!(doc.text().len(), 12);
    }

    #[test]
    fn test_metadata_round_trip() {
        let mut metadata = Metadata::new();
        metadata.insert("source".to_string(), "web".to_string());
        let doc = Document::with_metadata("b", "text", metadata);
        assert_eq!(doc.metadata().get("source").map(String::as_str), Some("web"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_without_metadata() {
        let doc: Document = serde_json::from_str(r#"{"id":"x","text":"hello"}"#).unwrap();
        assert_eq!(doc.id(), "x");
        assert!(doc.metadata().is_empty());
    }
}
