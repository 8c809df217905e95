//! JSONL corpus reading

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::Deserialize;
use spanmark_core::Document;
use std::fs;
use std::path::Path;

/// One corpus record; unknown fields are ignored
#[derive(Debug, Deserialize)]
pub struct InputRecord {
    /// Document identifier
    pub id: String,
    /// Document text
    pub text: String,
    /// Originating dataset, kept as metadata
    #[serde(default)]
    pub source: Option<String>,
}

impl From<InputRecord> for Document {
    fn from(record: InputRecord) -> Self {
        let mut metadata = spanmark_core::Metadata::new();
        if let Some(source) = record.source {
            metadata.insert("source".to_string(), source);
        }
        Document::with_metadata(record.id, record.text, metadata)
    }
}

/// Read every non-blank line of a JSONL file as a document
pub fn read_documents(path: &Path) -> Result<Vec<Document>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    parse_documents(&content, path)
}

/// Parse JSONL content; `path` is only used in error messages
pub fn parse_documents(content: &str, path: &Path) -> Result<Vec<Document>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<InputRecord>(line)
                .map(Document::from)
                .map_err(|e| {
                    CliError::InvalidRecord {
                        path: path.to_path_buf(),
                        line: index + 1,
                        reason: e.to_string(),
                    }
                    .into()
                })
        })
        .collect()
}
