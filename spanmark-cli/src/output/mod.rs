//! Output formatting module

use anyhow::Result;
use spanmark_engine::DocumentAttributes;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Write the attributes of one document
    fn write_document(&mut self, attributes: &DocumentAttributes) -> Result<()>;

    /// Finalize output (e.g., print a summary)
    fn finish(&mut self) -> Result<()>;
}

pub mod jsonl;
pub mod text;

pub use jsonl::JsonlFormatter;
pub use text::TextFormatter;
