//! JSONL attribute formatter

use super::OutputFormatter;
use anyhow::Result;
use spanmark_engine::DocumentAttributes;
use std::io::Write;

/// One `{"id", "attributes"}` object per line
pub struct JsonlFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonlFormatter<W> {
    /// Create a new JSONL formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for JsonlFormatter<W> {
    fn write_document(&mut self, attributes: &DocumentAttributes) -> Result<()> {
        serde_json::to_writer(&mut self.writer, attributes)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
