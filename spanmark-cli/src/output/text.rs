//! Plain text summary formatter

use super::OutputFormatter;
use anyhow::Result;
use spanmark_engine::DocumentAttributes;
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Default, Clone, Copy)]
struct KeyTotals {
    documents: usize,
    spans: usize,
    score: f64,
}

/// Aggregates attributes and prints one summary line per attribute key
pub struct TextFormatter<W: Write> {
    writer: W,
    documents: usize,
    totals: BTreeMap<String, KeyTotals>,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: 0,
            totals: BTreeMap::new(),
        }
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn write_document(&mut self, attributes: &DocumentAttributes) -> Result<()> {
        self.documents += 1;
        for (key, spans) in &attributes.attributes {
            let totals = self.totals.entry(key.clone()).or_default();
            totals.documents += 1;
            totals.spans += spans.len();
            totals.score += spans.iter().map(|span| span.2).sum::<f64>();
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "documents: {}", self.documents)?;
        for (key, totals) in &self.totals {
            let mean = totals.score / totals.documents.max(1) as f64;
            writeln!(
                self.writer,
                "{key}\tdocs={}\tspans={}\tmean_doc_score={mean:.4}",
                totals.documents, totals.spans
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
