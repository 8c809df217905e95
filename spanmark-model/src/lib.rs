//! Annotation data model for corpus quality signals
//!
//! Every quality signal in spanmark is reported as a [`Span`]: a typed, scored
//! annotation over a range of *character* offsets in a [`Document`]'s text.
//! A signal run over one document produces a [`DocResult`], which pairs the
//! (borrowed) document with the spans in the order they were emitted.
//!
//! The [`segment`] module splits text into paragraphs and lines as
//! [`TextSlice`] views whose offsets always point back into the parent text,
//! so spans built from them can be mapped onto the original document.
//!
//! # Example
//!
//! ```rust
//! use spanmark_model::{segment, DocResult, Document, Span};
//!
//! let doc = Document::new("doc-1", "First paragraph.\nSecond one.");
//! let mut result = DocResult::new(&doc);
//!
//! for paragraph in segment::split_paragraphs(doc.text(), true) {
//!     let length = paragraph.char_len() as f64;
//!     result.push(Span::with_score(paragraph.start(), paragraph.end(), "paragraph", length));
//! }
//!
//! assert_eq!(result.spans().len(), 2);
//! assert_eq!(result.spans()[1].start(), 17);
//! ```

#![warn(missing_docs)]

pub mod document;
pub mod result;
pub mod segment;
pub mod slice;
pub mod span;

pub use document::{Document, Metadata};
pub use result::DocResult;
pub use segment::{split_lines, split_paragraphs, LineSplit};
pub use slice::TextSlice;
pub use span::Span;

/// Number of characters (Unicode scalar values) in `text`.
///
/// All offsets in this crate are counted in characters, never bytes.
#[inline]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
