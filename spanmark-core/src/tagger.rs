//! The contract every signal implements

use crate::error::Result;
use spanmark_model::{DocResult, Document};

/// A constructed signal unit.
///
/// Construction options are fixed for the lifetime of the value. `predict`
/// borrows the document and may be called concurrently from several threads.
pub trait Tagger: Send + Sync {
    /// Compute this signal's spans for one document
    fn predict<'d>(&self, doc: &'d Document) -> Result<DocResult<'d>>;
}
