//! Input handling module

pub mod jsonl_reader;
pub mod resolver;

pub use jsonl_reader::{read_documents, InputRecord};
pub use resolver::{resolve_inputs, InputSource};
