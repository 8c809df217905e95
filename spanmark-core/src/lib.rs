//! Span-based quality signals for pretraining corpora
//!
//! Every signal in this crate is a [`Tagger`]: given a [`Document`] it
//! returns a [`DocResult`] of typed, scored [`Span`]s over character offsets
//! of the document's text. Signals never accept or reject a document
//! themselves; downstream filters threshold the spans.
//!
//! # Architecture
//!
//! - **Contract**: [`Tagger`], the [`SignalRegistry`] that builds signals by
//!   name, and typed per-signal [`options`].
//! - **Collaborators**: language configuration ([`language`]), banned word
//!   lists ([`wordlist`]), tokenizers ([`tokenize`]) and language
//!   classifiers ([`classify`]), bundled in a [`TaggerContext`].
//! - **Signals**: lexical heuristics, n-gram statistics, repeated-content
//!   spans, length counters, language scores, punctuation and sampling,
//!   under [`signals`].
//!
//! # Example
//!
//! ```rust
//! use spanmark_core::{registry, Options, TaggerContext};
//! use spanmark_model::Document;
//!
//! let context = TaggerContext::new();
//! let tagger = registry()
//!     .build("char_length_with_paragraphs_v1", &context, &Options::new())
//!     .unwrap();
//!
//! let doc = Document::new("doc-1", "First paragraph.\nSecond one.");
//! let result = tagger.predict(&doc).unwrap();
//!
//! assert_eq!(result.total_score("paragraph"), 28.0);
//! assert_eq!(result.total_score("document"), 28.0);
//! ```

pub mod classify;
pub mod context;
pub mod error;
pub mod language;
pub mod options;
pub mod registry;
pub mod signals;
pub mod tagger;
pub mod tokenize;
pub mod wordlist;

pub use classify::{LanguageClassifier, LanguagePrediction, WhatlangClassifier};
pub use context::TaggerContext;
pub use error::{ClassifierError, Result, SignalError, TokenizerError};
pub use language::{LanguageConfig, LanguageConfigSource, LanguageConfigs};
pub use options::{parse_options, Options};
pub use registry::{registry, SignalRegistry, TaggerFactory};
pub use signals::gopher::GopherStatistics;
pub use signals::language::add_document_language_score;
pub use tagger::Tagger;
pub use tokenize::{SubwordTokenizer, Token};
pub use wordlist::{BannedContent, WordListSource, WordLists};

pub use spanmark_model::{DocResult, Document, Metadata, Span, TextSlice};
