//! Batch execution of spanmark signals
//!
//! An [`Engine`] is built once from an [`EngineConfig`] listing the signals
//! to run. Each worker owns its own constructed signal instances, so signals
//! never share mutable state; randomness-based signals receive the worker
//! index through their [`TaggerContext`](spanmark_core::TaggerContext).
//!
//! A signal failing on one document is recorded as a [`DocumentFailure`] and
//! does not affect any other document or signal.
//!
//! ```rust
//! use spanmark_engine::{Engine, EngineConfig, ExecutionMode};
//! use spanmark_core::Document;
//!
//! let config = EngineConfig::builder()
//!     .signal("char_length_v1")
//!     .execution_mode(ExecutionMode::Sequential)
//!     .build()
//!     .unwrap();
//! let engine = Engine::new(config).unwrap();
//!
//! let output = engine.process(&[Document::new("a", "four")]);
//! let spans = output.documents[0].get("char_length_v1", "length").unwrap();
//! assert_eq!(spans[0].2, 4.0);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod error;
pub mod executor;
pub mod output;
pub mod signal_set;

pub use config::{EngineConfig, EngineConfigBuilder, SignalSpec};
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use executor::{ExecutionMode, Executor};
pub use output::{attribute_key, AttributeSpan, BatchOutput, DocumentAttributes, DocumentFailure};
pub use signal_set::SignalSet;
