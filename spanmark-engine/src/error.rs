//! Engine error types

use spanmark_core::SignalError;
use thiserror::Error;

/// Errors raised while setting up an engine.
///
/// Per-document failures are not errors at this level; they are collected
/// as [`DocumentFailure`](crate::DocumentFailure)s next to the results of
/// the other documents.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A configured signal could not be built
    #[error("failed to build signal '{signal}': {source}")]
    Signal {
        /// Signal name from the configuration
        signal: String,
        /// Underlying construction error
        #[source]
        source: SignalError,
    },

    /// No signals were configured
    #[error("no signals configured")]
    NoSignals,

    /// The worker pool could not be created
    #[cfg(feature = "parallel")]
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
