//! Construction options for signals
//!
//! Pipelines describe signals as a name plus a free-form table of options.
//! Each signal turns that table into its own typed options struct, so an
//! unknown or mistyped option fails when the signal is built, not halfway
//! through a corpus.

use crate::error::{Result, SignalError};
use serde::de::DeserializeOwned;

/// Untyped options as they appear in a pipeline configuration file
pub type Options = toml::Table;

/// Deserialize `options` into the typed options of `signal`.
///
/// An empty table yields `T::default()`.
pub fn parse_options<T>(signal: &str, options: &Options) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if options.is_empty() {
        return Ok(T::default());
    }

    toml::Value::Table(options.clone())
        .try_into()
        .map_err(|e| SignalError::invalid_options(signal, e.to_string()))
}
