//! Name-keyed construction of signals
//!
//! Pipelines pick signals by name from configuration. The registry maps
//! each name to a factory that parses the signal's options and builds it
//! against a [`TaggerContext`].

use crate::context::TaggerContext;
use crate::error::{Result, SignalError};
use crate::options::Options;
use crate::signals;
use crate::tagger::Tagger;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

static BUILTIN_REGISTRY: OnceLock<SignalRegistry> = OnceLock::new();

/// Builds a signal from shared collaborators and its options
pub type TaggerFactory =
    Box<dyn Fn(&TaggerContext, &Options) -> Result<Box<dyn Tagger>> + Send + Sync>;

/// Mapping from signal name to factory
#[derive(Default)]
pub struct SignalRegistry {
    factories: BTreeMap<String, TaggerFactory>,
}

impl fmt::Debug for SignalRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalRegistry")
            .field("signals", &self.names())
            .finish()
    }
}

impl SignalRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in signal
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        signals::register_builtins(&mut registry)?;
        Ok(registry)
    }

    /// Add a factory under `name`.
    ///
    /// Fails if the name is already taken; existing entries are never replaced.
    pub fn register<F>(&mut self, name: &str, factory: F) -> Result<()>
    where
        F: Fn(&TaggerContext, &Options) -> Result<Box<dyn Tagger>> + Send + Sync + 'static,
    {
        if self.factories.contains_key(name) {
            return Err(SignalError::DuplicateSignal(name.to_string()));
        }
        self.factories.insert(name.to_string(), Box::new(factory));
        Ok(())
    }

    /// Construct the signal registered under `name`
    pub fn build(
        &self,
        name: &str,
        context: &TaggerContext,
        options: &Options,
    ) -> Result<Box<dyn Tagger>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| SignalError::UnknownSignal(name.to_string()))?;

        debug!(signal = name, worker = context.worker_id(), "building signal");
        factory(context, options)
    }

    /// True if a factory is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

/// Process-wide registry of built-in signals, initialized on first use
pub fn registry() -> &'static SignalRegistry {
    BUILTIN_REGISTRY.get_or_init(|| {
        SignalRegistry::with_builtins().expect("built-in signal names are unique")
    })
}
