//! Configuration types for the engine

use crate::error::{EngineError, Result};
use crate::executor::ExecutionMode;
use serde::{Deserialize, Serialize};
use spanmark_core::Options;

/// One signal to run: a registry name plus its options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSpec {
    /// Registry name
    pub name: String,
    /// Construction options
    #[serde(default)]
    pub options: Options,
}

impl SignalSpec {
    /// Signal with default options
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Options::new(),
        }
    }

    /// Signal with explicit options
    pub fn with_options(name: impl Into<String>, options: Options) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Execution mode selector
    pub execution_mode: ExecutionMode,
    /// Number of worker threads (None = one per CPU)
    pub threads: Option<usize>,
    /// Prefix for worker thread names
    pub thread_name_prefix: String,
    /// Signals run on every document
    pub signals: Vec<SignalSpec>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::Auto,
            threads: None,
            thread_name_prefix: "spanmark-worker".to_string(),
            signals: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Start building a configuration
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Worker count after resolving the CPU default
    pub fn resolved_threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Mode actually used, after resolving [`ExecutionMode::Auto`]
    pub fn resolved_mode(&self) -> ExecutionMode {
        match self.execution_mode {
            ExecutionMode::Auto if self.resolved_threads() > 1 && cfg!(feature = "parallel") => {
                ExecutionMode::Parallel
            }
            ExecutionMode::Auto => ExecutionMode::Sequential,
            mode => mode,
        }
    }

    /// Check the configuration for obvious mistakes
    pub fn validate(&self) -> Result<()> {
        if self.signals.is_empty() {
            return Err(EngineError::NoSignals);
        }
        if self.threads == Some(0) {
            return Err(EngineError::Config(
                "thread count must be at least 1".to_string(),
            ));
        }
        if self.signals.iter().any(|s| s.name.trim().is_empty()) {
            return Err(EngineError::Config(
                "signal name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`EngineConfig`]
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Add a signal with default options
    pub fn signal(mut self, name: impl Into<String>) -> Self {
        self.config.signals.push(SignalSpec::new(name));
        self
    }

    /// Add a signal with explicit options
    pub fn signal_with_options(mut self, name: impl Into<String>, options: Options) -> Self {
        self.config
            .signals
            .push(SignalSpec::with_options(name, options));
        self
    }

    /// Add several signal specs
    pub fn signals(mut self, specs: impl IntoIterator<Item = SignalSpec>) -> Self {
        self.config.signals.extend(specs);
        self
    }

    /// Set the worker count
    pub fn threads(mut self, threads: usize) -> Self {
        self.config.threads = Some(threads);
        self
    }

    /// Set the execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.execution_mode = mode;
        self
    }

    /// Set the worker thread name prefix
    pub fn thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<EngineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
