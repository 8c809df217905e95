//! Engine facade

use crate::{
    config::EngineConfig,
    error::Result,
    executor::{ExecutionMode, Executor, SequentialExecutor},
    output::BatchOutput,
    signal_set::SignalSet,
};
use spanmark_core::{registry, Document, SignalRegistry, TaggerContext};
use tracing::info;

/// Runs a fixed list of signals over document batches
pub struct Engine {
    executor: Box<dyn Executor>,
    signal_names: Vec<String>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("mode", &self.executor.mode())
            .field("signals", &self.signal_names)
            .finish()
    }
}

impl Engine {
    /// Engine over the built-in registry and default collaborators
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_context(config, &TaggerContext::default())
    }

    /// Engine over the built-in registry with custom collaborators
    pub fn with_context(config: EngineConfig, context: &TaggerContext) -> Result<Self> {
        Self::with_registry(config, registry(), context)
    }

    /// Engine over an explicit registry
    pub fn with_registry(
        config: EngineConfig,
        registry: &SignalRegistry,
        context: &TaggerContext,
    ) -> Result<Self> {
        config.validate()?;
        let signal_names = config.signals.iter().map(|s| s.name.clone()).collect();

        let executor: Box<dyn Executor> = match config.resolved_mode() {
            #[cfg(feature = "parallel")]
            ExecutionMode::Parallel => Box::new(crate::executor::ParallelExecutor::new(
                &config, registry, context,
            )?),
            _ => Box::new(SequentialExecutor::new(SignalSet::build(
                registry,
                context,
                &config.signals,
            )?)),
        };

        info!(
            mode = ?executor.mode(),
            signals = config.signals.len(),
            "engine ready"
        );
        Ok(Self {
            executor,
            signal_names,
        })
    }

    /// Tag a batch of documents
    pub fn process(&self, docs: &[Document]) -> BatchOutput {
        self.executor.run(docs)
    }

    /// Configured signal names, in order
    pub fn signal_names(&self) -> &[String] {
        &self.signal_names
    }

    /// Execution mode in use
    pub fn mode(&self) -> ExecutionMode {
        self.executor.mode()
    }
}
