//! Parallel execution strategy

use crate::{
    config::EngineConfig,
    error::{EngineError, Result},
    executor::{ExecutionMode, Executor},
    output::BatchOutput,
    signal_set::SignalSet,
};
use rayon::prelude::*;
use spanmark_core::{Document, SignalRegistry, TaggerContext};
use std::fmt;
use tracing::debug;

/// Executor backed by a dedicated rayon pool.
///
/// Every pool thread owns its own [`SignalSet`], built with a context whose
/// worker id is the thread index.
pub struct ParallelExecutor {
    pool: rayon::ThreadPool,
    workers: Vec<SignalSet>,
}

impl fmt::Debug for ParallelExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallelExecutor")
            .field("threads", &self.pool.current_num_threads())
            .field("workers", &self.workers.len())
            .finish()
    }
}

impl ParallelExecutor {
    /// Build the pool and one signal set per thread
    pub fn new(
        config: &EngineConfig,
        registry: &SignalRegistry,
        context: &TaggerContext,
    ) -> Result<Self> {
        let threads = config.resolved_threads();
        let prefix = config.thread_name_prefix.clone();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(move |i| format!("{prefix}-{i}"))
            .build()
            .map_err(|e| EngineError::ThreadPool(e.to_string()))?;

        let workers = (0..threads)
            .map(|worker| {
                let context = context.clone().with_worker_id(worker);
                SignalSet::build(registry, &context, &config.signals)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(threads, signals = config.signals.len(), "parallel executor ready");
        Ok(Self { pool, workers })
    }

    /// Number of pool threads
    pub fn threads(&self) -> usize {
        self.workers.len()
    }

    fn worker(&self) -> &SignalSet {
        let index = rayon::current_thread_index().unwrap_or(0);
        &self.workers[index % self.workers.len()]
    }
}

impl Executor for ParallelExecutor {
    fn run(&self, docs: &[Document]) -> BatchOutput {
        let tagged: Vec<_> = self.pool.install(|| {
            docs.par_iter()
                .map(|doc| self.worker().tag(doc))
                .collect()
        });

        let mut output = BatchOutput::default();
        for (attributes, failures) in tagged {
            output.push(attributes, failures);
        }
        output
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}
