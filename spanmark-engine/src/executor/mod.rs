//! Execution strategies for document batches

use crate::output::BatchOutput;
use spanmark_core::Document;

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One signal set on the calling thread
    Sequential,
    /// One signal set per pool thread
    Parallel,
    /// Parallel when more than one thread is available
    #[default]
    Auto,
}

/// Trait for execution strategies
pub trait Executor: Send + Sync {
    /// Tag every document, preserving input order in the output
    fn run(&self, docs: &[Document]) -> BatchOutput;

    /// Get the execution mode
    fn mode(&self) -> ExecutionMode;
}
