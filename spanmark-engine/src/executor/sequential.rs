//! Sequential execution strategy

use crate::{
    executor::{ExecutionMode, Executor},
    output::BatchOutput,
    signal_set::SignalSet,
};
use spanmark_core::Document;

/// Single-threaded executor
#[derive(Debug)]
pub struct SequentialExecutor {
    signals: SignalSet,
}

impl SequentialExecutor {
    /// Create an executor around one signal set
    pub fn new(signals: SignalSet) -> Self {
        Self { signals }
    }
}

impl Executor for SequentialExecutor {
    fn run(&self, docs: &[Document]) -> BatchOutput {
        let mut output = BatchOutput::default();
        for doc in docs {
            let (attributes, failures) = self.signals.tag(doc);
            output.push(attributes, failures);
        }
        output
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }
}
