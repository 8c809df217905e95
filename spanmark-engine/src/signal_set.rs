//! A worker's constructed signal instances

use crate::config::SignalSpec;
use crate::error::{EngineError, Result};
use crate::output::{DocumentAttributes, DocumentFailure};
use spanmark_core::{Document, SignalRegistry, Tagger, TaggerContext};
use std::fmt;
use tracing::warn;

/// Signals built once and reused for every document a worker handles
pub struct SignalSet {
    signals: Vec<(String, Box<dyn Tagger>)>,
}

impl fmt::Debug for SignalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl SignalSet {
    /// Construct every configured signal
    pub fn build(
        registry: &SignalRegistry,
        context: &TaggerContext,
        specs: &[SignalSpec],
    ) -> Result<Self> {
        if specs.is_empty() {
            return Err(EngineError::NoSignals);
        }

        let signals = specs
            .iter()
            .map(|spec| {
                registry
                    .build(&spec.name, context, &spec.options)
                    .map(|tagger| (spec.name.clone(), tagger))
                    .map_err(|source| EngineError::Signal {
                        signal: spec.name.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { signals })
    }

    /// Signal names in configuration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.signals.iter().map(|(name, _)| name.as_str())
    }

    /// Number of signals
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// True if the set holds no signals
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Run every signal over `doc`.
    ///
    /// A failing signal is reported and skipped; the remaining signals still
    /// run and their attributes are kept.
    pub fn tag(&self, doc: &Document) -> (DocumentAttributes, Vec<DocumentFailure>) {
        let mut attributes = DocumentAttributes::new(doc.id());
        let mut failures = Vec::new();

        for (name, tagger) in &self.signals {
            match tagger.predict(doc) {
                Ok(result) => attributes.record(name, &result),
                Err(error) => {
                    warn!(document = doc.id(), signal = %name, %error, "signal failed");
                    failures.push(DocumentFailure {
                        id: doc.id().to_string(),
                        signal: name.clone(),
                        error: error.to_string(),
                    });
                }
            }
        }

        (attributes, failures)
    }
}
