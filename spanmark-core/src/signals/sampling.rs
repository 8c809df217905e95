//! Uniform random score per document, for sampling downstream

use crate::context::TaggerContext;
use crate::error::{Result, SignalError};
use crate::options::{parse_options, Options};
use crate::tagger::Tagger;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use spanmark_model::{DocResult, Document, Span};
use std::sync::{Mutex, PoisonError};

/// Options of the sampling signal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingOptions {
    /// User seed; must be positive
    pub seed: u64,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self { seed: 1 }
    }
}

/// Mix a user seed with a worker index so workers draw distinct sequences
pub fn worker_seed(seed: u64, worker_id: usize) -> u64 {
    seed ^ (worker_id as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Emits one `random` span with a score drawn uniformly from `[0, 1)`
#[derive(Debug)]
pub struct RandomNumberTagger {
    rng: Mutex<StdRng>,
}

impl RandomNumberTagger {
    /// Generator seeded from `seed` and `worker_id`
    pub fn new(seed: u64, worker_id: usize) -> Result<Self> {
        if seed == 0 {
            return Err(SignalError::invalid_options(
                "random_number_v1",
                "seed must be positive",
            ));
        }
        Ok(Self {
            rng: Mutex::new(StdRng::seed_from_u64(worker_seed(seed, worker_id))),
        })
    }
}

impl Tagger for RandomNumberTagger {
    fn predict<'d>(&self, doc: &'d Document) -> Result<DocResult<'d>> {
        let score: f64 = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen();
        Ok(DocResult::with_spans(
            doc,
            vec![Span::with_score(0, doc.char_len(), "random", score)],
        ))
    }
}

pub(crate) fn build_sampling(
    signal: &str,
    context: &TaggerContext,
    options: &Options,
) -> Result<Box<dyn Tagger>> {
    let options: SamplingOptions = parse_options(signal, options)?;
    if options.seed == 0 {
        return Err(SignalError::invalid_options(signal, "seed must be positive"));
    }
    Ok(Box::new(RandomNumberTagger::new(
        options.seed,
        context.worker_id(),
    )?))
}
