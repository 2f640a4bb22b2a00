//! Random source for picking among equivalent messages

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Picks an index among `len` equivalent phrasings. Never consulted for pricing.
pub trait PhraseSource: Send + Sync {
    /// Returns a value in `0..len`; `len` is always non-zero
    fn pick(&self, len: usize) -> usize;
}

/// `StdRng`-backed source, reproducible when seeded
pub struct RandomPhrases {
    rng: Mutex<StdRng>,
}

impl RandomPhrases {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl PhraseSource for RandomPhrases {
    fn pick(&self, len: usize) -> usize {
        // A poisoned lock only means another thread panicked mid-pick.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..len)
    }
}

/// Always picks the same slot; for tests and reproducible transcripts
pub struct FixedPhrase(pub usize);

impl PhraseSource for FixedPhrase {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

/// Choose one of `options` with `source`
pub fn choose<'a>(source: &dyn PhraseSource, options: &'a [String]) -> &'a str {
    match options.len() {
        0 => "",
        len => &options[source.pick(len).min(len - 1)],
    }
}
