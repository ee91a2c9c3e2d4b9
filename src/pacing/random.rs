use std::time::Duration;

use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{DelayRange, Pacer};

/// Uniformly random pacing, one independent draw per expansion.
pub struct RandomPacer<R = StdRng> {
    range: DelayRange,
    rng: R,
}

impl<R: Rng> RandomPacer<R> {
    pub fn new(range: DelayRange, rng: R) -> Self {
        Self { range, rng }
    }

    pub fn range(&self) -> DelayRange {
        self.range
    }
}

impl RandomPacer<StdRng> {
    /// Reproducible delays: same seed, same sequence.
    pub fn seeded(range: DelayRange, seed: u64) -> Self {
        Self::new(range, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(range: DelayRange) -> Self {
        Self::new(range, StdRng::from_entropy())
    }
}

impl<R: Rng> Pacer for RandomPacer<R> {
    fn next_delay(&mut self) -> Duration {
        let secs = self.range.sample(&mut self.rng);
        info!("Waiting: {secs:.3}s");
        Duration::from_secs_f64(secs)
    }
}
