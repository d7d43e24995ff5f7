//! Source of the coin-flips behind misreads and card declines.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Decides whether a simulated event happens.
pub trait Randomness: Send {
    /// Return `true` with probability `p` (clamped to `0.0..=1.0`).
    fn chance(&mut self, p: f64) -> bool;
}

/// `StdRng` backed randomness, seedable for reproducible runs.
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Randomness for SeededRandom {
    fn chance(&mut self, p: f64) -> bool {
        if p.is_nan() {
            return false;
        }
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

/// Replays a fixed list of outcomes, then keeps answering `fallback`.
///
/// Lets callers force either branch of a random decision.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    outcomes: std::collections::VecDeque<bool>,
    fallback: bool,
}

impl Scripted {
    pub fn new(outcomes: impl IntoIterator<Item = bool>, fallback: bool) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
            fallback,
        }
    }

    /// Every roll answers `outcome`.
    pub fn always(outcome: bool) -> Self {
        Self::new([], outcome)
    }
}

impl Randomness for Scripted {
    fn chance(&mut self, _p: f64) -> bool {
        self.outcomes.pop_front().unwrap_or(self.fallback)
    }
}
