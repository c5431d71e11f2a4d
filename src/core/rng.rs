//! Deterministic random number service.
//!
//! Every chance-based game effect draws from one seeded generator per
//! engine, so a recorded seed plus an ordered action log fully determines
//! outcomes. This is what makes network-synchronized and replay-verified
//! play possible: peers apply the same actions to the same seed and end
//! up with bit-identical state.
//!
//! ## Range conventions
//!
//! - `dice(max)` is uniform in `[1, max]`
//! - `random_int(min, max)` is inclusive on **both** ends
//! - `random_float(min, max)` includes `min` but excludes `max`
//!
//! The int/float asymmetry is part of the replay contract and must not
//! be "fixed".

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded random source for all gameplay randomness.
///
/// Uses ChaCha8 with a counter-based internal position, which makes
/// state capture O(1) regardless of how many values were drawn.
///
/// ## Example
///
/// ```
/// use card_engine::core::RandomService;
///
/// let mut a = RandomService::new(42);
/// let mut b = RandomService::new(42);
/// assert_eq!(a.random_int(1, 100), b.random_int(1, 100));
/// ```
#[derive(Clone, Debug)]
pub struct RandomService {
    inner: ChaCha8Rng,
    seed: u64,
}

impl RandomService {
    /// Create a new service with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this service was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `[1, max]`.
    ///
    /// Returns 1 when `max < 1`, consuming no randomness.
    pub fn dice(&mut self, max: i32) -> i32 {
        self.random_int(1, max)
    }

    /// Uniform integer in `[min, max]`, inclusive on both ends.
    ///
    /// Returns `min` without consuming randomness when the range is empty
    /// or a single value.
    pub fn random_int(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.inner.gen_range(min..=max)
    }

    /// Uniform float in `[min, max)` - `max` is excluded.
    ///
    /// Returns `min` without consuming randomness when `min >= max`.
    pub fn random_float(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        self.inner.gen_range(min..max)
    }

    /// Capture the current state as plain data.
    #[must_use]
    pub fn state(&self) -> RngState {
        RngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore a service from captured state.
    #[must_use]
    pub fn from_state(state: &RngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable random-service state.
///
/// The ChaCha word position captures how far the stream has advanced,
/// so a restored service continues from exactly the same point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
}
