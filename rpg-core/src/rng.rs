//! Seeded pseudo-random number generator.
//!
//! A small linear congruential generator. Given the same seed it produces
//! the same stream on every platform, which is what makes dungeon layouts
//! reproducible.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233_280;

/// Deterministic random source for world generation and in-play rolls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRng {
    /// The seed this generator was created with.
    seed: u64,
    /// Current recurrence state, always below the modulus.
    state: u64,
}

impl SeededRng {
    /// Create a generator from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            state: seed % MODULUS,
        }
    }

    /// Create a generator seeded from the wall clock (milliseconds).
    pub fn from_time() -> Self {
        Self::new(now_millis())
    }

    /// The seed this generator started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Advance the recurrence and return a value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Uniform integer in `min..=max`.
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        let span = (max - min + 1) as f64;
        (self.next_f64() * span).floor() as i64 + min
    }

    /// Pick one element uniformly.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let index = (self.next_f64() * items.len() as f64).floor() as usize;
        &items[index]
    }

    /// True with probability `1 / one_in`.
    pub fn chance(&mut self, one_in: i64) -> bool {
        self.range(1, one_in) == 1
    }
}

impl Default for SeededRng {
    fn default() -> Self {
        Self::from_time()
    }
}

/// Milliseconds since the Unix epoch. Default seed and save timestamp.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
