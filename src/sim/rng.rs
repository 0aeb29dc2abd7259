//! Random draws shared by every generator
//!
//! Rounds use an entropy seed by default; tests pin a seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Game RNG wrapper
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    rng: Pcg32,
}

impl GameRng {
    /// Seeded generator (reproducible)
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the thread RNG
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `[lo, hi]` (bounds in either order)
    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        self.rng.random_range(lo..=hi)
    }

    /// Uniform float in `[lo, hi)`; returns `lo` for an empty range
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..hi)
    }

    /// True with the given percent chance
    pub fn percent(&mut self, chance: u32) -> bool {
        self.rng.random_range(0..100) < chance
    }

    /// Fair coin flip
    pub fn coin(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    /// Pick one element; `None` for an empty slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..items.len());
        items.get(idx)
    }
}
