//! Deterministic particle RNG.
//!
//! Wraps `ChaCha8Rng` for cross-platform deterministic randomness. Every
//! renderer owns one `FxRng`; particle scatter, per-particle variance and
//! stochastic events (ripples, lightning, glitter) all draw from it so that
//! identical seeds produce identical particle trajectories.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded float stream owned by a single renderer.
#[derive(Debug, Clone)]
pub struct FxRng(ChaCha8Rng);

impl FxRng {
    /// Create a generator from a 32-bit seed.
    pub fn from_seed(seed: u32) -> Self {
        Self(ChaCha8Rng::seed_from_u64(u64::from(seed)))
    }

    /// Next float in `[0, 1)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        self.0.gen::<f32>()
    }

    /// Uniform float in `[lo, hi)`. Returns `lo` when the range is empty.
    #[inline]
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.next_f32()
    }

    /// Bernoulli trial with probability `p` (clamped to `[0, 1]`).
    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p.clamp(0.0, 1.0)
    }
}

/// Seed used when the host does not supply one.
///
/// This is the only place the engine reads a non-deterministic source.
pub fn fallback_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    // Fold the 128-bit nanosecond count so both the fast and slow moving
    // halves contribute.
    let folded = (nanos as u64) ^ ((nanos >> 64) as u64);
    ((folded >> 32) as u32) ^ (folded as u32)
}
