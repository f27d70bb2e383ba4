//! RNG module - deterministic, seed-driven randomness
//!
//! Goal placement draws one ranged integer per call from a generator seeded
//! with the round's running seed, then advances that seed. A round is fully
//! reproducible from its initial seed while no two draws within it share one.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate a value in the inclusive range `[lo, hi]`.
    ///
    /// Uses the high bits of the state (the LCG's low bits are weak).
    /// An inverted range returns `lo`.
    pub fn next_in(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo) as u64 + 1;
        let r = ((self.next_u32() as u64) * span) >> 32;
        lo + r as i64
    }
}

/// Murmur3 finalizer; decorrelates neighbouring seeds before they reach the LCG.
fn mix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// Draw one integer from `[lo, hi]` with a generator seeded for this call only.
///
/// # Examples
///
/// ```
/// use floatybox_core::rng::random_range;
///
/// let v = random_range(6, 29, 42);
/// assert!((6..=29).contains(&v));
/// assert_eq!(v, random_range(6, 29, 42));
/// ```
pub fn random_range(lo: i64, hi: i64, seed: u32) -> i64 {
    SimpleRng::new(mix32(seed)).next_in(lo, hi)
}

/// Return the current seed and advance the running seed.
pub fn advance_seed(seed: &mut u32) -> u32 {
    let current = *seed;
    *seed = seed.wrapping_add(1);
    current
}
