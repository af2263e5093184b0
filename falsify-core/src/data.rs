//! Seeds, the deterministic random source and run configuration.

use std::fmt;

/// Splittable SplitMix64 state.
///
/// A seed is an immutable value; [`Random`] wraps one and advances it as
/// values are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed(pub u64, pub u64);

impl Seed {
    /// Derive a seed from a single integer.
    pub fn from_u64(value: u64) -> Self {
        let state = splitmix64_mix(value);
        let gamma = mix_gamma(state);
        Seed(state, gamma)
    }

    /// Split a seed into two independent seeds.
    pub fn split(self) -> (Self, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        let new_gamma = mix_gamma(output);

        (Seed(new_state, gamma), Seed(output, new_gamma))
    }

    /// Produce the next output and the advanced seed.
    pub fn next_u64(self) -> (u64, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        (splitmix64_mix(new_state), Seed(new_state, gamma))
    }

    /// Pick a fresh top-level seed value for a run that did not supply one.
    pub fn random_value() -> u64 {
        use rand::Rng;
        rand::thread_rng().gen()
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({}, {})", self.0, self.1)
    }
}

/// Deterministic, seedable stream of random values with a mutable cursor.
///
/// Two sources built from the same seed yield the same values when queried
/// in the same order. The type is not `Clone`: a second stream
/// is obtained through [`Random::fork`], never by aliasing.
#[derive(Debug)]
pub struct Random {
    seed: Seed,
}

impl Random {
    /// Create a source from an integer seed.
    pub fn new(seed: u64) -> Self {
        Random {
            seed: Seed::from_u64(seed),
        }
    }

    /// Create a source positioned at an explicit seed state.
    pub fn from_seed(seed: Seed) -> Self {
        Random { seed }
    }

    /// Draw a full-width integer.
    pub fn next_u64(&mut self) -> u64 {
        let (value, next) = self.seed.next_u64();
        self.seed = next;
        value
    }

    /// Draw an integer in `[0, bound)`.
    ///
    /// # Panics
    ///
    /// Panics when `bound` is zero.
    pub fn next_bounded(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "cannot draw from the empty range [0, 0)");
        let value = self.next_u64();
        ((value as u128 * bound as u128) >> 64) as u64
    }

    /// Draw an integer in the inclusive range `[min, max]`.
    ///
    /// # Panics
    ///
    /// Panics when `min > max`.
    pub fn next_in_range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min <= max, "cannot draw from the empty range [{min}, {max}]");
        let span = (max as i128 - min as i128 + 1) as u128;
        if span > u64::MAX as u128 {
            return self.next_u64() as i64;
        }
        (min as i128 + self.next_bounded(span as u64) as i128) as i64
    }

    /// Draw a boolean.
    pub fn next_bool(&mut self) -> bool {
        self.next_u64() & 1 == 1
    }

    /// Split off an independent stream.
    ///
    /// `self` keeps one half of the split, the returned source gets the other.
    pub fn fork(&mut self) -> Random {
        let (kept, forked) = self.seed.split();
        self.seed = kept;
        Random { seed: forked }
    }
}

impl rand::RngCore for Random {
    fn next_u32(&mut self) -> u32 {
        (Random::next_u64(self) >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        Random::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = Random::next_u64(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Configuration for property checks.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of generated cases to evaluate.
    pub test_limit: usize,

    /// Maximum number of accepted shrink steps.
    pub shrink_limit: usize,

    /// Seed for the whole run; a random one is picked when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            test_limit: 100,
            shrink_limit: 1000,
            seed: None,
        }
    }
}

impl Config {
    /// Set the number of cases to evaluate.
    pub fn with_tests(mut self, tests: usize) -> Self {
        self.test_limit = tests;
        self
    }

    /// Set the shrink limit.
    pub fn with_shrinks(mut self, shrinks: usize) -> Self {
        self.shrink_limit = shrinks;
        self
    }

    /// Replay a run from a known seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn splitmix64_mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

fn mix_gamma(z: u64) -> u64 {
    // Odd gamma keeps the period maximal.
    (splitmix64_mix(z) | 1).wrapping_mul(0x9e3779b97f4a7c15)
}
