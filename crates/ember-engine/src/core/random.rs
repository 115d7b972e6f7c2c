//! Injected randomness for emission generators.
//!
//! Particles and the engine never draw random numbers themselves; only the
//! generator functions of an emission strategy do, through [`RandomSource`].

/// A source of uniform random numbers.
pub trait RandomSource {
    /// Uniform 64-bit sample.
    fn next_u64(&mut self) -> u64;

    /// Uniform sample in [0, 1).
    fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill the f32 mantissa exactly, so the result stays below 1.0.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform index in [0, len). `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        (self.next_u64() % len as u64) as usize
    }
}

/// Seedable xorshift64 generator; the default random source.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }
}

impl Default for Rng {
    fn default() -> Self {
        Rng::new(42)
    }
}

impl RandomSource for Rng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

/// Uniform real in [min, max).
pub fn uniform_real(rng: &mut dyn RandomSource, min: f32, max: f32) -> f32 {
    min + rng.next_f32() * (max - min)
}

/// Pick one element uniformly. Returns `None` for an empty slice.
pub fn uniform_sample<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.next_index(items.len()))
}
