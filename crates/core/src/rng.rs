//! RNG module - deterministic randomness for tile spawning
//!
//! A small LCG keeps games reproducible from a seed (handy for tests and the
//! headless autoplayer). Ranges are reduced with a multiply-shift on the high
//! bits; the low bits of a power-of-two LCG have very short periods.

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
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Pick one element uniformly.
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.next_range(items.len() as u32) as usize]
    }

    /// Current internal state (reseeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
