//! RNG module - deterministic pseudo-random stream
//!
//! A simple LCG drives virus placement and next-pill colors. The same seed
//! always produces the same stream, which is the load-bearing contract for
//! server/client lockstep and replays. String seeds are folded to a numeric
//! state with FNV-1a so drivers can pass either form.

use crate::types::PillColor;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
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

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Draw one color from the fixed color set
    pub fn next_color(&mut self) -> PillColor {
        PillColor::ALL[self.next_range(PillColor::ALL.len() as u32) as usize]
    }

    /// Current internal state (exported in snapshots for replay verification)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Fold a string seed into a 32-bit LCG seed (FNV-1a)
pub fn hash_seed(seed: &str) -> u32 {
    let mut hash: u32 = 0x811c9dc5;
    for byte in seed.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_zero_seed_remapped() {
        let mut a = SimpleRng::new(0);
        let mut b = SimpleRng::new(1);
        assert_eq!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn test_next_color_in_set() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..50 {
            let c = rng.next_color();
            assert!(PillColor::ALL.contains(&c));
        }
    }

    #[test]
    fn test_hash_seed_stable() {
        // Pinned values: changing these breaks replay compatibility.
        assert_eq!(hash_seed(""), 0x811c9dc5);
        assert_eq!(hash_seed("test-seed"), hash_seed("test-seed"));
        assert_ne!(hash_seed("test-seed"), hash_seed("test-seed2"));
    }
}
