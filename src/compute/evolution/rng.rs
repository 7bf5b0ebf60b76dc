//! Seedable random source shared by every evolution operator.

use rand::prelude::*;

/// Random number generator wrapper for strand operations.
///
/// A run owns exactly one of these; the seed it was created from is kept so
/// the run can be reproduced.
#[derive(Debug, Clone)]
pub struct StrandRng {
    rng: StdRng,
    seed: u64,
}

impl StrandRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this generator was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Uniform integer in `low..=high`.
    pub fn range_inclusive(&mut self, low: usize, high: usize) -> usize {
        self.rng.gen_range(low..=high)
    }

    /// Uniform draw in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Fair coin flip.
    pub fn bit(&mut self) -> bool {
        self.rng.r#gen::<bool>()
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        values.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = StrandRng::new(7);
        let mut b = StrandRng::new(7);
        for _ in 0..32 {
            assert_eq!(a.unit(), b.unit());
            assert_eq!(a.index(1000), b.index(1000));
        }
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn test_ranges() {
        let mut rng = StrandRng::new(42);
        for _ in 0..200 {
            assert!(rng.index(3) < 3);
            let v = rng.range_inclusive(1, 4);
            assert!((1..=4).contains(&v));
            let u = rng.unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = StrandRng::new(3);
        let mut values: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut values);
        values.sort_unstable();
        assert_eq!(values, (0..20).collect::<Vec<_>>());
    }
}
