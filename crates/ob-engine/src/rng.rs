//! Seeded generator.
//!
//! Every consultation and every retry attempt builds its own generator from
//! its own derived seed; a generator is never shared between calls.

use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A pseudo-random source built from exactly one seed.
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    rng: StdRng,
}

impl SeededRng {
    /// Build a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The seed this generator was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform real in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Integer in `lo..=hi`. Returns `lo` when the range is empty.
    pub fn range(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }

    /// Pick one element, or `None` from an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.rng.random_range(0..items.len()))
    }

    /// Pick one index with probability proportional to its weight.
    ///
    /// Returns `None` when the weights are empty, all zero, or invalid.
    pub fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        let dist = WeightedIndex::new(weights).ok()?;
        Some(self.rng.sample(&dist))
    }

    /// Pick up to `k` distinct indices without replacement, each draw
    /// proportional to the weights still in the pool.
    pub fn weighted_sample(&mut self, weights: &[f64], k: usize) -> Vec<usize> {
        let mut pool: Vec<(usize, f64)> = weights.iter().copied().enumerate().collect();
        let mut picked = Vec::with_capacity(k.min(pool.len()));
        while picked.len() < k && !pool.is_empty() {
            let current: Vec<f64> = pool.iter().map(|(_, w)| *w).collect();
            let Some(pos) = self.weighted_index(&current) else {
                break;
            };
            picked.push(pool.remove(pos).0);
        }
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRng::new(7);
        let mut b = SeededRng::new(7);
        let xs: Vec<f64> = (0..10).map(|_| a.uniform()).collect();
        let ys: Vec<f64> = (0..10).map(|_| b.uniform()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededRng::new(1);
        let mut b = SeededRng::new(2);
        let xs: Vec<f64> = (0..10).map(|_| a.uniform()).collect();
        let ys: Vec<f64> = (0..10).map(|_| b.uniform()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn uniform_in_unit_interval() {
        let mut rng = SeededRng::new(42);
        for _ in 0..1000 {
            let x = rng.uniform();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn range_is_inclusive() {
        let mut rng = SeededRng::new(42);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let x = rng.range(1, 3);
            assert!((1..=3).contains(&x));
            seen.insert(x);
        }
        assert_eq!(seen.len(), 3);
        assert_eq!(rng.range(5, 5), 5);
        assert_eq!(rng.range(5, 1), 5);
    }

    #[test]
    fn choose_from_empty_is_none() {
        let mut rng = SeededRng::new(0);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&["only"]), Some(&"only"));
    }

    #[test]
    fn zero_weight_never_picked() {
        let mut rng = SeededRng::new(3);
        for _ in 0..500 {
            assert_ne!(rng.weighted_index(&[1.0, 0.0, 2.0]), Some(1));
        }
        assert_eq!(rng.weighted_index(&[]), None);
        assert_eq!(rng.weighted_index(&[0.0, 0.0]), None);
    }

    #[test]
    fn weighted_sample_is_without_replacement() {
        let mut rng = SeededRng::new(11);
        for _ in 0..100 {
            let picked = rng.weighted_sample(&[1.0, 5.0, 0.5, 2.0, 0.1], 3);
            assert_eq!(picked.len(), 3);
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), 3);
            assert!(picked.iter().all(|i| *i < 5));
        }
    }

    #[test]
    fn weighted_sample_caps_at_pool_size() {
        let mut rng = SeededRng::new(11);
        assert_eq!(rng.weighted_sample(&[1.0, 1.0], 3).len(), 2);
    }

    #[test]
    fn heavier_weight_wins_more_often() {
        let mut rng = SeededRng::new(99);
        let mut heavy = 0;
        for _ in 0..2000 {
            if rng.weighted_index(&[1.0, 9.0]) == Some(1) {
                heavy += 1;
            }
        }
        assert!(heavy > 1500, "heavy picked {heavy} times");
    }
}
