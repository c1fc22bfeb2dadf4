// SociaClip Random Source
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Every random pick in the crate (hooks, templates, CTAs and hashtag counts) goes
// through `RandomSource`, so callers choose between real randomness, a seeded
// generator for reproducible plans, or a deterministic first-choice picker.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Index in `0..len`; `len` is never zero when called through `choose`
    fn pick_index(&mut self, len: usize) -> usize;

    /// Value in `low..=high`
    fn range_inclusive(&mut self, low: usize, high: usize) -> usize;
}

/// Thread-local generator
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len.max(1))
    }

    fn range_inclusive(&mut self, low: usize, high: usize) -> usize {
        rand::thread_rng().gen_range(low.min(high)..=high.max(low))
    }
}

/// Seeded generator, same seed gives the same plan
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len.max(1))
    }

    fn range_inclusive(&mut self, low: usize, high: usize) -> usize {
        self.rng.gen_range(low.min(high)..=high.max(low))
    }
}

/// Always the first option and the low end of every range
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstChoice;

impl RandomSource for FirstChoice {
    fn pick_index(&mut self, _len: usize) -> usize {
        0
    }

    fn range_inclusive(&mut self, low: usize, high: usize) -> usize {
        low.min(high)
    }
}

/// Pick one element, `None` for an empty slice
pub fn choose<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let idx = rng.pick_index(items.len()).min(items.len() - 1);
    items.get(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let items: Vec<u32> = (0..50).collect();
        let mut a = SeededRandom::new(7);
        let mut b = SeededRandom::new(7);
        for _ in 0..20 {
            assert_eq!(choose(&mut a, &items), choose(&mut b, &items));
        }
    }

    #[test]
    fn test_first_choice() {
        let mut rng = FirstChoice;
        assert_eq!(choose(&mut rng, &["x", "y"]), Some(&"x"));
        assert_eq!(rng.range_inclusive(3, 5), 3);
    }

    #[test]
    fn test_choose_empty() {
        let empty: [u8; 0] = [];
        assert!(choose(&mut ThreadRandom, &empty).is_none());
    }

    #[test]
    fn test_range_within_bounds() {
        let mut rng = ThreadRandom;
        for _ in 0..100 {
            let v = rng.range_inclusive(5, 10);
            assert!((5..=10).contains(&v));
        }
    }
}
