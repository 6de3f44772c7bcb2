//! Injectable randomness for score jitter, root-cause fallback and the feed

use rand::prelude::*;
use rand::rngs::StdRng;

/// Source of uniform floats in `[0, 1)`
pub trait RandomSource: Send {
    fn next_f64(&mut self) -> f64;
}

// thread-local generator, the production wiring
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&mut self) -> f64 {
        rand::rng().random::<f64>()
    }
}

// reproducible runs (--seed)
#[derive(Debug)]
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
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed list of values, wrapping around at the end.
/// Values are clamped into `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        let values = if values.is_empty() { vec![0.0] } else { values };
        Self { values, pos: 0 }
    }

    /// Always yields 0: no jitter, first catalog entry, never re-analyzes
    /// unless the probability is 1.
    pub fn zero() -> Self {
        Self::new(vec![0.0])
    }
}

impl RandomSource for SequenceRandom {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.pos % self.values.len()];
        self.pos = self.pos.wrapping_add(1);
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Uniform pick from a non-empty slice
pub fn pick<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> &'a T {
    let idx = (rng.next_f64() * items.len() as f64) as usize;
    &items[idx.min(items.len() - 1)]
}
