//! Randomness sources standing in for real sensor hardware
//!
//! Every simulated reading is derived from uniform samples drawn from a
//! [`RandomSource`]. [`LiveSource`] wraps a seedable PRNG for normal runs and
//! [`ScriptedSource`] replays a fixed list of samples so tests can force a
//! particular outcome.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, info};

/// Supplier of uniform samples in `[0, 1)`
pub trait RandomSource: fmt::Debug {
    /// Draw the next sample
    fn next_unit(&mut self) -> f64;

    /// Draw a sample and report whether it lies strictly above `threshold`
    fn chance_above(&mut self, threshold: f64) -> bool {
        self.next_unit() > threshold
    }

    /// Draw an index in `0..len`
    ///
    /// `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        let index = (self.next_unit() * len as f64).floor() as usize;
        index.min(len.saturating_sub(1))
    }

    /// Draw a value in `low..low + span`
    fn uniform_in(&mut self, low: f64, span: f64) -> f64 {
        low + self.next_unit() * span
    }
}

/// Pseudo-random source for live simulation
#[derive(Debug)]
pub struct LiveSource {
    rng: StdRng,
}

impl LiveSource {
    /// Create a source, seeded for reproducibility when a seed is given
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            info!("Using deterministic seed: {}", seed);
            StdRng::seed_from_u64(seed)
        } else {
            debug!("Using entropy-based random seed");
            StdRng::from_entropy()
        };
        Self { rng }
    }
}

impl RandomSource for LiveSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed sequence of samples, then repeats a fallback value
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: VecDeque<f64>,
    fallback: f64,
    drawn: usize,
}

impl ScriptedSource {
    /// Replay `values` in order; 0.0 once they run out
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self { values: values.into_iter().collect(), fallback: 0.0, drawn: 0 }
    }

    /// Value returned after the script is exhausted
    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Append more samples to the script
    pub fn push(&mut self, value: f64) {
        self.values.push_back(value);
    }

    /// Samples not yet drawn
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    /// Total samples drawn so far, including fallbacks
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        self.drawn += 1;
        self.values.pop_front().unwrap_or(self.fallback)
    }
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}
