//! Uniform random stream shared by every stochastic decision in a run.
//!
//! The stream is an ordinary value handed down by `&mut`, so a run is
//! reproducible from its seed and tests can substitute a scripted source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform reals in [0, 1)
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

/// [`UniformSource`] backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct Sampler<R = StdRng> {
    rng: R,
}

impl Sampler<StdRng> {
    /// Seed from system entropy; every run differs
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible stream for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> Sampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> UniformSource for Sampler<R> {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}
