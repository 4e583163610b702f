use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::error::{Error, Result};

/// Number of levels used when no explicit configuration is given.
pub const DEFAULT_MAX_LEVEL: usize = 16;

/// Chance that a node present at one level is promoted to the next.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Hard cap on configurable maximum levels. Heights beyond this buy nothing
/// and only inflate the header's link array.
pub const MAX_LEVEL_LIMIT: usize = 64;

/// Decides how tall each inserted node grows.
///
/// `get_height` must return a value in `[1, max_height]`. The intended
/// distribution is geometric: a node reaches height `k` with probability
/// `p^(k-1)`, which is what keeps searches logarithmic in expectation.
pub trait HeightControl {
    fn max_height(&self) -> usize;
    fn get_height(&mut self) -> usize;
}

/// Height generator that flips a coin per level until the first failure.
///
/// The random source is a type parameter so callers can feed it a fixed
/// sequence of outcomes and obtain fully reproducible structures.
pub struct GeometricalGenerator<R = SmallRng> {
    upgrade_probability_: f64,
    max_height_: usize,
    rng_: R,
}

impl GeometricalGenerator<SmallRng> {
    pub fn new(max_height: usize, upgrade_probability: f64) -> Result<Self> {
        Self::with_rng(max_height, upgrade_probability, SmallRng::from_entropy())
    }
}

impl<R: RngCore> GeometricalGenerator<R> {
    pub fn with_rng(max_height: usize, upgrade_probability: f64, rng: R) -> Result<Self> {
        if max_height == 0 || max_height > MAX_LEVEL_LIMIT {
            return Err(Error::InvalidMaxLevel(max_height));
        }

        if upgrade_probability <= 0.0 || upgrade_probability >= 1.0 {
            return Err(Error::InvalidProbability(upgrade_probability));
        }

        Ok(GeometricalGenerator {
            upgrade_probability_: upgrade_probability,
            max_height_: max_height,
            rng_: rng,
        })
    }
}

impl<R: RngCore> HeightControl for GeometricalGenerator<R> {
    fn max_height(&self) -> usize {
        self.max_height_
    }

    fn get_height(&mut self) -> usize {
        // Number of successes until the first failure, capped at the maximum.
        // Each iteration consumes exactly one draw from the source.
        let mut height = 1;

        while height < self.max_height_ && self.rng_.gen::<f64>() < self.upgrade_probability_ {
            height += 1;
        }

        height
    }
}
