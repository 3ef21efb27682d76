//! Seed types for the initial vapor field.

use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// A 2-D scalar field sampled once per cell during initialization.
///
/// Cells are visited row by row, so stateful sources see a deterministic
/// call order. Any `FnMut(f64, f64) -> f64` closure is a noise source.
pub trait NoiseSource {
    fn sample(&mut self, x: f64, y: f64) -> f64;
}

impl<F> NoiseSource for F
where
    F: FnMut(f64, f64) -> f64,
{
    #[inline]
    fn sample(&mut self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// Complete seed specification for grid initialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    /// Noise pattern for the background field.
    pub pattern: Pattern,
}

/// Predefined noise patterns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// No noise; every cell starts at the background level.
    Flat,
    /// Perlin gradient noise.
    Perlin {
        /// Permutation table seed.
        seed: u32,
    },
    /// Uniform samples in [-1, 1], independent of position.
    WhiteNoise {
        /// Random seed.
        seed: u64,
    },
}

impl Default for Pattern {
    fn default() -> Self {
        Pattern::Perlin { seed: 1 }
    }
}

impl Seed {
    /// Build the noise source this seed describes.
    pub fn sampler(&self) -> Box<dyn NoiseSource> {
        match &self.pattern {
            Pattern::Flat => Box::new(|_: f64, _: f64| 0.0),
            Pattern::Perlin { seed } => {
                let perlin = Perlin::new(*seed);
                Box::new(move |x: f64, y: f64| perlin.get([x, y]))
            }
            Pattern::WhiteNoise { seed } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                Box::new(move |_: f64, _: f64| rng.gen_range(-1.0..=1.0))
            }
        }
    }
}

/// Initialization errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Noise sample at ({i}, {j}) is not finite: {value}")]
    NonFiniteSample { i: usize, j: usize, value: f64 },
}
