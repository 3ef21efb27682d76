//! Configuration types for snowflake growth parameters.

use serde::{Deserialize, Serialize};

/// Smallest grid extent that still leaves a hexagon inside the border margin.
pub const MIN_GRID_SIZE: usize = 8;

/// Largest grid extent accepted; keeps `size * size` cells addressable and
/// the image dimensions within `u32`.
pub const MAX_GRID_SIZE: usize = 1 << 15;

/// Top-level growth configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Grid extent in cells (the grid is `size` x `size`). Must be even.
    pub size: usize,
    /// Diffusion transfer coefficient (A). Mass is conserved exactly at 1.0.
    pub diffusion: f64,
    /// Background coldness bias (B).
    pub background: f64,
    /// Per-step accretion added to receptive cells (Y).
    pub accretion: f64,
    /// Coordinate scale applied before sampling noise (PP).
    pub noise_scale: f64,
    /// Noise amplitude (PM).
    pub noise_amplitude: f64,
    /// Number of automaton steps (L).
    pub iterations: u64,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            size: 800,
            diffusion: 1.0,
            background: 0.4,
            accretion: 0.0001,
            noise_scale: 0.01,
            noise_amplitude: 0.05,
            iterations: 10_000,
        }
    }
}

impl GrowthConfig {
    /// Total number of cells (size * size).
    #[inline]
    pub fn grid_size(&self) -> usize {
        self.size * self.size
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_size(self.size)?;

        let params = [
            ("diffusion", self.diffusion),
            ("background", self.background),
            ("accretion", self.accretion),
            ("noise_scale", self.noise_scale),
            ("noise_amplitude", self.noise_amplitude),
        ];
        for (name, value) in params {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        Ok(())
    }
}

/// Check a grid extent on its own, for callers that build grids without a full config.
pub fn validate_size(size: usize) -> Result<(), ConfigError> {
    if size < MIN_GRID_SIZE {
        return Err(ConfigError::SizeTooSmall {
            size,
            min: MIN_GRID_SIZE,
        });
    }
    if size > MAX_GRID_SIZE {
        return Err(ConfigError::SizeTooLarge {
            size,
            max: MAX_GRID_SIZE,
        });
    }
    if size % 2 != 0 {
        return Err(ConfigError::OddSize(size));
    }
    Ok(())
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid size {size} is too small, need at least {min}")]
    SizeTooSmall { size: usize, min: usize },
    #[error("Grid size {size} is too large, at most {max} is supported")]
    SizeTooLarge { size: usize, max: usize },
    #[error("Grid size must be even, got {0}")]
    OddSize(usize),
    #[error("Parameter `{name}` must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
}
