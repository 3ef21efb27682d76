//! Initial grid construction from a noise field.

use crate::schema::{GrowthConfig, NoiseSource, Seed, SeedError};

use super::{CellStatus, FREEZING_POINT, Grid};

/// Build the step-0 grid.
///
/// Every cell gets `noise(i * noise_scale, j * noise_scale) * noise_amplitude + background`,
/// the hexagon mask is applied, and the center cell is forced to the freezing point.
pub fn initialize<N>(config: &GrowthConfig, noise: &mut N) -> Result<Grid, SeedError>
where
    N: NoiseSource + ?Sized,
{
    config.validate()?;

    let mut grid = Grid::new(config.size)?;
    let size = grid.size();

    for i in 0..size {
        for j in 0..size {
            let sample = noise.sample(i as f64 * config.noise_scale, j as f64 * config.noise_scale);
            if !sample.is_finite() {
                return Err(SeedError::NonFiniteSample { i, j, value: sample });
            }
            grid.set_coldness(i, j, sample * config.noise_amplitude + config.background);
        }
    }

    let center = grid.center();
    grid.set_coldness(center, center, FREEZING_POINT);

    let prefrozen = (0..size)
        .flat_map(|i| (0..size).map(move |j| (i, j)))
        .filter(|&(i, j)| {
            (i, j) != (center, center)
                && grid.status(i, j) != CellStatus::OutOfBound
                && grid.is_frozen(i, j)
        })
        .count();
    if prefrozen > 0 {
        log::warn!("{prefrozen} cells start above the freezing point besides the seed");
    }

    log::info!(
        "Initialized {size}x{size} grid (background={}, noise_amplitude={})",
        config.background,
        config.noise_amplitude
    );

    Ok(grid)
}

impl Grid {
    /// Create the step-0 grid from a seed pattern.
    pub fn from_seed(seed: &Seed, config: &GrowthConfig) -> Result<Self, SeedError> {
        let mut sampler = seed.sampler();
        initialize(config, sampler.as_mut())
    }
}
