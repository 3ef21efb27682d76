//! Growth statistics for monitoring.

use serde::{Deserialize, Serialize};

use super::{CellStatus, FREEZING_POINT, Grid};

/// Summary of the in-hexagon cells of a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthStats {
    pub generation: u64,
    pub total_mass: f64,
    pub max_coldness: f64,
    pub min_coldness: f64,
    pub frozen_cells: usize,
    pub receptive_cells: usize,
}

impl GrowthStats {
    /// Compute statistics from a grid, ignoring out-of-bound cells.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut total_mass = 0.0f64;
        let mut max_coldness = f64::NEG_INFINITY;
        let mut min_coldness = f64::INFINITY;
        let mut frozen_cells = 0usize;
        let mut receptive_cells = 0usize;

        for (&v, &status) in grid.coldness_field().iter().zip(grid.status_field()) {
            if status == CellStatus::OutOfBound {
                continue;
            }
            total_mass += v;
            max_coldness = max_coldness.max(v);
            min_coldness = min_coldness.min(v);
            if v >= FREEZING_POINT {
                frozen_cells += 1;
            }
            if status == CellStatus::Receptive {
                receptive_cells += 1;
            }
        }

        Self {
            generation: grid.generation(),
            total_mass,
            max_coldness,
            min_coldness,
            frozen_cells,
            receptive_cells,
        }
    }
}
