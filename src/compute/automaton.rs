//! Automaton - Main simulation driver for snowflake growth.
//!
//! Each step runs two phases over the whole grid:
//!
//! 1. Mask update: every frozen cell promotes itself and its six neighbors
//!    to receptive.
//! 2. Coldness update: non-receptive cells keep half their vapor and hand
//!    `A/12` of it to each neighbor, receptive cells add `Y`. The new field
//!    is computed from the old one only and swapped in at the end.

use rayon::prelude::*;

use crate::schema::{ConfigError, GrowthConfig};

use super::{CellStatus, FREEZING_POINT, Grid, HEX_OFFSETS};

/// CPU snowflake automaton.
pub struct Automaton {
    /// Diffusion transfer coefficient (A).
    diffusion: f64,
    /// Accretion per step for receptive cells (Y).
    accretion: f64,
    /// Pre-allocated buffer for the next coldness field (reused each step).
    next: Vec<f64>,
}

impl Automaton {
    /// Create a new automaton from configuration.
    pub fn new(config: &GrowthConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            diffusion: config.diffusion,
            accretion: config.accretion,
            next: vec![0.0; config.grid_size()],
        })
    }

    /// Perform one simulation step.
    pub fn step(&mut self, grid: &mut Grid) {
        let promoted = promote_receptive(grid);

        self.next.resize(grid.coldness_field().len(), 0.0);
        diffuse_into(grid, self.diffusion, self.accretion, &mut self.next);
        grid.swap_coldness(&mut self.next);

        log::debug!(
            "step {}: {} cells became receptive",
            grid.generation(),
            promoted
        );
    }

    /// Run simulation for specified number of steps.
    pub fn run(&mut self, grid: &mut Grid, steps: u64) {
        for _ in 0..steps {
            self.step(grid);
        }
    }
}

/// Phase 1: promote every frozen cell and its neighbors to receptive.
///
/// Out-of-bound cells are neither scanned nor promoted. Returns the number
/// of cells that changed status.
pub fn promote_receptive(grid: &mut Grid) -> usize {
    let size = grid.size();
    let (coldness, status) = grid.fields_mut();
    let mut promoted = 0;

    for i in 0..size {
        for j in 0..size {
            let idx = i * size + j;
            if status[idx] == CellStatus::OutOfBound || coldness[idx] < FREEZING_POINT {
                continue;
            }

            let cells = std::iter::once(idx).chain(HEX_OFFSETS.iter().map(|&(di, dj)| {
                i.wrapping_add_signed(di) * size + j.wrapping_add_signed(dj)
            }));
            for n in cells {
                if status[n] == CellStatus::NonReceptive {
                    status[n] = CellStatus::Receptive;
                    promoted += 1;
                }
            }
        }
    }

    promoted
}

/// Phase 2: write the next coldness field into `next`.
///
/// Every cell gathers its own term plus `A * v / 12` from each non-receptive
/// neighbor. Because the neighbor offsets are symmetric this is the same
/// total each neighbor would scatter, but rows can be computed
/// independently and every cell sums in a fixed order, so the result does
/// not depend on thread scheduling.
///
/// Out-of-bound cells come out as 0.0: mass diffused across the hexagon
/// border is discarded.
pub fn diffuse_into(grid: &Grid, diffusion: f64, accretion: f64, next: &mut [f64]) {
    let size = grid.size();
    let coldness = grid.coldness_field();
    let status = grid.status_field();
    assert_eq!(next.len(), coldness.len(), "next buffer has wrong length");

    next.par_chunks_mut(size)
        .enumerate()
        .for_each(|(i, row)| {
            for (j, out) in row.iter_mut().enumerate() {
                let idx = i * size + j;
                let v0 = coldness[idx];

                let mut value = match status[idx] {
                    CellStatus::OutOfBound => {
                        *out = 0.0;
                        continue;
                    }
                    CellStatus::NonReceptive => v0 / 2.0,
                    CellStatus::Receptive => v0 + accretion,
                };

                for &(di, dj) in &HEX_OFFSETS {
                    let n = i.wrapping_add_signed(di) * size + j.wrapping_add_signed(dj);
                    if status[n] == CellStatus::NonReceptive {
                        value += diffusion * coldness[n] / 12.0;
                    }
                }

                *out = value;
            }
        });
}
