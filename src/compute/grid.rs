//! Hexagonal lattice stored in a square array.
//!
//! Array indices `(i, j)` are axial coordinates relative to the center
//! `(size/2, size/2)`; the implicit third cube coordinate is
//! `k = -(i - size/2) - (j - size/2)`. Only six of the eight square-array
//! neighbors are hexagonal neighbors:
//!
//! ```text
//! . N N
//! N O N
//! N N .
//! ```
//!
//! Cells whose hex distance from the center exceeds `size/2 - 2` are
//! out of bound, so every active cell and its neighbors stay inside the
//! physical array.

use serde::{Deserialize, Serialize};

use crate::schema::{ConfigError, validate_size};

/// Coldness at or above which a cell is frozen.
pub const FREEZING_POINT: f64 = 1.0;

/// Shrinks the hexagon radius below `size / 2`.
pub const BORDER_MARGIN: usize = 2;

/// Hexagonal neighbor offsets `(di, dj)`.
///
/// The set is closed under negation, so "donates to" and "receives from"
/// are the same relation.
pub const HEX_OFFSETS: [(isize, isize); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0)];

/// Per-cell participation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellStatus {
    /// Diffuses mass to its neighbors.
    #[default]
    NonReceptive,
    /// Next to (or part of) the crystal; accretes instead of diffusing.
    Receptive,
    /// Outside the simulated hexagon.
    OutOfBound,
}

/// Whether `(i, j)` lies inside the simulated hexagon of a `size` x `size` grid.
#[inline]
pub fn in_hexagon(size: usize, i: usize, j: usize) -> bool {
    let half = (size / 2) as i64;
    let x = i as i64 - half;
    let z = j as i64 - half;
    let k = -x - z;
    x.abs().max(z.abs()).max(k.abs()) <= half - BORDER_MARGIN as i64
}

/// Coldness and status fields over a fixed `size` x `size` index space.
///
/// Both fields are flat row-major arrays indexed by `i * size + j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    coldness: Vec<f64>,
    status: Vec<CellStatus>,
    generation: u64,
}

impl Grid {
    /// Create a grid with zero coldness and the static hexagon mask applied.
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        validate_size(size)?;

        let status = (0..size * size)
            .map(|idx| {
                if in_hexagon(size, idx / size, idx % size) {
                    CellStatus::NonReceptive
                } else {
                    CellStatus::OutOfBound
                }
            })
            .collect();

        Ok(Self {
            size,
            coldness: vec![0.0; size * size],
            status,
            generation: 0,
        })
    }

    /// Grid extent along either axis.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Index of the center cell along either axis.
    #[inline]
    pub fn center(&self) -> usize {
        self.size / 2
    }

    /// Number of steps applied since initialization.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Convert `(i, j)` to a flat index.
    ///
    /// Panics if either index falls outside the physical array.
    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.size && j < self.size,
            "cell ({i}, {j}) outside {0}x{0} grid",
            self.size
        );
        i * self.size + j
    }

    /// Coldness and status at `(i, j)`.
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> (f64, CellStatus) {
        let idx = self.idx(i, j);
        (self.coldness[idx], self.status[idx])
    }

    #[inline]
    pub fn coldness(&self, i: usize, j: usize) -> f64 {
        self.coldness[self.idx(i, j)]
    }

    #[inline]
    pub fn status(&self, i: usize, j: usize) -> CellStatus {
        self.status[self.idx(i, j)]
    }

    #[inline]
    pub fn set_coldness(&mut self, i: usize, j: usize, value: f64) {
        let idx = self.idx(i, j);
        self.coldness[idx] = value;
    }

    #[inline]
    pub fn set_status(&mut self, i: usize, j: usize, status: CellStatus) {
        let idx = self.idx(i, j);
        self.status[idx] = status;
    }

    /// Frozen is derived from coldness, never stored.
    #[inline]
    pub fn is_frozen(&self, i: usize, j: usize) -> bool {
        self.coldness(i, j) >= FREEZING_POINT
    }

    #[inline]
    pub fn is_in_hexagon(&self, i: usize, j: usize) -> bool {
        in_hexagon(self.size, i, j)
    }

    /// The six hexagonal neighbors of `(i, j)`, in `HEX_OFFSETS` order.
    ///
    /// Panics if `(i, j)` sits on the physical array edge.
    pub fn neighbors(&self, i: usize, j: usize) -> [(usize, usize); 6] {
        assert!(
            (1..self.size - 1).contains(&i) && (1..self.size - 1).contains(&j),
            "cell ({i}, {j}) has no full neighborhood in {0}x{0} grid",
            self.size
        );
        HEX_OFFSETS.map(|(di, dj)| (i.wrapping_add_signed(di), j.wrapping_add_signed(dj)))
    }

    /// Row-major coldness field, for rendering and inspection.
    #[inline]
    pub fn coldness_field(&self) -> &[f64] {
        &self.coldness
    }

    /// Row-major status field.
    #[inline]
    pub fn status_field(&self) -> &[CellStatus] {
        &self.status
    }

    /// Split borrow used by the mask pass.
    pub(crate) fn fields_mut(&mut self) -> (&[f64], &mut [CellStatus]) {
        (&self.coldness, &mut self.status)
    }

    /// Install a freshly computed coldness field, handing the old one back in `next`.
    pub(crate) fn swap_coldness(&mut self, next: &mut Vec<f64>) {
        debug_assert_eq!(next.len(), self.coldness.len());
        std::mem::swap(&mut self.coldness, next);
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Cells in a hexagon of radius r: 3r(r+1) + 1.
    fn hexagon_cells(size: usize) -> usize {
        let r = size / 2 - BORDER_MARGIN;
        3 * r * (r + 1) + 1
    }

    #[test]
    fn test_new_grid_mask() {
        let grid = Grid::new(8).unwrap();
        let c = grid.center();

        assert_eq!(grid.at(c, c), (0.0, CellStatus::NonReceptive));
        assert_eq!(grid.status(0, 0), CellStatus::OutOfBound);
        assert_eq!(grid.status(7, 7), CellStatus::OutOfBound);
        // Corners of the square that the hexagon cuts off.
        assert_eq!(grid.status(2, 2), CellStatus::OutOfBound);
        assert_eq!(grid.status(6, 6), CellStatus::OutOfBound);
        assert_eq!(grid.status(2, 6), CellStatus::NonReceptive);
        assert_eq!(grid.status(6, 2), CellStatus::NonReceptive);

        let active = grid
            .status_field()
            .iter()
            .filter(|&&s| s != CellStatus::OutOfBound)
            .count();
        assert_eq!(active, hexagon_cells(8));
    }

    #[test]
    fn test_rejects_invalid_size() {
        assert!(Grid::new(4).is_err());
        assert!(Grid::new(15).is_err());
        assert!(matches!(
            Grid::new(usize::MAX - 1),
            Err(ConfigError::SizeTooLarge { .. })
        ));
    }

    #[test]
    fn test_neighbor_order() {
        let grid = Grid::new(16).unwrap();
        assert_eq!(
            grid.neighbors(5, 9),
            [(4, 9), (4, 10), (5, 8), (5, 10), (6, 8), (6, 9)]
        );
    }

    #[test]
    fn test_setters() {
        let mut grid = Grid::new(8).unwrap();
        grid.set_coldness(3, 4, 1.25);
        grid.set_status(3, 4, CellStatus::Receptive);

        assert_eq!(grid.at(3, 4), (1.25, CellStatus::Receptive));
        assert!(grid.is_frozen(3, 4));
        assert!(!grid.is_frozen(4, 4));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_range_access_panics() {
        let grid = Grid::new(8).unwrap();
        grid.at(3, 8);
    }

    #[test]
    #[should_panic(expected = "no full neighborhood")]
    fn test_edge_neighbors_panic() {
        let grid = Grid::new(8).unwrap();
        grid.neighbors(0, 4);
    }

    proptest! {
        #[test]
        fn prop_hexagon_cell_count(half in 4usize..64) {
            let grid = Grid::new(half * 2).unwrap();
            let active = grid
                .status_field()
                .iter()
                .filter(|&&s| s != CellStatus::OutOfBound)
                .count();
            prop_assert_eq!(active, hexagon_cells(half * 2));
        }

        #[test]
        fn prop_active_cells_keep_border_margin(half in 4usize..64, i in 0usize..128, j in 0usize..128) {
            let size = half * 2;
            let (i, j) = (i % size, j % size);
            prop_assume!(in_hexagon(size, i, j));

            prop_assert!(i >= BORDER_MARGIN && i <= size - BORDER_MARGIN);
            prop_assert!(j >= BORDER_MARGIN && j <= size - BORDER_MARGIN);
        }

        #[test]
        fn prop_neighbor_relation_is_symmetric(half in 4usize..64, i in 0usize..128, j in 0usize..128) {
            let size = half * 2;
            let (i, j) = (2 + i % (size - 4), 2 + j % (size - 4));

            let grid = Grid::new(size).unwrap();
            for (ni, nj) in grid.neighbors(i, j) {
                prop_assert!(grid.neighbors(ni, nj).contains(&(i, j)));
            }
        }

        #[test]
        fn prop_hexagon_has_sixfold_symmetry(half in 4usize..64, i in 0usize..128, j in 0usize..128) {
            let size = half * 2;
            let (i, j) = (i % size, j % size);

            // Rotating by 60 degrees maps cube (x, z, k) to (-k, -x, -z).
            let c = (size / 2) as i64;
            let x = i as i64 - c;
            let z = j as i64 - c;
            let k = -x - z;
            let (ri, rj) = (c - k, c - x);
            prop_assume!(ri >= 0 && rj >= 0 && (ri as usize) < size && (rj as usize) < size);

            prop_assert_eq!(
                in_hexagon(size, i, j),
                in_hexagon(size, ri as usize, rj as usize)
            );
        }
    }
}
