//! Hex Snowflake - Reaction-diffusion crystal growth on a hexagonal lattice.
//!
//! A cellular automaton grows a snowflake from a single frozen seed. Each
//! cell carries a coldness (vapor density); cells at or above 1.0 are
//! frozen. Cells next to the crystal are receptive and accrete vapor,
//! every other cell diffuses to its six hexagonal neighbors.
//!
//! # Architecture
//!
//! - `schema`: Configuration types and noise seeding
//! - `compute`: Hex grid, initializer and the step function
//! - `render`: Grayscale rendering and PNG output
//!
//! # Example
//!
//! ```rust,no_run
//! use hex_snowflake::{
//!     compute::{Automaton, Grid, GrowthStats},
//!     schema::{GrowthConfig, Seed},
//! };
//!
//! let config = GrowthConfig {
//!     size: 200,
//!     iterations: 2_000,
//!     ..Default::default()
//! };
//! let mut grid = Grid::from_seed(&Seed::default(), &config)?;
//!
//! let mut automaton = Automaton::new(&config)?;
//! automaton.run(&mut grid, config.iterations);
//!
//! println!("Frozen cells: {}", GrowthStats::from_grid(&grid).frozen_cells);
//! hex_snowflake::render::save_png(&grid, "snowflake.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod compute;
pub mod render;
pub mod schema;

// Re-export commonly used types
pub use compute::{Automaton, CellStatus, Grid, GrowthStats};
pub use schema::{GrowthConfig, Pattern, Seed};
