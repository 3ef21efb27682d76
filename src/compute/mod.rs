//! Compute module - Hex lattice, initialization and the growth automaton.

mod automaton;
mod grid;
mod initializer;
mod stats;

pub use automaton::*;
pub use grid::*;
pub use initializer::*;
pub use stats::*;
