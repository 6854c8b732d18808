//! Compute module - Rule tables and evolution of elementary automata.

mod evolver;
mod grid;
mod rule;

pub use evolver::*;
pub use grid::*;
pub use rule::*;
