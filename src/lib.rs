//! Elementary cellular automata.
//!
//! This crate evolves one-dimensional, two-state, nearest-neighbor cellular
//! automata identified by their Wolfram rule number (0-255), and renders the
//! resulting space-time diagram.
//!
//! # Architecture
//!
//! - `schema`: Run configuration, boundary conditions and seed patterns
//! - `compute`: Rule tables, the evolver and the resulting grid
//! - `render`: Text and bitmap output
//!
//! # Example
//!
//! ```rust
//! use elementary_ca::{
//!     compute::{Evolver, RuleTable},
//!     schema::{Boundary, Seed},
//! };
//!
//! let table = RuleTable::new(90);
//! let seed = Seed::default().generate(7).unwrap();
//! let grid = Evolver::new(table, Boundary::Strict).evolve(&seed, 4).unwrap();
//!
//! assert_eq!(grid.rows[1], vec![0, 0, 1, 0, 1, 0, 0]);
//! ```

pub mod compute;
pub mod render;
pub mod schema;

// Re-export commonly used types
pub use compute::{Evolver, Grid, GridStats, RuleTable, run};
pub use schema::{Boundary, ConfigError, Pattern, RunConfig, Seed};
