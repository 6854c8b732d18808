//! Space-time grid produced by an evolution run.

use serde::{Deserialize, Serialize};

use crate::schema::Boundary;

/// State of one cell: 0 (dead) or 1 (alive).
pub type Cell = u8;

/// One generation of cell states.
pub type Row = Vec<Cell>;

/// Ordered generations of a run, seed first.
///
/// Every row has length `width`. Row `k + 1` is one update pass applied to row `k`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Wolfram rule number the grid was evolved with.
    pub rule: u8,
    /// Boundary condition the grid was evolved with.
    pub boundary: Boundary,
    /// Row width in cells.
    pub width: usize,
    /// Generations, row 0 is the seed.
    pub rows: Vec<Row>,
}

impl Grid {
    /// Number of generations (including the seed).
    #[inline]
    pub fn iterations(&self) -> usize {
        self.rows.len()
    }

    /// Cell at generation `iteration`, position `index`.
    #[inline]
    pub fn get(&self, iteration: usize, index: usize) -> Cell {
        self.rows[iteration][index]
    }

    /// The seed row.
    pub fn first(&self) -> &[Cell] {
        &self.rows[0]
    }

    /// The last computed generation.
    pub fn last(&self) -> &[Cell] {
        &self.rows[self.rows.len() - 1]
    }

    /// Live cells per generation.
    pub fn populations(&self) -> Vec<usize> {
        self.rows.iter().map(|row| population(row)).collect()
    }
}

/// Count live cells in a row.
#[inline]
pub fn population(row: &[Cell]) -> usize {
    row.iter().filter(|&&c| c != 0).count()
}

/// Run statistics for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridStats {
    pub iterations: usize,
    pub width: usize,
    pub initial_population: usize,
    pub final_population: usize,
    pub max_population: usize,
    /// Fraction of live cells in the last generation.
    pub final_density: f64,
    /// First generation that repeats an earlier one, with the earlier index.
    pub first_repeat: Option<(usize, usize)>,
}

impl GridStats {
    /// Compute statistics from a grid.
    pub fn from_grid(grid: &Grid) -> Self {
        let populations = grid.populations();
        let final_population = populations.last().copied().unwrap_or(0);

        Self {
            iterations: grid.iterations(),
            width: grid.width,
            initial_population: populations.first().copied().unwrap_or(0),
            final_population,
            max_population: populations.iter().copied().max().unwrap_or(0),
            final_density: if grid.width > 0 {
                final_population as f64 / grid.width as f64
            } else {
                0.0
            },
            first_repeat: first_repeat(&grid.rows),
        }
    }

    /// Cycle period implied by the first repeat, if any.
    pub fn period(&self) -> Option<usize> {
        self.first_repeat.map(|(later, earlier)| later - earlier)
    }
}

fn first_repeat(rows: &[Row]) -> Option<(usize, usize)> {
    let mut seen = std::collections::HashMap::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        if let Some(&earlier) = seen.get(row) {
            return Some((i, earlier));
        }
        seen.insert(row, i);
    }
    None
}
