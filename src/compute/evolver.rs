//! Evolver - main driver for elementary automaton runs.
//!
//! Applies a [`RuleTable`] to each generation under a fixed [`Boundary`],
//! producing the full space-time [`Grid`].

use rayon::prelude::*;

use super::{Cell, Grid, Neighborhood, Row, RuleTable};
use crate::schema::{Boundary, ConfigError, MIN_WIDTH, RunConfig};

/// Rows at least this wide are updated with rayon.
pub const PARALLEL_THRESHOLD: usize = 1 << 14;

/// Applies one rule under one boundary condition.
#[derive(Debug, Clone)]
pub struct Evolver {
    table: RuleTable,
    boundary: Boundary,
}

impl Evolver {
    /// Create new evolver from a rule table and boundary condition.
    pub fn new(table: RuleTable, boundary: Boundary) -> Self {
        Self { table, boundary }
    }

    /// Create new evolver from a run configuration.
    pub fn from_config(config: &RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.rule_table()?, config.boundary))
    }

    /// Get rule table reference.
    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Get boundary condition.
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Neighborhood of cell `i` in `row`, resolving edges by the boundary condition.
    #[inline]
    pub fn neighborhood(&self, row: &[Cell], i: usize) -> Neighborhood {
        let last = row.len() - 1;
        let left = if i > 0 {
            row[i - 1]
        } else {
            self.boundary.outside(row[last])
        };
        let right = if i < last {
            row[i + 1]
        } else {
            self.boundary.outside(row[0])
        };
        Neighborhood::new(left, row[i], right)
    }

    /// Compute the next generation of `row` into `next`.
    ///
    /// `row` is only read, so no cell ever sees a partially updated neighbor.
    pub fn step_into(&self, row: &[Cell], next: &mut [Cell]) {
        debug_assert_eq!(row.len(), next.len());
        if row.len() >= PARALLEL_THRESHOLD {
            self.step_parallel_into(row, next);
        } else {
            self.step_serial_into(row, next);
        }
    }

    /// Compute the next generation of `row`.
    pub fn step(&self, row: &[Cell]) -> Row {
        let mut next = vec![0; row.len()];
        self.step_into(row, &mut next);
        next
    }

    fn step_serial_into(&self, row: &[Cell], next: &mut [Cell]) {
        for (i, out) in next.iter_mut().enumerate() {
            *out = self.table.get(self.neighborhood(row, i));
        }
    }

    fn step_parallel_into(&self, row: &[Cell], next: &mut [Cell]) {
        next.par_iter_mut()
            .enumerate()
            .for_each(|(i, out)| *out = self.table.get(self.neighborhood(row, i)));
    }

    /// Evolve `seed` into a grid of `iterations` generations.
    ///
    /// Performs exactly `iterations - 1` update passes. Inputs are checked
    /// before anything is computed.
    pub fn evolve(&self, seed: &[Cell], iterations: usize) -> Result<Grid, ConfigError> {
        validate_row(seed)?;
        if iterations < 1 {
            return Err(ConfigError::InvalidIterations(iterations.to_string()));
        }

        log::debug!(
            "evolving {} cells for {} generations ({}, {:?})",
            seed.len(),
            iterations,
            self.table,
            self.boundary
        );

        let mut rows: Vec<Row> = Vec::new();
        rows.try_reserve(iterations)
            .map_err(|_| ConfigError::InvalidIterations(iterations.to_string()))?;
        rows.push(seed.to_vec());
        for _ in 1..iterations {
            let next = self.step(&rows[rows.len() - 1]);
            rows.push(next);
        }

        Ok(Grid {
            rule: self.table.rule(),
            boundary: self.boundary,
            width: seed.len(),
            rows,
        })
    }
}

/// Check that a row can be evolved: at least [`MIN_WIDTH`] cells, all 0 or 1.
pub fn validate_row(row: &[Cell]) -> Result<(), ConfigError> {
    if row.len() < MIN_WIDTH {
        return Err(ConfigError::InvalidWidth(row.len().to_string()));
    }
    if let Some((index, &value)) = row.iter().enumerate().find(|&(_, &c)| c > 1) {
        return Err(ConfigError::InvalidCell { index, value });
    }
    Ok(())
}

/// Validate `config`, build its seed row and evolve it.
pub fn run(config: &RunConfig) -> Result<Grid, ConfigError> {
    let evolver = Evolver::from_config(config)?;
    let seed = config.seed.generate(config.width)?;
    evolver.evolve(&seed, config.iterations)
}
