//! Seed types for initializing automaton runs.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::compute::{Cell, Row};

/// Complete seed specification for the first generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern to use for seeding.
    pub pattern: Pattern,
}

/// Predefined patterns for the seed row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// One live cell at `width / 2`.
    #[default]
    SingleCell,
    /// Explicit live cell indices.
    Cells {
        indices: Vec<usize>,
    },
    /// Uniform random cells.
    Noise {
        /// Probability that a cell starts alive (0.0-1.0).
        density: f64,
        /// Random seed.
        seed: u64,
    },
}

impl Seed {
    /// Seed with explicit live cells.
    pub fn cells(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            pattern: Pattern::Cells {
                indices: indices.into(),
            },
        }
    }

    /// Check the pattern fits a row of `width` cells.
    pub fn validate(&self, width: usize) -> Result<(), ConfigError> {
        match &self.pattern {
            Pattern::SingleCell => Ok(()),
            Pattern::Cells { indices } => match indices.iter().find(|&&i| i >= width) {
                Some(&index) => Err(ConfigError::InvalidSeedIndex { index, width }),
                None => Ok(()),
            },
            Pattern::Noise { density, .. } => {
                if (0.0..=1.0).contains(density) {
                    Ok(())
                } else {
                    Err(ConfigError::InvalidDensity(*density))
                }
            }
        }
    }

    /// Generate the seed row.
    pub fn generate(&self, width: usize) -> Result<Row, ConfigError> {
        self.validate(width)?;
        let mut row: Row = vec![0; width];

        match &self.pattern {
            Pattern::SingleCell => {
                if width > 0 {
                    row[width / 2] = 1;
                }
            }
            Pattern::Cells { indices } => {
                for &i in indices {
                    row[i] = 1;
                }
            }
            Pattern::Noise { density, seed } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                for cell in row.iter_mut() {
                    *cell = rng.gen_bool(*density) as Cell;
                }
            }
        }

        Ok(row)
    }
}
