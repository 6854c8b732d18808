//! Configuration types for elementary automaton runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Seed;
use crate::compute::{Cell, RuleTable};

/// Smallest row that can hold a full 3-cell neighborhood.
pub const MIN_WIDTH: usize = 3;

/// How neighbors past the row edges are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Boundary {
    /// Out-of-range neighbors are dead.
    #[default]
    Strict,
    /// Indices wrap modulo the row width.
    Periodic,
}

impl Boundary {
    pub fn as_str(self) -> &'static str {
        match self {
            Boundary::Strict => "strict",
            Boundary::Periodic => "periodic",
        }
    }

    /// Value of the neighbor outside the row, given the cell on the opposite edge.
    #[inline]
    pub fn outside(self, opposite_edge: Cell) -> Cell {
        match self {
            Boundary::Strict => 0,
            Boundary::Periodic => opposite_edge,
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Boundary {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Boundary::Strict),
            "periodic" => Ok(Boundary::Periodic),
            _ => Err(ConfigError::InvalidBoundary(s.to_string())),
        }
    }
}

impl TryFrom<String> for Boundary {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

fn default_iterations() -> usize {
    1
}

/// Top-level run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Wolfram rule number (0-255).
    pub rule: i64,
    /// Row width in cells.
    pub width: usize,
    /// Number of generations, seed included.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Edge handling.
    #[serde(default)]
    pub boundary: Boundary,
    /// Initial row.
    #[serde(default)]
    pub seed: Seed,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            rule: 90,
            width: 64,
            iterations: 32,
            boundary: Boundary::Strict,
            seed: Seed::default(),
        }
    }
}

impl RunConfig {
    /// Build a configuration from raw command-line strings.
    ///
    /// Checks run in argument order, so the first bad argument is reported.
    pub fn from_args(
        rule: &str,
        width: &str,
        iterations: &str,
        boundary: &str,
    ) -> Result<Self, ConfigError> {
        let rule = rule
            .trim()
            .parse::<i64>()
            .map_err(|_| ConfigError::InvalidRule(rule.to_string()))?;
        RuleTable::from_number(rule)?;

        let width = width
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|&w| w >= MIN_WIDTH)
            .ok_or_else(|| ConfigError::InvalidWidth(width.to_string()))?;
        let iterations = iterations
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| ConfigError::InvalidIterations(iterations.to_string()))?;
        let boundary = boundary.parse()?;

        let config = Self {
            rule,
            width,
            iterations,
            boundary,
            seed: Seed::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON configuration and validate it.
    ///
    /// A boundary string that names no known condition is reported as
    /// `InvalidBoundary`, the same as on the command line.
    pub fn from_json(json: &str) -> Result<Self, ConfigLoadError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(boundary) = value.get("boundary").and_then(serde_json::Value::as_str) {
            boundary.parse::<Boundary>()?;
        }
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Decode the rule number into its table.
    pub fn rule_table(&self) -> Result<RuleTable, ConfigError> {
        RuleTable::from_number(self.rule)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rule_table()?;
        if self.width < MIN_WIDTH {
            return Err(ConfigError::InvalidWidth(self.width.to_string()));
        }
        if self.iterations < 1 {
            return Err(ConfigError::InvalidIterations(self.iterations.to_string()));
        }
        self.seed.validate(self.width)
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Rule should be a valid integer between 0 and 255, got `{0}`")]
    InvalidRule(String),
    #[error("Size should be an integer greater than or equal to 3, got `{0}`")]
    InvalidWidth(String),
    #[error("Iterations should be an integer greater than or equal to 1, got `{0}`")]
    InvalidIterations(String),
    #[error("Boundary condition should be 'strict' or 'periodic', got `{0}`")]
    InvalidBoundary(String),
    #[error("Cell {index} has state {value}, expected 0 or 1")]
    InvalidCell { index: usize, value: Cell },
    #[error("Seed cell {index} is outside a row of width {width}")]
    InvalidSeedIndex { index: usize, width: usize },
    #[error("Noise density must be between 0 and 1, got {0}")]
    InvalidDensity(f64),
}

/// Errors loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}
