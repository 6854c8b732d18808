//! Rule tables for elementary cellular automata.
//!
//! An elementary rule is an 8-bit Wolfram number. Bit `i` of the number
//! (counting from the least-significant bit) is the next state of a cell
//! whose neighborhood `(left, center, right)` encodes to `i`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Cell;
use crate::schema::ConfigError;

/// Number of distinct 3-cell neighborhoods.
pub const NEIGHBORHOODS: usize = 8;

#[inline]
fn encode(left: Cell, center: Cell, right: Cell) -> usize {
    (((left & 1) as usize) << 2) | (((center & 1) as usize) << 1) | (right & 1) as usize
}

/// A 3-cell window `(left, center, right)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Neighborhood {
    pub left: Cell,
    pub center: Cell,
    pub right: Cell,
}

impl Neighborhood {
    #[inline]
    pub fn new(left: Cell, center: Cell, right: Cell) -> Self {
        Self {
            left,
            center,
            right,
        }
    }

    /// Encode as `left*4 + center*2 + right`. Only the low bit of each cell is used.
    #[inline]
    pub fn index(self) -> usize {
        encode(self.left, self.center, self.right)
    }

    /// Decode from a 3-bit index. Only the low three bits are used.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self {
            left: ((index >> 2) & 1) as Cell,
            center: ((index >> 1) & 1) as Cell,
            right: (index & 1) as Cell,
        }
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.left, self.center, self.right)
    }
}

/// Complete neighborhood -> next-state lookup table for one rule.
///
/// Built once from the rule number and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct RuleTable {
    rule: u8,
    outputs: [Cell; NEIGHBORHOODS],
}

impl RuleTable {
    /// Expand a rule number into its lookup table.
    pub fn new(rule: u8) -> Self {
        let mut outputs = [0; NEIGHBORHOODS];
        for (i, out) in outputs.iter_mut().enumerate() {
            *out = (rule >> i) & 1;
        }
        log::debug!("rule {} expanded to table {:?}", rule, outputs);
        Self { rule, outputs }
    }

    /// Build a table from an arbitrary integer, rejecting anything outside 0..=255.
    pub fn from_number(rule: i64) -> Result<Self, ConfigError> {
        u8::try_from(rule)
            .map(Self::new)
            .map_err(|_| ConfigError::InvalidRule(rule.to_string()))
    }

    /// The Wolfram rule number.
    #[inline]
    pub fn rule(&self) -> u8 {
        self.rule
    }

    /// Next state for a neighborhood.
    #[inline]
    pub fn get(&self, neighborhood: Neighborhood) -> Cell {
        self.outputs[neighborhood.index()]
    }

    /// Next state for an explicit `(left, center, right)` triple.
    #[inline]
    pub fn lookup(&self, left: Cell, center: Cell, right: Cell) -> Cell {
        self.outputs[encode(left, center, right)]
    }

    /// Outputs in neighborhood order `000, 001, ..., 111`.
    pub fn outputs(&self) -> &[Cell; NEIGHBORHOODS] {
        &self.outputs
    }

    /// All `(neighborhood, next state)` pairs in neighborhood order.
    pub fn iter(&self) -> impl Iterator<Item = (Neighborhood, Cell)> + '_ {
        self.outputs
            .iter()
            .enumerate()
            .map(|(i, &out)| (Neighborhood::from_index(i), out))
    }

    /// Rule as an 8-character binary string, most-significant bit first.
    ///
    /// The first character is the output for `111`, the last for `000`.
    pub fn binary_string(&self) -> String {
        format!("{:08b}", self.rule)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new(90)
    }
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule {}", self.rule)
    }
}

impl FromStr for RuleTable {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidRule(s.to_string()))?;
        Self::from_number(value)
    }
}

impl TryFrom<i64> for RuleTable {
    type Error = ConfigError;

    fn try_from(rule: i64) -> Result<Self, Self::Error> {
        Self::from_number(rule)
    }
}

impl From<RuleTable> for i64 {
    fn from(table: RuleTable) -> Self {
        table.rule as i64
    }
}

impl From<u8> for RuleTable {
    fn from(rule: u8) -> Self {
        Self::new(rule)
    }
}
