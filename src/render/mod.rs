//! Rendering of evolved grids.
//!
//! Generation 0 is drawn at the top, cell index increases to the right.
//!
//! # Formats
//!
//! - Text: one line per generation, for terminals.
//! - PBM: binary Netpbm bitmap (`P4`), one black square per live cell.
//!
//! ```text
//! P4
//! # 1D Cellular Automata - Rule 90
//! <width px> <height px>
//! <rows, 1 bit per pixel, MSB first, each row padded to a whole byte>
//! ```
//!
//! JSON output is the serialized [`Grid`](crate::compute::Grid) itself.

mod pbm;
mod text;

pub use pbm::{PBM_MAGIC, PbmHeader, PbmOptions, encode_pbm, save_pbm, write_pbm};
pub use text::{TextStyle, render_text, write_text};

use crate::compute::Grid;

/// Human-readable title for a grid.
pub fn title(grid: &Grid) -> String {
    format!("1D Cellular Automata - Rule {}", grid.rule)
}

/// Horizontal axis label.
pub const X_LABEL: &str = "Index";

/// Vertical axis label.
pub const Y_LABEL: &str = "Iteration";
