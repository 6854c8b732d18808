//! Plain text rendering for terminals.

use std::io::{self, Write};

use super::{X_LABEL, Y_LABEL, title};
use crate::compute::Grid;

/// Characters and decorations used for text output.
#[derive(Debug, Clone)]
pub struct TextStyle {
    pub live: char,
    pub dead: char,
    /// Print title, axis labels, iteration numbers and the index ruler.
    pub labels: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            live: '#',
            dead: '.',
            labels: true,
        }
    }
}

/// Render a grid to a string.
pub fn render_text(grid: &Grid, style: &TextStyle) -> String {
    let mut out = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_text(&mut out, grid, style);
    String::from_utf8_lossy(&out).into_owned()
}

/// Write a grid as text.
pub fn write_text<W: Write>(w: &mut W, grid: &Grid, style: &TextStyle) -> io::Result<()> {
    let gutter = if style.labels {
        grid.iterations().saturating_sub(1).to_string().len().max(Y_LABEL.len())
    } else {
        0
    };

    if style.labels {
        writeln!(w, "{} ({})", title(grid), grid.boundary)?;
        writeln!(w, "{}", Y_LABEL)?;
    }

    let mut line = String::with_capacity(grid.width + gutter + 1);
    for (iteration, row) in grid.rows.iter().enumerate() {
        line.clear();
        if style.labels {
            line.push_str(&format!("{:>gutter$} ", iteration));
        }
        line.extend(row.iter().map(|&c| if c != 0 { style.live } else { style.dead }));
        writeln!(w, "{}", line.trim_end())?;
    }

    if style.labels {
        let ruler: String = (0..grid.width)
            .map(|i| char::from_digit((i % 10) as u32, 10).unwrap_or('?'))
            .collect();
        writeln!(w, "{:gutter$} {}", "", ruler)?;
        let center = grid.width.saturating_sub(X_LABEL.len()) / 2;
        writeln!(w, "{:gutter$} {:center$}{}", "", "", X_LABEL)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::{Evolver, RuleTable};
    use crate::schema::Boundary;

    fn rule_90() -> Grid {
        Evolver::new(RuleTable::new(90), Boundary::Strict)
            .evolve(&[0, 0, 0, 1, 0, 0, 0], 4)
            .unwrap()
    }

    #[test]
    fn test_plain() {
        let style = TextStyle {
            labels: false,
            ..Default::default()
        };
        assert_eq!(
            render_text(&rule_90(), &style),
            "...#...\n..#.#..\n.#...#.\n#.#.#.#\n"
        );
    }

    #[test]
    fn test_labels() {
        let text = render_text(&rule_90(), &TextStyle::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "1D Cellular Automata - Rule 90 (strict)");
        assert_eq!(lines[1], "Iteration");
        assert_eq!(lines[2], "        0 ...#...");
        assert_eq!(lines[5], "        3 #.#.#.#");
        assert_eq!(lines[6], "          0123456");
        assert_eq!(lines[7].trim(), "Index");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_custom_chars() {
        let style = TextStyle {
            live: '█',
            dead: ' ',
            labels: false,
        };
        let text = render_text(&rule_90(), &style);
        assert_eq!(text.lines().next(), Some("   █"));
    }
}
