//! Batch line drawing.
//!
//! Segments are collected into a grid of weights first. Rendering then picks
//! each marked cell's glyph from its four neighbours, so crossings and
//! corners join up regardless of the order segments were added in.

use std::fmt;

use super::box_drawing::{Join, Weight};
use super::char_grid::CharGrid;

/// Weight grid for one batch of lines. Built by [`CharGrid::lines`].
pub struct Lines {
    rows: usize,
    columns: usize,
    weight: Weight,
    cells: Vec<Weight>,
}

impl Lines {
    pub(crate) fn new(rows: i32, columns: i32, weight: Weight) -> Self {
        let rows = usize::try_from(rows).unwrap_or(0);
        let columns = usize::try_from(columns).unwrap_or(0);
        Self {
            rows,
            columns,
            weight,
            cells: vec![Weight::None; rows * columns],
        }
    }

    fn index(&self, row: i32, column: i32) -> Option<usize> {
        let (r, c) = (usize::try_from(row).ok()?, usize::try_from(column).ok()?);
        (r < self.rows && c < self.columns).then(|| r * self.columns + c)
    }

    fn mark(&mut self, row: i32, column: i32) {
        if let Some(i) = self.index(row, column) {
            self.cells[i] = self.weight;
        }
    }

    fn weight_at(&self, row: i32, column: i32) -> Weight {
        self.index(row, column).map_or(Weight::None, |i| self.cells[i])
    }

    /// Mark rows `[min(from, to), max(from, to))` of a column.
    pub fn vertical(&mut self, column: i32, from: i32, to: i32) -> &mut Self {
        for row in from.min(to)..from.max(to) {
            self.mark(row, column);
        }
        self
    }

    /// Mark columns `[min(from, to), max(from, to))` of a row.
    pub fn horizontal(&mut self, row: i32, from: i32, to: i32) -> &mut Self {
        for column in from.min(to)..from.max(to) {
            self.mark(row, column);
        }
        self
    }

    pub(crate) fn render(&self, grid: &mut CharGrid) {
        for row in 0..self.rows as i32 {
            for column in 0..self.columns as i32 {
                if self.weight_at(row, column).is_none() {
                    continue;
                }
                let join = Join::find(
                    self.weight_at(row - 1, column),
                    self.weight_at(row + 1, column),
                    self.weight_at(row, column - 1),
                    self.weight_at(row, column + 1),
                );
                if let Some(join) = join {
                    grid.set(row, column, Some(join.glyph));
                }
            }
        }
    }
}

/// Dumps the weight grid, one initial per marked cell.
impl fmt::Display for Lines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows as i32 {
            for column in 0..self.columns as i32 {
                write!(f, "{}", self.weight_at(row, column).initial())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(rows: &[&str]) -> String {
        rows.iter().map(|r| format!("{r}\n")).collect()
    }

    #[test]
    fn test_horizontal() {
        let mut grid = CharGrid::new(10, 3);
        grid.lines(Weight::Light, |l| {
            l.horizontal(1, 1, 9);
        });
        assert_eq!(grid.to_string(), text(&["          ", " ╶──────╴ ", "          "]));
    }

    #[test]
    fn test_vertical() {
        let mut grid = CharGrid::new(3, 10);
        grid.lines(Weight::Light, |l| {
            l.vertical(1, 9, 1);
        });
        let rows = grid.rows();
        assert_eq!(rows[0], "   ");
        assert_eq!(rows[1], " ╷ ");
        assert!(rows[2..8].iter().all(|r| r == " │ "));
        assert_eq!(rows[8], " ╵ ");
        assert_eq!(rows[9], "   ");
    }

    #[test]
    fn test_menu() {
        let mut grid = CharGrid::new(10, 10);
        grid.lines(Weight::Light, |l| {
            l.horizontal(1, 1, 5)
                .vertical(5, 1, 8)
                .horizontal(4, 5, 9)
                .horizontal(6, 5, 9)
                .horizontal(7, 5, 9)
                .horizontal(8, 5, 9);
        });

        assert_eq!(
            grid.to_string(),
            text(&[
                "          ",
                " ╶───┐    ",
                "     │    ",
                "     │    ",
                "     ├──╴ ",
                "     │    ",
                "     ├┬┬┐ ",
                "     ├┼┼┤ ",
                "     └┴┴┘ ",
                "          ",
            ])
        );
    }

    #[test]
    fn test_weight_dump() {
        let mut lines = Lines::new(2, 3, Weight::Heavy);
        lines.horizontal(0, 0, 2);
        lines.weight = Weight::Double;
        lines.vertical(2, 0, 2);
        assert_eq!(lines.to_string(), "HHD\n  D\n");
    }
}
