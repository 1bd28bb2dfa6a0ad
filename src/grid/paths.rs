//! Incremental path drawing.
//!
//! A pen walks the grid one cell at a time. Leaving a cell adds an arm in the
//! direction of travel, entering one adds the opposite arm. The join grid is
//! seeded from glyphs already on the canvas, so new paths merge into existing
//! boxes and lines.

use std::fmt;

use super::box_drawing::{Join, Weight};
use super::char_grid::CharGrid;

/// Join grid plus pen. Built by [`CharGrid::paths`].
pub struct Paths {
    rows: usize,
    columns: usize,
    cells: Vec<Option<Join>>,
    row: i32,
    column: i32,
    weight: Weight,
}

impl Paths {
    pub(crate) fn new(grid: &CharGrid, weight: Weight) -> Self {
        let rows = usize::try_from(grid.height()).unwrap_or(0);
        let columns = usize::try_from(grid.width()).unwrap_or(0);
        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows as i32 {
            for column in 0..columns as i32 {
                cells.push(grid.get(row, column).and_then(Join::of));
            }
        }
        Self {
            rows,
            columns,
            cells,
            row: 0,
            column: 0,
            weight,
        }
    }

    fn index(&self, row: i32, column: i32) -> Option<usize> {
        let (r, c) = (usize::try_from(row).ok()?, usize::try_from(column).ok()?);
        (r < self.rows && c < self.columns).then(|| r * self.columns + c)
    }

    fn join_at(&self, row: i32, column: i32) -> Option<Join> {
        self.index(row, column).and_then(|i| self.cells[i])
    }

    /// Move the pen without drawing.
    pub fn move_to(&mut self, row: i32, column: i32) -> &mut Self {
        self.row = row;
        self.column = column;
        self
    }

    /// Weight for subsequent segments.
    pub fn weight(&mut self, weight: Weight) -> &mut Self {
        self.weight = weight;
        self
    }

    /// Draw along the current row to `target`.
    pub fn horizontal_to(&mut self, target: i32) -> &mut Self {
        while self.column < target {
            self.step(0, 1);
        }
        while self.column > target {
            self.step(0, -1);
        }
        self
    }

    /// Draw along the current column to `target`.
    pub fn vertical_to(&mut self, target: i32) -> &mut Self {
        while self.row < target {
            self.step(1, 0);
        }
        while self.row > target {
            self.step(-1, 0);
        }
        self
    }

    fn step(&mut self, rows: i32, columns: i32) {
        self.link(rows, columns);
        self.row += rows;
        self.column += columns;
        self.link(-rows, -columns);
    }

    /// Add an arm to the pen's cell in the given direction.
    fn link(&mut self, rows: i32, columns: i32) {
        let current = self.join_at(self.row, self.column);
        let arm = |r: i32, c: i32| {
            if (r, c) == (rows, columns) {
                self.weight
            } else {
                current.map_or(Weight::None, |j| j.arm(r, c))
            }
        };
        let join = Join::find(arm(-1, 0), arm(1, 0), arm(0, -1), arm(0, 1));
        if let Some(i) = self.index(self.row, self.column) {
            self.cells[i] = join;
        }
    }

    pub(crate) fn render(&self, grid: &mut CharGrid) {
        for row in 0..self.rows as i32 {
            for column in 0..self.columns as i32 {
                if let Some(join) = self.join_at(row, column) {
                    grid.set(row, column, Some(join.glyph));
                }
            }
        }
    }
}

impl fmt::Display for Paths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows as i32 {
            for column in 0..self.columns as i32 {
                let glyph = self.join_at(row, column).map_or(' ', |j| j.glyph);
                write!(f, "{glyph}")?;
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

    fn menu_rows() -> String {
        text(&[
            "          ",
            " ╶───┐    ",
            "     │    ",
            "     │    ",
            "     ├──╴ ",
            "     │    ",
            "     ├──╴ ",
            "     ├──╴ ",
            "     └──╴ ",
            "          ",
        ])
    }

    #[test]
    fn test_horizontal() {
        let mut grid = CharGrid::new(10, 3);
        grid.paths(Weight::Light, |p| {
            p.move_to(1, 1).horizontal_to(8);
        });
        assert_eq!(grid.to_string(), text(&["          ", " ╶──────╴ ", "          "]));
    }

    #[test]
    fn test_zig() {
        let mut grid = CharGrid::new(10, 10);
        grid.paths(Weight::Light, |p| {
            p.move_to(1, 1).horizontal_to(5).vertical_to(8).horizontal_to(8);
        });
        let rows = grid.rows();
        assert_eq!(rows[1], " ╶───┐    ");
        assert_eq!(rows[4], "     │    ");
        assert_eq!(rows[8], "     └──╴ ");
    }

    #[test]
    fn test_menu() {
        let mut grid = CharGrid::new(10, 10);
        grid.paths(Weight::Light, |p| {
            p.move_to(1, 1)
                .horizontal_to(5)
                .vertical_to(8)
                .horizontal_to(8)
                .move_to(4, 5)
                .horizontal_to(8)
                .move_to(6, 5)
                .horizontal_to(8)
                .move_to(7, 5)
                .horizontal_to(8);
        });
        assert_eq!(grid.to_string(), menu_rows());
    }

    #[test]
    fn test_later_paths_join_earlier_ones() {
        let mut grid = CharGrid::new(10, 10);
        for turn in [8, 7, 6, 4] {
            grid.paths(Weight::Light, |p| {
                p.move_to(1, 1).horizontal_to(5).vertical_to(turn).horizontal_to(8);
            });
        }
        assert_eq!(grid.to_string(), menu_rows());
    }

    #[test]
    fn test_weight_changes() {
        let mut grid = CharGrid::new(10, 10);
        grid.paths(Weight::Heavy, |p| {
            p.horizontal_to(9)
                .weight(Weight::Light)
                .vertical_to(9)
                .weight(Weight::Heavy)
                .horizontal_to(0)
                .weight(Weight::Light)
                .vertical_to(0);
        });

        let rows = grid.rows();
        assert_eq!(rows[0], "┍━━━━━━━━┑");
        assert!(rows[1..9].iter().all(|r| r == "│        │"));
        assert_eq!(rows[9], "┕━━━━━━━━┙");
    }
}
