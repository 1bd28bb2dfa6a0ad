//! Shared character buffer with windowed drawing handles.
//!
//! A [`CharGrid`] is a handle onto cell storage shared with every sub-grid
//! cut from it. Each handle has its own window (an offset plus a clip
//! rectangle), pen, colour and line style. Writes outside the window are
//! dropped silently, reads outside it come back empty.
//!
//! # Example
//!
//! ```ignore
//! let mut grid = CharGrid::new(8, 4);
//! grid.draw_box_with(8, 4, |inner| {
//!     inner.write("hi");
//! });
//! assert_eq!(grid.rows()[1], "│hi    │");
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::box_drawing::{Join, Line, Weight};
use super::lines::Lines;
use super::paths::Paths;
use crate::types::{Colour, Coordinate};

// =============================================================================
// Cell & Buffer
// =============================================================================

/// One grid position. An empty cell has no glyph and renders as a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub glyph: Option<char>,
    pub colour: Colour,
}

#[derive(Debug, Default)]
struct Buffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Buffer {
    fn index(&self, row: i32, column: i32) -> Option<usize> {
        let (r, c) = (usize::try_from(row).ok()?, usize::try_from(column).ok()?);
        (r < self.height && c < self.width).then(|| r * self.width + c)
    }

    fn resize(&mut self, width: usize, height: usize) {
        let mut cells = vec![Cell::default(); width * height];
        for row in 0..height.min(self.height) {
            let keep = width.min(self.width);
            let from = row * self.width;
            cells[row * width..row * width + keep].copy_from_slice(&self.cells[from..from + keep]);
        }
        self.width = width;
        self.height = height;
        self.cells = cells;
    }
}

/// Half-open rectangle in buffer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Clip {
    min: Coordinate,
    max: Coordinate,
}

impl Clip {
    #[inline]
    fn contains(&self, row: i32, column: i32) -> bool {
        row >= self.min.row && row < self.max.row && column >= self.min.column && column < self.max.column
    }

    /// May come out empty, in which case nothing is contained.
    fn intersect(&self, other: &Clip) -> Clip {
        Clip {
            min: Coordinate::new(self.min.row.max(other.min.row), self.min.column.max(other.min.column)),
            max: Coordinate::new(self.max.row.min(other.max.row), self.max.column.min(other.max.column)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    clip: Clip,
    rows: i32,
    columns: i32,
}

// =============================================================================
// CharGrid
// =============================================================================

/// A drawing handle onto a shared character buffer.
#[derive(Debug, Clone)]
pub struct CharGrid {
    buffer: Rc<RefCell<Buffer>>,
    origin: Coordinate,
    /// `None` for the root handle, which always spans the whole buffer.
    window: Option<Window>,
    pen: Coordinate,
    colour: Colour,
    line: Line,
}

impl Default for CharGrid {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl CharGrid {
    /// An empty grid of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        let mut buffer = Buffer::default();
        buffer.resize(width, height);
        Self {
            buffer: Rc::new(RefCell::new(buffer)),
            origin: Coordinate::default(),
            window: None,
            pen: Coordinate::default(),
            colour: Colour::WHITE,
            line: Line::LightSolid,
        }
    }

    /// Resize the shared buffer, keeping whatever content still fits.
    pub fn size(&mut self, width: usize, height: usize) -> &mut Self {
        {
            let mut buffer = self.buffer.borrow_mut();
            if buffer.width != width || buffer.height != height {
                buffer.resize(width, height);
            }
        }
        self.pen = Coordinate::new(
            self.pen.row.clamp(0, self.height()),
            self.pen.column.clamp(0, self.width()),
        );
        self
    }

    /// Number of columns in this handle's window.
    pub fn width(&self) -> i32 {
        match &self.window {
            Some(w) => w.columns,
            None => self.buffer.borrow().width as i32,
        }
    }

    /// Number of rows in this handle's window.
    pub fn height(&self) -> i32 {
        match &self.window {
            Some(w) => w.rows,
            None => self.buffer.borrow().height as i32,
        }
    }

    /// Empty every cell in the window and reset the pen and line style.
    pub fn clear(&mut self) -> &mut Self {
        let (height, width) = (self.height(), self.width());
        self.fill(0, 0, height, width, None);
        self.pen = Coordinate::default();
        self.line = Line::LightSolid;
        self
    }

    /// Place the pen for subsequent writes and boxes.
    pub fn move_to(&mut self, row: i32, column: i32) -> &mut Self {
        self.pen = Coordinate::new(row, column);
        self
    }

    #[inline]
    pub fn pen(&self) -> Coordinate {
        self.pen
    }

    /// Colour for subsequent writes.
    pub fn colour(&mut self, colour: Colour) -> &mut Self {
        self.colour = colour;
        self
    }

    #[inline]
    pub fn current_colour(&self) -> Colour {
        self.colour
    }

    /// Line style for subsequent boxes.
    pub fn line(&mut self, line: Line) -> &mut Self {
        self.line = line;
        self
    }

    #[inline]
    pub fn current_line(&self) -> Line {
        self.line
    }

    /// Write text at the pen, advancing it. A newline moves to the next row
    /// at the column the write started from.
    pub fn write(&mut self, text: &str) -> &mut Self {
        let start = self.pen.column;
        for c in text.chars() {
            if c == '\n' {
                self.pen = Coordinate::new(self.pen.row + 1, start);
            } else {
                self.set(self.pen.row, self.pen.column, Some(c));
                self.pen.column += 1;
            }
        }
        self
    }

    /// Fill a half-open rectangle. `None` empties the cells.
    pub fn fill(
        &mut self,
        min_row: i32,
        min_column: i32,
        max_row: i32,
        max_column: i32,
        glyph: Option<char>,
    ) -> &mut Self {
        for row in min_row..max_row {
            for column in min_column..max_column {
                self.set(row, column, glyph);
            }
        }
        self
    }

    pub fn row_fill(&mut self, row: i32, min_column: i32, max_column: i32, glyph: Option<char>) -> &mut Self {
        self.fill(row, min_column, row + 1, max_column, glyph)
    }

    pub fn column_fill(&mut self, column: i32, min_row: i32, max_row: i32, glyph: Option<char>) -> &mut Self {
        self.fill(min_row, column, max_row, column + 1, glyph)
    }

    fn locate(&self, row: i32, column: i32) -> Option<usize> {
        let (r, c) = (row + self.origin.row, column + self.origin.column);
        if let Some(window) = &self.window {
            if !window.clip.contains(r, c) {
                return None;
            }
        }
        self.buffer.borrow().index(r, c)
    }

    /// Cell at a window position, `None` outside the window.
    pub fn cell(&self, row: i32, column: i32) -> Option<Cell> {
        let index = self.locate(row, column)?;
        self.buffer.borrow().cells.get(index).copied()
    }

    /// Glyph at a window position. Empty and clipped cells are both `None`.
    pub fn get(&self, row: i32, column: i32) -> Option<char> {
        self.cell(row, column).and_then(|c| c.glyph)
    }

    pub fn get_colour(&self, row: i32, column: i32) -> Option<Colour> {
        self.cell(row, column).map(|c| c.colour)
    }

    /// Set a glyph in the current colour.
    pub fn set(&mut self, row: i32, column: i32, glyph: Option<char>) -> &mut Self {
        if let Some(index) = self.locate(row, column) {
            self.buffer.borrow_mut().cells[index] = Cell {
                glyph,
                colour: self.colour,
            };
        }
        self
    }

    /// Recolour a cell without touching its glyph.
    pub fn set_colour(&mut self, row: i32, column: i32, colour: Colour) -> &mut Self {
        if let Some(index) = self.locate(row, column) {
            self.buffer.borrow_mut().cells[index].colour = colour;
        }
        self
    }

    /// A handle onto a rectangle of this one, clipped to this window.
    ///
    /// The new handle starts with its pen at the origin and inherits the
    /// colour and line style.
    pub fn sub_grid(&self, row: i32, column: i32, height: i32, width: i32) -> CharGrid {
        let origin = self.origin.offset(row, column);
        let own = Clip {
            min: origin,
            max: origin.offset(height.max(0), width.max(0)),
        };
        let clip = match &self.window {
            Some(parent) => own.intersect(&parent.clip),
            None => own,
        };
        CharGrid {
            buffer: self.buffer.clone(),
            origin,
            window: Some(Window {
                clip,
                rows: height.max(0),
                columns: width.max(0),
            }),
            pen: Coordinate::default(),
            colour: self.colour,
            line: self.line,
        }
    }

    /// Draw an empty box with its top-left corner at the pen.
    pub fn draw_box(&mut self, width: i32, height: i32) -> &mut Self {
        self.draw_box_with(width, height, |_| {})
    }

    /// Draw a box at the pen, then let `content` draw inside it.
    ///
    /// The area is cleared, the perimeter drawn in the current line style and
    /// healed against whatever already surrounds it. Content is drawn through
    /// a sub-grid clipped to the interior, and the perimeter is healed again
    /// so lines in the content join onto the border.
    pub fn draw_box_with(&mut self, width: i32, height: i32, content: impl FnOnce(&mut CharGrid)) -> &mut Self {
        let Coordinate { row, column } = self.pen;
        let (max_row, max_column) = (row + height, column + width);

        self.fill(row, column, max_row, max_column, None);
        self.perimeter(row, column, max_row, max_column);

        let mut inner = self.sub_grid(row + 1, column + 1, height - 2, width - 2);
        content(&mut inner);

        self.heal(row, column, max_row, max_column);
        self
    }

    fn perimeter(&mut self, min_row: i32, min_column: i32, max_row: i32, max_column: i32) {
        let (horizontal, vertical) = self.line.glyphs();
        let w = self.line.weight();
        let n = Weight::None;

        self.column_fill(min_column, min_row + 1, max_row - 1, Some(vertical));
        self.column_fill(max_column - 1, min_row + 1, max_row - 1, Some(vertical));
        self.row_fill(min_row, min_column + 1, max_column - 1, Some(horizontal));
        self.row_fill(max_row - 1, min_column + 1, max_column - 1, Some(horizontal));

        let corner = |u, d, l, r| Join::find(u, d, l, r).map(|j| j.glyph);
        self.set(min_row, min_column, corner(n, w, n, w));
        self.set(min_row, max_column - 1, corner(n, w, w, n));
        self.set(max_row - 1, min_column, corner(w, n, n, w));
        self.set(max_row - 1, max_column - 1, corner(w, n, w, n));

        self.heal(min_row, min_column, max_row, max_column);
    }

    /// Re-join the perimeter of a rectangle with its neighbours.
    ///
    /// Top and bottom rows are healed first, then the two sides.
    pub fn heal(&mut self, min_row: i32, min_column: i32, max_row: i32, max_column: i32) -> &mut Self {
        for column in min_column..max_column {
            self.heal_cell(min_row, column);
            self.heal_cell(max_row - 1, column);
        }
        for row in min_row + 1..max_row - 1 {
            self.heal_cell(row, min_column);
            self.heal_cell(row, max_column - 1);
        }
        self
    }

    fn heal_cell(&mut self, row: i32, column: i32) {
        let join = |r, c| self.get(r, c).and_then(Join::of);
        let healed = Join::heal(
            join(row - 1, column),
            join(row + 1, column),
            join(row, column - 1),
            join(row, column + 1),
        );
        if let Some(healed) = healed {
            if self.get(row, column) != Some(healed.glyph) {
                self.set(row, column, Some(healed.glyph));
            }
        }
    }

    /// Draw maximally joined-up lines of one weight.
    pub fn lines(&mut self, weight: Weight, draw: impl FnOnce(&mut Lines)) -> &mut Self {
        let mut lines = Lines::new(self.height(), self.width(), weight);
        draw(&mut lines);
        lines.render(self);
        self
    }

    /// Draw pen-relative paths that join onto existing box glyphs.
    pub fn paths(&mut self, weight: Weight, draw: impl FnOnce(&mut Paths)) -> &mut Self {
        let mut paths = Paths::new(self, weight);
        draw(&mut paths);
        paths.render(self);
        self
    }

    /// The window's rows as text, empty cells as spaces.
    pub fn rows(&self) -> Vec<String> {
        (0..self.height())
            .map(|row| {
                (0..self.width())
                    .map(|column| self.get(row, column).unwrap_or(' '))
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for CharGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn text(rows: &[&str]) -> String {
        rows.iter().map(|r| format!("{r}\n")).collect()
    }

    #[test]
    fn test_pen_position() {
        let mut grid = CharGrid::new(10, 4);
        grid.write("foo").write("bar").write("\nbaz");
        grid.move_to(3, 2).write("abcdefghijk");

        assert_eq!(
            grid.to_string(),
            text(&["foobar    ", "      baz ", "          ", "  abcdefgh"])
        );
    }

    #[test]
    fn test_fill() {
        let mut grid = CharGrid::new(10, 10);
        grid.row_fill(0, 1, 9, Some('t'))
            .row_fill(9, 1, 9, Some('b'))
            .column_fill(0, 1, 9, Some('l'))
            .column_fill(9, 1, 9, Some('r'))
            .fill(3, 3, 7, 7, Some('m'));

        assert_eq!(
            grid.to_string(),
            text(&[
                " tttttttt ",
                "l        r",
                "l        r",
                "l  mmmm  r",
                "l  mmmm  r",
                "l  mmmm  r",
                "l  mmmm  r",
                "l        r",
                "l        r",
                " bbbbbbbb ",
            ])
        );
    }

    #[test]
    fn test_box() {
        let mut grid = CharGrid::new(4, 4);
        grid.draw_box(4, 4);
        assert_eq!(grid.to_string(), text(&["┌──┐", "│  │", "│  │", "└──┘"]));

        let mut grid = CharGrid::new(4, 4);
        grid.line(Line::Double).draw_box(4, 4);
        assert_eq!(grid.to_string(), text(&["╔══╗", "║  ║", "║  ║", "╚══╝"]));
    }

    #[test]
    fn test_overlapping_boxes_heal() {
        let mut grid = CharGrid::new(8, 8);
        grid.draw_box_with(6, 6, |b| {
            b.move_to(3, 0).write("text");
        })
        .move_to(2, 2)
        .line(Line::Double)
        .draw_box_with(6, 6, |b| {
            b.write("foobar");
        });

        assert_eq!(
            grid.to_string(),
            text(&[
                "┌────┐  ",
                "│    │  ",
                "│ ╔══╧═╗",
                "│ ║foob║",
                "│t║    ║",
                "└─╢    ║",
                "  ║    ║",
                "  ╚════╝",
            ])
        );
    }

    #[test]
    fn test_ascii_boxes() {
        let mut grid = CharGrid::new(8, 8);
        grid.line(Line::Ascii)
            .draw_box_with(6, 6, |b| {
                b.move_to(3, 0).write("text");
            })
            .move_to(2, 2)
            .draw_box_with(6, 6, |b| {
                b.write("foobar");
            });

        assert_eq!(
            grid.to_string(),
            text(&[
                "+----+  ",
                "|    |  ",
                "| +--+-+",
                "| |foob|",
                "|t|    |",
                "+-+    |",
                "  |    |",
                "  +----+",
            ])
        );
    }

    #[test]
    fn test_content_heals_onto_perimeter() {
        let mut grid = CharGrid::new(3, 3);
        grid.draw_box_with(3, 3, |b| {
            b.write("══");
        });
        assert_eq!(grid.to_string(), text(&["┌─┐", "╞═╡", "└─┘"]));

        let mut grid = CharGrid::new(3, 3);
        grid.draw_box_with(3, 3, |b| {
            b.write("║");
        });
        assert_eq!(grid.to_string(), text(&["┌╥┐", "│║│", "└╨┘"]));
    }

    #[test]
    fn test_sub_grid_clips_to_parent() {
        let grid = CharGrid::new(6, 3);
        let mut outer = grid.sub_grid(1, 1, 1, 3);
        let mut inner = outer.sub_grid(0, 1, 1, 10);
        inner.write("abcdef");
        outer.set(0, -1, Some('x'));

        assert_eq!(grid.rows(), ["      ", "  ab  ", "      "]);
        assert_eq!(inner.get(0, 0), Some('a'));
        assert_eq!(inner.get(0, 2), None);
        assert_eq!(inner.width(), 10);
    }

    #[test]
    fn test_resize_keeps_content() {
        let mut grid = CharGrid::new(3, 2);
        grid.write("abc\ndef");
        grid.size(2, 3);
        assert_eq!(grid.to_string(), text(&["ab", "de", "  "]));
        assert_eq!(grid.pen(), Coordinate::new(1, 2));
    }

    #[test]
    fn test_colours() {
        let mut grid = CharGrid::new(3, 1);
        grid.colour(Colour::RED).write("a");
        grid.colour(Colour::GREEN).write("b");
        grid.set_colour(0, 2, Colour::BLUE);

        assert_eq!(grid.get_colour(0, 0), Some(Colour::RED));
        assert_eq!(grid.get_colour(0, 1), Some(Colour::GREEN));
        assert_eq!(grid.get_colour(0, 2), Some(Colour::BLUE));
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.get_colour(0, 3), None);
    }

    #[test]
    fn test_clear() {
        let mut grid = CharGrid::new(2, 2);
        grid.line(Line::Double).draw_box(2, 2).move_to(1, 1);
        grid.clear();
        assert_eq!(grid.to_string(), text(&["  ", "  "]));
        assert_eq!(grid.pen(), Coordinate::default());
        assert_eq!(grid.current_line(), Line::LightSolid);
    }
}
