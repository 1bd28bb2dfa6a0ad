//! Terminal output for character grids.
//!
//! Grids know nothing about terminals. This module turns a grid's cells into
//! crossterm commands: a full repaint with [`render_grid`], or a repaint of
//! only what changed since the previous frame with [`DiffRenderer`].
//!
//! Runs of cells sharing a colour are printed with one colour change, and
//! alpha is ignored.

mod diff;

pub use diff::DiffRenderer;

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, SetForegroundColor};

use crate::grid::{Cell, CharGrid};
use crate::types::Colour;

/// Terminal colour for a packed colour.
#[inline]
pub fn terminal_colour(colour: Colour) -> Color {
    Color::Rgb {
        r: colour.red(),
        g: colour.green(),
        b: colour.blue(),
    }
}

/// Cells of the grid's window, row major. Clipped cells read as empty.
pub fn snapshot(grid: &CharGrid) -> Vec<Cell> {
    let (height, width) = (grid.height(), grid.width());
    let mut cells = Vec::with_capacity((height.max(0) * width.max(0)) as usize);
    for row in 0..height {
        for column in 0..width {
            cells.push(grid.cell(row, column).unwrap_or_default());
        }
    }
    cells
}

/// Repaint the whole grid with its top-left corner at the terminal origin.
///
/// Commands are queued; the caller flushes.
pub fn render_grid<W: Write>(out: &mut W, grid: &CharGrid) -> io::Result<()> {
    let width = grid.width().max(0) as usize;
    let cells = snapshot(grid);
    let mut colour = None;

    for (row, line) in cells.chunks(width.max(1)).enumerate() {
        queue!(out, MoveTo(0, row as u16))?;
        let mut run = String::new();
        for cell in line {
            if colour != Some(cell.colour) {
                if !run.is_empty() {
                    queue!(out, Print(std::mem::take(&mut run)))?;
                }
                queue!(out, SetForegroundColor(terminal_colour(cell.colour)))?;
                colour = Some(cell.colour);
            }
            run.push(cell.glyph.unwrap_or(' '));
        }
        if !run.is_empty() {
            queue!(out, Print(run))?;
        }
    }
    Ok(())
}
