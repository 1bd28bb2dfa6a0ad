//! Differential renderer.
//!
//! Keeps the previous frame and repaints only cells that changed. The first
//! frame, and any frame after the grid changes size, is painted in full.
//! Output is wrapped in a synchronized update so the terminal shows whole
//! frames.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Print, SetForegroundColor};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};

use super::{snapshot, terminal_colour};
use crate::grid::{Cell, CharGrid};
use crate::types::{Colour, Coordinate};

/// Frame-to-frame renderer for one grid.
#[derive(Debug, Default)]
pub struct DiffRenderer {
    previous: Option<(i32, Vec<Cell>)>,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the next frame to be painted in full.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Paint what changed and flush. Returns true if anything was written.
    pub fn render<W: Write>(&mut self, out: &mut W, grid: &CharGrid) -> io::Result<bool> {
        let width = grid.width();
        let cells = snapshot(grid);
        let previous = match &self.previous {
            Some((w, prev)) if *w == width && prev.len() == cells.len() => Some(prev.as_slice()),
            _ => None,
        };

        queue!(out, BeginSynchronizedUpdate)?;

        let mut changed = false;
        let mut cursor: Option<Coordinate> = None;
        let mut colour: Option<Colour> = None;
        for (i, cell) in cells.iter().enumerate() {
            if previous.is_some_and(|prev| prev[i] == *cell) {
                continue;
            }
            changed = true;

            let at = Coordinate::new(i as i32 / width.max(1), i as i32 % width.max(1));
            if cursor != Some(at) {
                queue!(out, MoveTo(at.column as u16, at.row as u16))?;
            }
            if colour != Some(cell.colour) {
                queue!(out, SetForegroundColor(terminal_colour(cell.colour)))?;
                colour = Some(cell.colour);
            }
            queue!(out, Print(cell.glyph.unwrap_or(' ')))?;
            cursor = Some(at.offset(0, 1));
        }

        queue!(out, EndSynchronizedUpdate)?;
        out.flush()?;

        self.previous = Some((width, cells));
        Ok(changed)
    }
}
