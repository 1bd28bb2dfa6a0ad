//! Character grid - box drawing, healing, lines, paths and tables.
//!
//! # API
//!
//! - [`CharGrid`] - Shared cell buffer with windowed, clipping handles
//! - [`Join`] / [`Weight`] / [`Line`] - Box-drawing topology and line styles
//! - [`Lines`] - Batch segments rendered with maximal joins
//! - [`Paths`] - Pen-relative paths that merge into existing glyphs
//! - [`TextCells`] - Aligned text tables with optional rules

mod box_drawing;
mod char_grid;
mod lines;
mod paths;
mod text_cells;

pub use box_drawing::{Join, Line, Weight};
pub use char_grid::{Cell, CharGrid};
pub use lines::Lines;
pub use paths::Paths;
pub use text_cells::{Border, TextCells};
