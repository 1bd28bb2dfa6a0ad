//! Aligned text tables.
//!
//! Cells are addressed by column and row and may hold multi-line text. Each
//! column is as wide as its widest line, measured in terminal columns.

use std::fmt;

use unicode_width::UnicodeWidthStr;

use super::box_drawing::{Join, Line, Weight};

/// How cells are separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Border {
    /// Single spaces between columns, no rules.
    #[default]
    Space,
    /// Light box-drawing rules.
    Single,
    /// Double box-drawing rules.
    Double,
}

impl Border {
    fn line(&self) -> Option<Line> {
        match self {
            Self::Space => None,
            Self::Single => Some(Line::LightSolid),
            Self::Double => Some(Line::Double),
        }
    }

    /// A horizontal rule whose joins point `up` and `down` as given.
    fn rule(&self, widths: &[usize], up: bool, down: bool) -> Option<String> {
        let line = self.line()?;
        let w = line.weight();
        let arm = |on: bool| if on { w } else { Weight::None };
        let glyph = |left: Weight, right: Weight| {
            Join::find(arm(up), arm(down), left, right).map_or(' ', |j| j.glyph)
        };

        let mut out = String::new();
        out.push(glyph(Weight::None, w));
        let fills: Vec<String> = widths
            .iter()
            .map(|width| line.horizontal().to_string().repeat(*width))
            .collect();
        out.push_str(&fills.join(&glyph(w, w).to_string()));
        out.push(glyph(w, Weight::None));
        Some(out)
    }

    fn separator(&self) -> String {
        self.line().map_or(" ".to_string(), |l| l.vertical().to_string())
    }

    fn edge(&self) -> String {
        self.line().map_or(String::new(), |l| l.vertical().to_string())
    }
}

/// A sparse table of text values.
#[derive(Debug, Clone, Default)]
pub struct TextCells {
    cells: Vec<Vec<Option<String>>>,
    column: usize,
    row: usize,
    border: Border,
}

/// Lines of a cell. Trailing empty lines are dropped but one line always remains.
fn split_lines(value: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = value.split('\n').collect();
    while lines.len() > 1 && lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

impl TextCells {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cell at the cursor and move one column right.
    pub fn cell(&mut self, value: impl fmt::Display) -> &mut Self {
        let (column, row) = (self.column, self.row);
        self.column += 1;
        self.cell_at(column, row, value)
    }

    /// Move the cursor to the start of the next row.
    pub fn next_row(&mut self) -> &mut Self {
        self.column = 0;
        self.row += 1;
        self
    }

    /// Set a cell without moving the cursor.
    pub fn cell_at(&mut self, column: usize, row: usize, value: impl fmt::Display) -> &mut Self {
        if self.cells.len() <= row {
            self.cells.resize(row + 1, Vec::new());
        }
        let cells = &mut self.cells[row];
        if cells.len() <= column {
            cells.resize(column + 1, None);
        }
        cells[column] = Some(value.to_string());
        self
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&str> {
        self.cells.get(row)?.get(column)?.as_deref()
    }

    pub fn border(&mut self, border: Border) -> &mut Self {
        self.border = border;
        self
    }

    fn widths(&self) -> Vec<usize> {
        let columns = self.cells.iter().map(Vec::len).max().unwrap_or(0);
        (0..columns)
            .map(|column| {
                self.cells
                    .iter()
                    .filter_map(|row| row.get(column)?.as_deref())
                    .flat_map(split_lines)
                    .map(UnicodeWidthStr::width)
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

impl fmt::Display for TextCells {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cells.is_empty() {
            return Ok(());
        }

        let border = self.border;
        let widths = self.widths();
        let (edge, separator) = (border.edge(), border.separator());

        if let Some(head) = border.rule(&widths, false, true) {
            writeln!(f, "{head}")?;
        }
        for y in 0..self.cells.len() {
            let lines: Vec<Vec<&str>> = (0..widths.len())
                .map(|x| split_lines(self.get(x, y).unwrap_or("")))
                .collect();
            let height = lines.iter().map(Vec::len).max().unwrap_or(1);

            for h in 0..height {
                f.write_str(&edge)?;
                for (x, width) in widths.iter().enumerate() {
                    let value = lines[x].get(h).copied().unwrap_or("");
                    let pad = width.saturating_sub(value.width());
                    write!(f, "{value}{}", " ".repeat(pad))?;
                    if x + 1 < widths.len() {
                        f.write_str(&separator)?;
                    }
                }
                f.write_str(&edge)?;
                if h + 1 < height {
                    writeln!(f)?;
                }
            }

            if y + 1 < self.cells.len() {
                if let Some(rule) = border.rule(&widths, true, true) {
                    write!(f, "\n{rule}")?;
                }
                writeln!(f)?;
            }
        }
        if let Some(tail) = border.rule(&widths, true, false) {
            write!(f, "\n{tail}")?;
        }
        Ok(())
    }
}
