//! Box-drawing topology.
//!
//! Every glyph in the box-drawing block (U+2500..U+257F) is described by the
//! weight of the line leaving it in each of the four directions. Healing a
//! cell means reading the facing weights of its neighbours and looking up the
//! glyph that joins them.

use std::fmt;

// =============================================================================
// Weight
// =============================================================================

/// Line weight in one direction out of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Weight {
    /// No line.
    #[default]
    None,
    Light,
    Heavy,
    Double,
    Ascii,
}

impl Weight {
    #[inline]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// First letter of the variant, blank for none. Used to dump weight grids.
    pub const fn initial(&self) -> char {
        match self {
            Self::None => ' ',
            Self::Light => 'L',
            Self::Heavy => 'H',
            Self::Double => 'D',
            Self::Ascii => 'A',
        }
    }
}

// =============================================================================
// Line
// =============================================================================

/// Line style used for box perimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Line {
    /// ─ │
    #[default]
    LightSolid,
    /// ╌ ╎
    LightDoubleDash,
    /// ┄ ┆
    LightTripleDash,
    /// ┈ ┊
    LightQuadDash,
    /// ━ ┃
    HeavySolid,
    /// ╍ ╏
    HeavyDoubleDash,
    /// ┅ ┇
    HeavyTripleDash,
    /// ┉ ┋
    HeavyQuadDash,
    /// ═ ║
    Double,
    /// - |
    Ascii,
}

impl Line {
    pub const ALL: [Line; 10] = [
        Self::LightSolid,
        Self::LightDoubleDash,
        Self::LightTripleDash,
        Self::LightQuadDash,
        Self::HeavySolid,
        Self::HeavyDoubleDash,
        Self::HeavyTripleDash,
        Self::HeavyQuadDash,
        Self::Double,
        Self::Ascii,
    ];

    pub const fn weight(&self) -> Weight {
        match self {
            Self::LightSolid | Self::LightDoubleDash | Self::LightTripleDash | Self::LightQuadDash => {
                Weight::Light
            }
            Self::HeavySolid | Self::HeavyDoubleDash | Self::HeavyTripleDash | Self::HeavyQuadDash => {
                Weight::Heavy
            }
            Self::Double => Weight::Double,
            Self::Ascii => Weight::Ascii,
        }
    }

    /// Get the (horizontal, vertical) glyphs for this style.
    pub const fn glyphs(&self) -> (char, char) {
        match self {
            Self::LightSolid => ('─', '│'),
            Self::LightDoubleDash => ('╌', '╎'),
            Self::LightTripleDash => ('┄', '┆'),
            Self::LightQuadDash => ('┈', '┊'),
            Self::HeavySolid => ('━', '┃'),
            Self::HeavyDoubleDash => ('╍', '╏'),
            Self::HeavyTripleDash => ('┅', '┇'),
            Self::HeavyQuadDash => ('┉', '┋'),
            Self::Double => ('═', '║'),
            Self::Ascii => ('-', '|'),
        }
    }

    #[inline]
    pub const fn horizontal(&self) -> char {
        self.glyphs().0
    }

    #[inline]
    pub const fn vertical(&self) -> char {
        self.glyphs().1
    }
}

// =============================================================================
// Join
// =============================================================================

/// A glyph and the weights of its four arms.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Join {
    pub up: Weight,
    pub down: Weight,
    pub left: Weight,
    pub right: Weight,
    pub glyph: char,
}

const fn j(up: Weight, down: Weight, left: Weight, right: Weight, glyph: char) -> Join {
    Join {
        up,
        down,
        left,
        right,
        glyph,
    }
}

use Weight::{Ascii as A, Double as D, Heavy as H, Light as L, None as N};

/// Lookup order matters: the first entry matching a set of weights wins, so
/// solid straights shadow the dashed ones and square corners shadow rounded.
const JOINS: &[Join] = &[
    // stubs
    j(N, N, L, N, '╴'),
    j(L, N, N, N, '╵'),
    j(N, N, N, L, '╶'),
    j(N, L, N, N, '╷'),
    j(N, N, H, N, '╸'),
    j(H, N, N, N, '╹'),
    j(N, N, N, H, '╺'),
    j(N, H, N, N, '╻'),
    // mixed straights
    j(N, N, L, H, '╼'),
    j(L, H, N, N, '╽'),
    j(N, N, H, L, '╾'),
    j(H, L, N, N, '╿'),
    // straights
    j(N, N, L, L, '─'),
    j(L, L, N, N, '│'),
    j(N, N, L, L, '╌'),
    j(L, L, N, N, '╎'),
    j(N, N, L, L, '┄'),
    j(L, L, N, N, '┆'),
    j(N, N, L, L, '┈'),
    j(L, L, N, N, '┊'),
    j(N, N, H, H, '━'),
    j(H, H, N, N, '┃'),
    j(N, N, H, H, '╍'),
    j(H, H, N, N, '╏'),
    j(N, N, H, H, '┅'),
    j(H, H, N, N, '┇'),
    j(N, N, H, H, '┉'),
    j(H, H, N, N, '┋'),
    j(N, N, D, D, '═'),
    j(D, D, N, N, '║'),
    // corners
    j(N, L, N, L, '┌'),
    j(N, L, N, H, '┍'),
    j(N, H, N, L, '┎'),
    j(N, H, N, H, '┏'),
    j(N, L, L, N, '┐'),
    j(N, L, H, N, '┑'),
    j(N, H, L, N, '┒'),
    j(N, H, H, N, '┓'),
    j(L, N, N, L, '└'),
    j(L, N, N, H, '┕'),
    j(H, N, N, L, '┖'),
    j(H, N, N, H, '┗'),
    j(L, N, L, N, '┘'),
    j(L, N, H, N, '┙'),
    j(H, N, L, N, '┚'),
    j(H, N, H, N, '┛'),
    j(N, L, N, L, '╭'),
    j(N, L, L, N, '╮'),
    j(L, N, L, N, '╯'),
    j(L, N, N, L, '╰'),
    // tees
    j(L, L, N, L, '├'),
    j(L, L, N, H, '┝'),
    j(H, L, N, L, '┞'),
    j(L, H, N, L, '┟'),
    j(H, H, N, L, '┠'),
    j(H, L, N, H, '┡'),
    j(L, H, N, H, '┢'),
    j(H, H, N, H, '┣'),
    j(L, L, L, N, '┤'),
    j(L, L, H, N, '┥'),
    j(H, L, L, N, '┦'),
    j(L, H, L, N, '┧'),
    j(H, H, L, N, '┨'),
    j(H, L, H, N, '┩'),
    j(L, H, H, N, '┪'),
    j(H, H, H, N, '┫'),
    j(N, L, L, L, '┬'),
    j(N, L, H, L, '┭'),
    j(N, L, L, H, '┮'),
    j(N, L, H, H, '┯'),
    j(N, H, L, L, '┰'),
    j(N, H, H, L, '┱'),
    j(N, H, L, H, '┲'),
    j(N, H, H, H, '┳'),
    j(L, N, L, L, '┴'),
    j(L, N, H, L, '┵'),
    j(L, N, L, H, '┶'),
    j(L, N, H, H, '┷'),
    j(H, N, L, L, '┸'),
    j(H, N, H, L, '┹'),
    j(H, N, L, H, '┺'),
    j(H, N, H, H, '┻'),
    // crosses
    j(L, L, L, L, '┼'),
    j(L, L, H, L, '┽'),
    j(L, L, L, H, '┾'),
    j(L, L, H, H, '┿'),
    j(H, L, L, L, '╀'),
    j(L, H, L, L, '╁'),
    j(H, H, L, L, '╂'),
    j(H, L, H, L, '╃'),
    j(H, L, L, H, '╄'),
    j(L, H, H, L, '╅'),
    j(L, H, L, H, '╆'),
    j(H, L, H, H, '╇'),
    j(L, H, H, H, '╈'),
    j(H, H, H, L, '╉'),
    j(H, H, L, H, '╊'),
    j(H, H, H, H, '╋'),
    // double and single mixes
    j(N, L, N, D, '╒'),
    j(N, D, N, L, '╓'),
    j(N, D, N, D, '╔'),
    j(N, L, D, N, '╕'),
    j(N, D, L, N, '╖'),
    j(N, D, D, N, '╗'),
    j(L, N, N, D, '╘'),
    j(D, N, N, L, '╙'),
    j(D, N, N, D, '╚'),
    j(L, N, D, N, '╛'),
    j(D, N, L, N, '╜'),
    j(D, N, D, N, '╝'),
    j(L, L, N, D, '╞'),
    j(D, D, N, L, '╟'),
    j(D, D, N, D, '╠'),
    j(L, L, D, N, '╡'),
    j(D, D, L, N, '╢'),
    j(D, D, D, N, '╣'),
    j(N, L, D, D, '╤'),
    j(N, D, L, L, '╥'),
    j(N, D, D, D, '╦'),
    j(L, N, D, D, '╧'),
    j(D, N, L, L, '╨'),
    j(D, N, D, D, '╩'),
    j(L, L, D, D, '╪'),
    j(D, D, L, L, '╫'),
    j(D, D, D, D, '╬'),
    // ascii
    j(A, A, A, A, '+'),
    j(N, A, A, A, '+'),
    j(A, N, A, A, '+'),
    j(A, A, N, A, '+'),
    j(A, A, A, N, '+'),
    j(N, N, A, A, '-'),
    j(N, A, N, A, '+'),
    j(N, A, A, N, '+'),
    j(A, N, N, A, '+'),
    j(A, N, A, N, '+'),
    j(A, A, N, N, '|'),
];

impl Join {
    /// Every known join, in lookup order.
    pub fn all() -> &'static [Join] {
        JOINS
    }

    /// The first glyph with exactly these arm weights.
    pub fn find(up: Weight, down: Weight, left: Weight, right: Weight) -> Option<Join> {
        JOINS
            .iter()
            .find(|j| j.up == up && j.down == down && j.left == left && j.right == right)
            .copied()
    }

    /// The first join drawn with `glyph`.
    pub fn of(glyph: char) -> Option<Join> {
        JOINS.iter().find(|j| j.glyph == glyph).copied()
    }

    /// The glyph that connects to whatever its neighbours point at it.
    pub fn heal(
        above: Option<Join>,
        below: Option<Join>,
        left: Option<Join>,
        right: Option<Join>,
    ) -> Option<Join> {
        Self::find(
            above.map_or(Weight::None, |j| j.down),
            below.map_or(Weight::None, |j| j.up),
            left.map_or(Weight::None, |j| j.right),
            right.map_or(Weight::None, |j| j.left),
        )
    }

    /// Arm weight in a direction given as a (row, column) step.
    pub(crate) fn arm(&self, rows: i32, columns: i32) -> Weight {
        match (rows, columns) {
            (-1, 0) => self.up,
            (1, 0) => self.down,
            (0, -1) => self.left,
            (0, 1) => self.right,
            _ => Weight::None,
        }
    }
}

impl fmt::Debug for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Join({} {}{}{}{})",
            self.glyph,
            self.up.initial(),
            self.down.initial(),
            self.left.initial(),
            self.right.initial()
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_first_match_wins() {
        assert_eq!(Join::find(N, N, L, L).map(|j| j.glyph), Some('─'));
        assert_eq!(Join::find(N, L, N, L).map(|j| j.glyph), Some('┌'));
        assert_eq!(Join::find(N, N, N, N), None);
    }

    #[test]
    fn test_of_reads_arms() {
        let rounded = Join::of('╭').unwrap();
        assert_eq!((rounded.down, rounded.right), (L, L));
        assert_eq!(Join::of('x'), None);
        assert_eq!(Join::of('╌').map(|j| (j.left, j.right)), Some((L, L)));
    }

    #[test]
    fn test_mixed_stubs() {
        assert_eq!(Join::find(N, N, L, H).map(|j| j.glyph), Some('╼'));
        assert_eq!(Join::find(H, L, N, N).map(|j| j.glyph), Some('╿'));
        let stub = Join::of('╽').unwrap();
        assert_eq!((stub.up, stub.down), (L, H));
    }

    #[test]
    fn test_heal_from_neighbours() {
        let above = Join::of('│');
        let left = Join::of('═');
        let right = Join::of('═');
        assert_eq!(Join::heal(above, None, left, right).map(|j| j.glyph), Some('╧'));

        let healed = Join::heal(Join::of('┐'), Join::of('┘'), Join::of('═'), None);
        assert_eq!(healed.map(|j| j.glyph), Some('╡'));
    }

    #[test]
    fn test_every_glyph_is_found_by_of() {
        for join in Join::all() {
            let found = Join::of(join.glyph).unwrap();
            assert_eq!(found.glyph, join.glyph);
        }
    }

    #[test]
    fn test_line_glyphs() {
        assert_eq!(Line::Double.horizontal(), '═');
        assert_eq!(Line::HeavyQuadDash.vertical(), '┋');
        assert_eq!(Line::LightTripleDash.weight(), Weight::Light);
        for line in Line::ALL {
            let (h, v) = line.glyphs();
            let h = Join::of(h).unwrap();
            let v = Join::of(v).unwrap();
            assert_eq!(h.left, line.weight());
            assert_eq!(v.up, line.weight());
        }
    }
}
