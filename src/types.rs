//! Core types for spark-settings.
//!
//! Small value types shared by the descriptor model, the character grid and
//! the widgets. Nothing in here knows about trees or editors.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

// =============================================================================
// Colour
// =============================================================================

/// RGBA colour packed into a single `u32` as `0xRRGGBBAA`.
///
/// Every grid cell carries one of these. The packed form is what integer
/// settings hinted as colours hold, and what the colour editor composes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour(pub u32);

impl Colour {
    /// Pack four 8-bit components.
    pub const fn pack(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self((r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | a as u32)
    }

    /// Pack an opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::pack(r, g, b, 255)
    }

    // Named colours. Half and quarter intensities truncate, so GREY is 127.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const GREY: Self = Self::rgb(127, 127, 127);
    pub const DARK_GREY: Self = Self::rgb(63, 63, 63);
    pub const LIGHT_GREY: Self = Self::rgb(191, 191, 191);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const ORANGE: Self = Self::rgb(255, 127, 0);
    pub const SPRING_GREEN: Self = Self::rgb(127, 255, 0);
    pub const TURQUOISE: Self = Self::rgb(0, 255, 127);
    pub const OCEAN: Self = Self::rgb(0, 127, 255);
    pub const VIOLET: Self = Self::rgb(127, 0, 255);
    pub const RASPBERRY: Self = Self::rgb(255, 0, 127);

    /// Lookup table behind [`Colour::named`].
    pub const NAMED: &'static [(&'static str, Colour)] = &[
        ("white", Self::WHITE),
        ("black", Self::BLACK),
        ("grey", Self::GREY),
        ("dark_grey", Self::DARK_GREY),
        ("light_grey", Self::LIGHT_GREY),
        ("red", Self::RED),
        ("green", Self::GREEN),
        ("blue", Self::BLUE),
        ("yellow", Self::YELLOW),
        ("cyan", Self::CYAN),
        ("magenta", Self::MAGENTA),
        ("orange", Self::ORANGE),
        ("spring_green", Self::SPRING_GREEN),
        ("turquoise", Self::TURQUOISE),
        ("ocean", Self::OCEAN),
        ("violet", Self::VIOLET),
        ("raspberry", Self::RASPBERRY),
    ];

    /// Find a named colour, ignoring case.
    pub fn named(name: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, c)| *c)
    }

    #[inline]
    pub const fn red(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn green(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn blue(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn alpha(&self) -> u8 {
        self.0 as u8
    }

    /// Get one component by index: 0 red, 1 green, 2 blue, anything else alpha.
    pub const fn component(&self, index: usize) -> u8 {
        match index {
            0 => self.red(),
            1 => self.green(),
            2 => self.blue(),
            _ => self.alpha(),
        }
    }

    /// Replace one component by index, using the same numbering as [`Colour::component`].
    pub const fn with_component(self, index: usize, value: u8) -> Self {
        match index {
            0 => Self::pack(value, self.green(), self.blue(), self.alpha()),
            1 => Self::pack(self.red(), value, self.blue(), self.alpha()),
            2 => Self::pack(self.red(), self.green(), value, self.alpha()),
            _ => Self::pack(self.red(), self.green(), self.blue(), value),
        }
    }

    /// Same colour, different alpha.
    pub const fn with_alpha(self, alpha: u8) -> Self {
        self.with_component(3, alpha)
    }

    /// Parse hex colour string (#RGB, #RRGGBB, #RRGGBBAA).
    ///
    /// Returns None for invalid format.
    ///
    /// ```
    /// use spark_settings::Colour;
    ///
    /// assert_eq!(Colour::from_hex("#fff"), Some(Colour::WHITE));
    /// assert_eq!(Colour::from_hex("ff000080"), Some(Colour::pack(255, 0, 0, 128)));
    /// assert!(Colour::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        fn nibble(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        fn byte(s: &[u8], i: usize) -> Option<u8> {
            Some(nibble(s[i])? << 4 | nibble(s[i + 1])?)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => {
                let r = nibble(bytes[0])?;
                let g = nibble(bytes[1])?;
                let b = nibble(bytes[2])?;
                Some(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 => Some(Self::rgb(byte(bytes, 0)?, byte(bytes, 2)?, byte(bytes, 4)?)),
            8 => Some(Self::pack(
                byte(bytes, 0)?,
                byte(bytes, 2)?,
                byte(bytes, 4)?,
                byte(bytes, 6)?,
            )),
            _ => None,
        }
    }
}

/// Prints the `RRR:GGG:BBB:AAA` form.
impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:03}:{:03}:{:03}:{:03}",
            self.red(),
            self.green(),
            self.blue(),
            self.alpha()
        )
    }
}

/// Parses exactly the `RRR:GGG:BBB:AAA` form produced by `Display`.
impl FromStr for Colour {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColour {
            text: s.to_string(),
        };

        let mut components = [0u8; 4];
        let mut parts = s.split(':');
        for slot in components.iter_mut() {
            let part = parts.next().ok_or_else(invalid)?;
            if part.len() != 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *slot = part.parse().map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }

        let [r, g, b, a] = components;
        Ok(Self::pack(r, g, b, a))
    }
}

// =============================================================================
// Coordinate
// =============================================================================

/// A row/column position on a character grid.
///
/// Signed so that positions computed relative to a widget can fall off the
/// top or left of the grid; such cells are clipped, not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinate {
    pub row: i32,
    pub column: i32,
}

impl Coordinate {
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Shift by the given deltas.
    pub const fn offset(&self, rows: i32, columns: i32) -> Self {
        Self::new(self.row + rows, self.column + columns)
    }
}

// =============================================================================
// Buttons (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// The four logical buttons every widget understands.
    ///
    /// Delivered both as edges (pressed this frame) and as levels
    /// (currently held): `Buttons::YES | Buttons::UP`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u8 {
        const NONE = 0;
        const YES = 1 << 0;
        const NO = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
    }
}

// =============================================================================
// Outcome & Feedback
// =============================================================================

/// State of a widget's edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Still editing.
    #[default]
    Continue,
    /// Finished, accepted.
    Yes,
    /// Finished, rejected.
    No,
}

impl Outcome {
    #[inline]
    pub const fn is_finished(&self) -> bool {
        !matches!(self, Self::Continue)
    }
}

/// Non-visual feedback signals, mapped by the host to sound or vibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    Yes,
    No,
    Up,
    Down,
    /// The hold-repeat step size changed.
    Tick,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colour_components() {
        let c = Colour::pack(1, 2, 3, 4);
        assert_eq!(c.0, 0x01020304);
        assert_eq!((c.red(), c.green(), c.blue(), c.alpha()), (1, 2, 3, 4));
        assert_eq!(c.with_component(1, 200).green(), 200);
        assert_eq!(c.with_alpha(9).alpha(), 9);
    }

    #[test]
    fn test_colour_display() {
        assert_eq!(Colour::RED.to_string(), "255:000:000:255");
        assert_eq!(Colour::BLUE.with_alpha(128).to_string(), "000:000:255:128");
        assert_eq!(Colour::GREY.to_string(), "127:127:127:255");
    }

    #[test]
    fn test_colour_parse() {
        assert_eq!("000:255:000:255".parse::<Colour>(), Ok(Colour::GREEN));
        assert_eq!(
            "000:000:255:128".parse::<Colour>(),
            Ok(Colour::pack(0, 0, 255, 128))
        );
    }

    #[test]
    fn test_colour_parse_invalid() {
        for bad in ["", "1:2:3:4", "000:000:000", "000:000:000:000:000", "256:000:000:000", "abc:000:000:000"] {
            assert!(bad.parse::<Colour>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_colour_named() {
        assert_eq!(Colour::named("Red"), Some(Colour::RED));
        assert_eq!(Colour::named("SPRING_GREEN"), Some(Colour::SPRING_GREEN));
        assert_eq!(Colour::named("puce"), None);
    }

    #[test]
    fn test_colour_from_hex() {
        assert_eq!(Colour::from_hex("#ff0000"), Some(Colour::RED));
        assert_eq!(Colour::from_hex("  #00F "), Some(Colour::BLUE));
        assert_eq!(Colour::from_hex("#12345"), None);
    }

    #[test]
    fn test_buttons_combine() {
        let held = Buttons::YES | Buttons::DOWN;
        assert!(held.contains(Buttons::YES));
        assert!(!held.contains(Buttons::UP));
        assert_eq!(Buttons::default(), Buttons::NONE);
    }

    #[test]
    fn test_outcome_finished() {
        assert!(!Outcome::Continue.is_finished());
        assert!(Outcome::Yes.is_finished());
        assert!(Outcome::No.is_finished());
    }
}
