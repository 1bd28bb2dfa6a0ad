//! Theme for the settings menu.
//!
//! Widgets draw with two colours: the active colour marks whatever the user
//! is acting on (the selected child, the held arrow, the chosen label) and
//! the inactive colour everything else. The theme also carries the line
//! style boxes are drawn in and the hold-repeat period editors accelerate
//! by.
//!
//! # Example
//!
//! ```rust
//! use spark_settings::theme::{get_preset, Theme};
//!
//! let amber = get_preset("amber").unwrap();
//! assert_eq!(amber.name, "amber");
//!
//! let plain = Theme::default();
//! assert_eq!(plain.repeat_period, 0.1);
//! ```

mod presets;

pub use presets::*;

use crate::grid::Line;
use crate::types::Colour;

// =============================================================================
// Theme
// =============================================================================

/// Colours, line style and timing shared by every widget of a menu.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Preset name (e.g., "default", "amber").
    pub name: String,
    /// Theme description.
    pub description: String,

    /// Selected child, held arrow, chosen label.
    pub active: Colour,
    /// Frames, unselected children, descriptions.
    pub inactive: Colour,

    /// Style of the frame and editor boxes.
    pub line: Line,

    /// Seconds a direction must be held for the edit step to grow by one.
    pub repeat_period: f32,
}

impl Default for Theme {
    fn default() -> Self {
        default_theme()
    }
}

impl Theme {
    /// A theme with the default colours and timing.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            active: Colour::WHITE,
            inactive: Colour::GREY,
            line: Line::LightSolid,
            repeat_period: 0.1,
        }
    }

    /// Colour for an item that may be the active one.
    #[inline]
    pub fn pick(&self, active: bool) -> Colour {
        if active { self.active } else { self.inactive }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_default() {
        let theme = Theme::default();
        assert_eq!(theme.name, "default");
        assert_eq!(theme.active, Colour::WHITE);
        assert_eq!(theme.inactive, Colour::GREY);
        assert_eq!(theme.line, Line::LightSolid);
    }

    #[test]
    fn test_theme_new() {
        let theme = Theme::new("custom", "My custom theme");
        assert_eq!(theme.name, "custom");
        assert_eq!(theme.description, "My custom theme");
        assert_eq!(theme.repeat_period, 0.1);
    }

    #[test]
    fn test_pick() {
        let theme = Theme::default();
        assert_eq!(theme.pick(true), Colour::WHITE);
        assert_eq!(theme.pick(false), Colour::GREY);
    }
}
