//! Theme presets.
//!
//! - default (white on grey, light lines)
//! - amber (monochrome terminal look, heavy lines)
//! - mono (no colour distinction, ascii lines)

use super::Theme;
use crate::grid::Line;
use crate::types::Colour;

/// White for the active item, grey for the rest.
pub fn default_theme() -> Theme {
    Theme::new("default", "White on grey with light lines")
}

/// Amber phosphor.
pub fn amber() -> Theme {
    Theme {
        name: "amber".to_string(),
        description: "Amber phosphor with heavy lines".to_string(),
        active: Colour::rgb(255, 176, 0),
        inactive: Colour::rgb(153, 102, 0),
        line: Line::HeavySolid,
        repeat_period: 0.1,
    }
}

/// Plain text for terminals without box-drawing glyphs.
pub fn mono() -> Theme {
    Theme {
        name: "mono".to_string(),
        description: "Single colour, ascii lines".to_string(),
        active: Colour::WHITE,
        inactive: Colour::WHITE,
        line: Line::Ascii,
        repeat_period: 0.1,
    }
}

// =============================================================================
// Preset Lookup
// =============================================================================

/// Get a preset theme by name, ignoring case.
///
/// # Example
///
/// ```rust
/// use spark_settings::theme::get_preset;
///
/// assert_eq!(get_preset("Mono").unwrap().name, "mono");
/// assert!(get_preset("neon").is_none());
/// ```
pub fn get_preset(name: &str) -> Option<Theme> {
    match name.to_lowercase().as_str() {
        "default" => Some(default_theme()),
        "amber" => Some(amber()),
        "mono" => Some(mono()),
        _ => None,
    }
}

/// List all available preset names.
pub fn preset_names() -> &'static [&'static str] {
    &["default", "amber", "mono"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_resolve() {
        for name in preset_names() {
            let theme = get_preset(name).unwrap();
            assert_eq!(theme.name, *name);
            assert!(!theme.description.is_empty());
        }
    }

    #[test]
    fn test_preset_lines() {
        assert_eq!(amber().line, Line::HeavySolid);
        assert_eq!(mono().line, Line::Ascii);
    }
}
