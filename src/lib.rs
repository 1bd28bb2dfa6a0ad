//! # spark-settings
//!
//! Descriptor-driven settings trees, edited through a box-drawn character grid.
//!
//! ## Architecture
//!
//! A configurable type registers a [`model::TypeDescriptor`] once: its editable
//! fields, accessor pairs and actions, with their limits and enable checks.
//! [`model::ObjectConfig`] turns a live object into a tree of [`model::Config`]
//! nodes from that descriptor, re-reading the object every time children are
//! listed.
//!
//! The tree is edited by widgets drawing on a [`grid::CharGrid`]. Boxes and
//! lines drawn on the grid heal into each other, so overlapping editors fuse
//! into one connected figure:
//! ```text
//! Configurable → TypeDescriptor → ObjectConfig → ConfigTree → CharGrid → terminal
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Colour, Coordinate, Buttons, Outcome, Feedback)
//! - [`error`] - Configuration and access errors
//! - [`model`] - Descriptor model: Config, Variable, Limit, ObjectConfig
//! - [`grid`] - Character grid, box-drawing joins, lines, paths, text tables
//! - [`widget`] - Editors and the ConfigTree navigator
//! - [`theme`] - Colours, line style and hold timing for widgets
//! - [`input`] - Crossterm key events to buttons
//! - [`renderer`] - Crossterm output for grids

pub mod error;
pub mod grid;
pub mod input;
pub mod model;
pub mod renderer;
pub mod theme;
pub mod types;
pub mod widget;

// Re-export commonly used items
pub use types::*;

pub use error::{ConfigError, ConfigResult};

pub use model::{
    Choice, Config, ConfigEnum, Configurable, Descriptor, Enabled, Limit, Node, ObjectConfig,
    Range, Scalar, TypeDescriptor, Value, ValueType, Variable, WidgetHint,
};

pub use grid::{Border, CharGrid, Join, Line, TextCells, Weight};

pub use widget::{
    CharArrayWidget, CharacterWidget, ChoiceWidget, ColourWidget, ConfigTree, Haptic,
    HapticHandle, NoHaptic, NumberWidget, Widget, WidgetBuilder,
};

pub use theme::{Theme, get_preset, preset_names};

pub use input::InputState;

pub use renderer::{DiffRenderer, render_grid};
