//! Widget engine - editing state machines drawn on a character grid.
//!
//! Every widget runs the same protocol. The host forwards button edges with
//! [`Widget::input_event`] and button levels with [`Widget::input_state`],
//! then calls [`Widget::update`] once per frame to advance hold timers and
//! draw. The widget reports [`Outcome::Continue`] until the edit is accepted
//! ([`Outcome::Yes`]) or rejected ([`Outcome::No`]); the owner then drops it.
//!
//! Composite values are edited by chaining simpler editors: a character
//! buffer is a run of [`CharacterWidget`]s, a number is a character buffer
//! over its formatted digits, a colour is four numbers.
//!
//! # API
//!
//! - [`ConfigTree`] - Navigates a settings tree and opens editors on leaves
//! - [`CharacterWidget`] - Picks one glyph from an alphabet
//! - [`CharArrayWidget`] - Edits a fixed-length character buffer
//! - [`NumberWidget`] - Edits a float or int digit by digit within a range
//! - [`ColourWidget`] - Edits the four components of a packed colour
//! - [`ChoiceWidget`] - Picks one entry of a discrete choice
//! - [`Haptic`] - Non-visual feedback channel
//!
//! # Example
//!
//! ```ignore
//! let grid = CharGrid::new(40, 12);
//! let root = Rc::new(ObjectConfig::new("settings", settings)?);
//! let mut tree = ConfigTree::new(grid, root)?;
//!
//! tree.input_event(Buttons::DOWN)?;
//! tree.update(0.016)?;
//! println!("{}", tree.text_grid());
//! ```

mod char_array;
mod character;
mod choice;
mod colour;
mod number;
mod summary;
mod tree;

pub use char_array::CharArrayWidget;
pub use character::{ALPHANUMERIC, CharacterWidget};
pub use choice::ChoiceWidget;
pub use colour::ColourWidget;
pub use number::{NumberKind, NumberWidget};
pub use summary::summary;
pub use tree::{ConfigTree, WidgetBuilder};

use std::fmt;
use std::rc::Rc;

use crate::error::ConfigResult;
use crate::grid::CharGrid;
use crate::types::{Buttons, Feedback, Outcome};

// =============================================================================
// Widget
// =============================================================================

/// A stateful editor drawn on a character grid.
pub trait Widget {
    /// Buttons pressed since the last frame.
    fn input_event(&mut self, pressed: Buttons) -> ConfigResult<()>;

    /// Buttons currently held, for press-and-hold behaviour.
    fn input_state(&mut self, held: Buttons) -> ConfigResult<()>;

    /// Advance by `delta` seconds and draw.
    fn update(&mut self, delta: f32) -> ConfigResult<()>;

    /// The grid the widget draws on.
    fn text_grid(&self) -> &CharGrid;

    fn outcome(&self) -> Outcome;

    /// Readable description of the value being considered, if any.
    fn description(&self) -> Option<String> {
        None
    }
}

/// Run `handle` for each pressed button, in yes, no, up, down order.
pub(crate) fn dispatch(
    pressed: Buttons,
    mut handle: impl FnMut(Buttons) -> ConfigResult<()>,
) -> ConfigResult<()> {
    for button in [Buttons::YES, Buttons::NO, Buttons::UP, Buttons::DOWN] {
        if pressed.contains(button) {
            handle(button)?;
        }
    }
    Ok(())
}

// =============================================================================
// Haptic
// =============================================================================

/// Receives feedback signals, for the host to turn into sound or vibration.
///
/// Any `Fn(Feedback)` closure is a haptic.
pub trait Haptic {
    fn feedback(&self, signal: Feedback);
}

impl<F: Fn(Feedback)> Haptic for F {
    fn feedback(&self, signal: Feedback) {
        self(signal)
    }
}

/// Discards all feedback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptic;

impl Haptic for NoHaptic {
    fn feedback(&self, _signal: Feedback) {}
}

/// Shared handle passed from a widget to the editors it opens.
#[derive(Clone)]
pub struct HapticHandle(Rc<dyn Haptic>);

impl HapticHandle {
    pub fn new(haptic: impl Haptic + 'static) -> Self {
        Self(Rc::new(haptic))
    }

    #[inline]
    pub fn send(&self, signal: Feedback) {
        self.0.feedback(signal);
    }
}

impl Default for HapticHandle {
    fn default() -> Self {
        Self::new(NoHaptic)
    }
}

impl fmt::Debug for HapticHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HapticHandle")
    }
}

// =============================================================================
// Test support
// =============================================================================
