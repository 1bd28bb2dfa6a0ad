//! Input Module - crossterm keys onto the four logical buttons.
//!
//! Widgets want two views of the same buttons each frame: the edges (what
//! was pressed since the last frame) and the levels (what is held right
//! now). [`InputState`] folds crossterm key events into both.
//!
//! Most terminals never report key releases. Unless release reporting is
//! switched on, a button counts as held only for the frame it was pressed
//! or auto-repeated in, which turns a tap into a one-step nudge and a long
//! press into a run of repeats.
//!
//! # API
//!
//! - `Buttons::from_key_code` - Which button a key stands for
//! - `InputState::handle` - Fold one key event into the frame
//! - `InputState::pressed` / `InputState::held` - Edges and levels
//! - `InputState::end_frame` - Forget edges (and unreported releases)
//! - `poll_key` - Non-blocking key read with timeout
//!
//! # Example
//!
//! ```ignore
//! let mut input = InputState::new();
//! loop {
//!     while let Some(key) = poll_key(Duration::ZERO)? {
//!         input.handle(&key);
//!     }
//!     tree.input_event(input.pressed())?;
//!     tree.input_state(input.held())?;
//!     tree.update(delta)?;
//!     input.end_frame();
//! }
//! ```

use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, poll, read};

use crate::types::Buttons;

// =============================================================================
// KEY MAPPING
// =============================================================================

impl Buttons {
    /// The logical button a key stands for, if any.
    ///
    /// Enter, space, right arrow and `y` accept; escape, backspace, left
    /// arrow and `n` reject; arrows and `k`/`j` move.
    pub fn from_key_code(code: KeyCode) -> Self {
        match code {
            KeyCode::Enter | KeyCode::Right | KeyCode::Char(' ' | 'y') => Self::YES,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('n') => Self::NO,
            KeyCode::Up | KeyCode::Char('k') => Self::UP,
            KeyCode::Down | KeyCode::Char('j') => Self::DOWN,
            _ => Self::NONE,
        }
    }
}

// =============================================================================
// INPUT STATE
// =============================================================================

/// Per-frame button edges and levels.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pressed: Buttons,
    held: Buttons,
    releases: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that the terminal reports key releases, so held buttons stay
    /// held until released.
    pub fn with_release_events(mut self, releases: bool) -> Self {
        self.releases = releases;
        self
    }

    /// Fold a key event in. Returns false for keys that map to no button.
    pub fn handle(&mut self, event: &KeyEvent) -> bool {
        let button = Buttons::from_key_code(event.code);
        if button.is_empty() {
            return false;
        }
        match event.kind {
            KeyEventKind::Press => {
                self.pressed |= button;
                self.held |= button;
            }
            KeyEventKind::Repeat => self.held |= button,
            KeyEventKind::Release => self.held.remove(button),
        }
        true
    }

    /// Buttons pressed since the last frame.
    #[inline]
    pub fn pressed(&self) -> Buttons {
        self.pressed
    }

    /// Buttons held now.
    #[inline]
    pub fn held(&self) -> Buttons {
        self.held
    }

    pub fn end_frame(&mut self) {
        self.pressed = Buttons::NONE;
        if !self.releases {
            self.held = Buttons::NONE;
        }
    }
}

// =============================================================================
// POLLING
// =============================================================================

/// Poll for a key event with timeout. Non-key events are swallowed.
pub fn poll_key(timeout: Duration) -> std::io::Result<Option<KeyEvent>> {
    if poll(timeout)? {
        if let Event::Key(key) = read()? {
            return Ok(Some(key));
        }
    }
    Ok(None)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Buttons::from_key_code(KeyCode::Enter), Buttons::YES);
        assert_eq!(Buttons::from_key_code(KeyCode::Char('y')), Buttons::YES);
        assert_eq!(Buttons::from_key_code(KeyCode::Esc), Buttons::NO);
        assert_eq!(Buttons::from_key_code(KeyCode::Up), Buttons::UP);
        assert_eq!(Buttons::from_key_code(KeyCode::Char('j')), Buttons::DOWN);
        assert_eq!(Buttons::from_key_code(KeyCode::Char('x')), Buttons::NONE);
    }

    #[test]
    fn test_press_without_release_reporting() {
        let mut input = InputState::new();
        assert!(input.handle(&key(KeyCode::Up, KeyEventKind::Press)));
        assert_eq!(input.pressed(), Buttons::UP);
        assert_eq!(input.held(), Buttons::UP);

        input.end_frame();
        assert_eq!(input.pressed(), Buttons::NONE);
        assert_eq!(input.held(), Buttons::NONE);
    }

    #[test]
    fn test_hold_with_release_reporting() {
        let mut input = InputState::new().with_release_events(true);
        input.handle(&key(KeyCode::Down, KeyEventKind::Press));
        input.handle(&key(KeyCode::Enter, KeyEventKind::Press));
        assert_eq!(input.pressed(), Buttons::DOWN | Buttons::YES);

        input.end_frame();
        input.handle(&key(KeyCode::Enter, KeyEventKind::Release));
        assert_eq!(input.pressed(), Buttons::NONE);
        assert_eq!(input.held(), Buttons::DOWN);

        input.end_frame();
        input.handle(&key(KeyCode::Down, KeyEventKind::Repeat));
        assert_eq!(input.held(), Buttons::DOWN);
        input.handle(&key(KeyCode::Down, KeyEventKind::Release));
        assert_eq!(input.held(), Buttons::NONE);
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        let mut input = InputState::new();
        assert!(!input.handle(&key(KeyCode::Tab, KeyEventKind::Press)));
        assert_eq!(input.pressed(), Buttons::NONE);
    }
}
