//! Single glyph picker.
//!
//! Up and down walk an alphabet. Holding a direction accelerates: the step
//! grows by one for every repeat period the button is held, the pending
//! destination is shown while held, and the move is applied on release.

use crate::error::{ConfigError, ConfigResult};
use crate::grid::CharGrid;
use crate::model::{Config, Value, Variable};
use crate::theme::Theme;
use crate::types::{Buttons, Coordinate, Feedback, Outcome};

use super::{HapticHandle, Widget, dispatch};

/// Lower-case letters then digits.
pub const ALPHANUMERIC: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

const MIN_REPEAT_PERIOD: f32 = 0.001;

/// Edits a `char` variable by picking from an alphabet.
#[derive(Debug)]
pub struct CharacterWidget {
    grid: CharGrid,
    location: Coordinate,
    variable: Variable,
    alphabet: Vec<char>,
    /// The glyph the variable held when the widget opened.
    original: char,
    /// Alphabet index, `None` while the original glyph is not in the alphabet.
    current: Option<usize>,

    up_held: bool,
    down_held: bool,
    up_held_for: f32,
    down_held_for: f32,
    last_increment: i32,
    last_decrement: i32,

    always_set: bool,
    live_update: bool,
    outcome: Outcome,
    theme: Theme,
    haptic: HapticHandle,
}

impl CharacterWidget {
    /// Picker over [`ALPHANUMERIC`] for the glyph at `location`.
    pub fn new(grid: CharGrid, location: Coordinate, variable: Variable) -> ConfigResult<Self> {
        let value = variable.get()?;
        let original = value.as_char().ok_or_else(|| ConfigError::TypeMismatch {
            member: variable.name().to_string(),
            expected: "char".to_string(),
            found: value.kind().to_string(),
        })?;

        let mut widget = Self {
            grid,
            location,
            variable,
            alphabet: Vec::new(),
            original,
            current: None,
            up_held: false,
            down_held: false,
            up_held_for: 0.0,
            down_held_for: 0.0,
            last_increment: 1,
            last_decrement: 1,
            always_set: false,
            live_update: false,
            outcome: Outcome::Continue,
            theme: Theme::default(),
            haptic: HapticHandle::default(),
        };
        widget.set_alphabet(ALPHANUMERIC.chars().collect());
        Ok(widget)
    }

    /// Pick from `alphabet` instead.
    pub fn with_alphabet(mut self, alphabet: &[char]) -> Self {
        self.set_alphabet(alphabet.to_vec());
        self
    }

    /// Write the variable on NO as well as on YES.
    pub fn always_set(mut self, always: bool) -> Self {
        self.always_set = always;
        self
    }

    /// Write the variable every time the input state changes.
    pub fn live_update(mut self, live: bool) -> Self {
        self.live_update = live;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_haptic(mut self, haptic: HapticHandle) -> Self {
        self.haptic = haptic;
        self
    }

    fn set_alphabet(&mut self, alphabet: Vec<char>) {
        self.current = alphabet.iter().position(|c| *c == self.original);
        self.alphabet = alphabet;
    }

    /// Step size after holding a direction for `held` seconds.
    ///
    /// Periods below one millisecond, including zero and NaN, count as one
    /// millisecond.
    pub fn step(held: f32, period: f32) -> i32 {
        let period = period.max(MIN_REPEAT_PERIOD);
        ((held - period) / period) as i32 + 1
    }

    /// Current position. A glyph outside the alphabet sits just before it.
    fn position(&self) -> i32 {
        self.current.map_or(-1, |i| i as i32)
    }

    fn clamp(&self, position: i32) -> Option<usize> {
        let last = self.alphabet.len().checked_sub(1)?;
        Some(position.clamp(0, last as i32) as usize)
    }

    fn glyph_at(&self, index: Option<usize>) -> char {
        index
            .and_then(|i| self.alphabet.get(i).copied())
            .unwrap_or(self.original)
    }

    /// The glyph currently chosen.
    pub fn glyph(&self) -> char {
        self.glyph_at(self.current)
    }

    fn commit(&self) -> ConfigResult<()> {
        self.variable.set(Value::Char(self.glyph()))
    }

    fn finish(&mut self, outcome: Outcome, accepted: Feedback) -> ConfigResult<()> {
        if accepted == Feedback::Yes || self.always_set {
            self.commit()?;
        }
        self.outcome = outcome;
        self.haptic.send(if self.always_set { Feedback::Tick } else { accepted });
        Ok(())
    }
}

impl Widget for CharacterWidget {
    fn input_event(&mut self, pressed: Buttons) -> ConfigResult<()> {
        dispatch(pressed, |button| {
            if button == Buttons::YES {
                self.finish(Outcome::Yes, Feedback::Yes)
            } else if button == Buttons::NO {
                self.finish(Outcome::No, Feedback::No)
            } else {
                Ok(())
            }
        })
    }

    fn input_state(&mut self, held: Buttons) -> ConfigResult<()> {
        let period = self.theme.repeat_period;
        let mut position = self.position();
        let mut moved = false;

        self.up_held = held.contains(Buttons::UP);
        if !self.up_held && self.up_held_for > 0.0 {
            position += Self::step(self.up_held_for, period);
            self.up_held_for = 0.0;
            moved = true;
            self.haptic.send(Feedback::Up);
        }

        self.down_held = held.contains(Buttons::DOWN);
        if !self.down_held && self.down_held_for > 0.0 {
            position -= Self::step(self.down_held_for, period);
            self.down_held_for = 0.0;
            moved = true;
            self.haptic.send(Feedback::Down);
        }

        if moved {
            self.current = self.clamp(position);
        }
        if self.live_update {
            self.commit()?;
        }
        Ok(())
    }

    fn update(&mut self, delta: f32) -> ConfigResult<()> {
        let period = self.theme.repeat_period;
        if self.up_held {
            self.up_held_for += delta;
        }
        if self.down_held {
            self.down_held_for += delta;
        }

        let holding = self.up_held || self.down_held;
        let base = self.position();
        let mut prospect = base;
        if self.up_held {
            prospect += Self::step(self.up_held_for, period);
        }
        if self.down_held {
            prospect -= Self::step(self.down_held_for, period);
        }
        let shown = if holding { self.clamp(prospect) } else { self.current };

        let landed = shown.map_or(base, |i| i as i32);
        let increment = (landed - base).max(1);
        let decrement = (base - landed).max(1);
        if holding && (increment != self.last_increment || decrement != self.last_decrement) {
            self.haptic.send(Feedback::Tick);
        }
        self.last_increment = increment;
        self.last_decrement = decrement;

        if self.outcome == Outcome::Continue {
            let Coordinate { row, column } = self.location;
            let glyph = self.glyph_at(shown).to_string();
            self.grid
                .move_to(row - 1, column)
                .colour(self.theme.pick(self.up_held))
                .write("△")
                .move_to(row, column)
                .colour(self.theme.pick(!holding))
                .write(&glyph)
                .move_to(row + 1, column)
                .colour(self.theme.pick(self.down_held))
                .write("▽");
        }
        Ok(())
    }

    fn text_grid(&self) -> &CharGrid {
        &self.grid
    }

    fn outcome(&self) -> Outcome {
        self.outcome
    }
}
