//! Fixed-length character buffer editor.
//!
//! Chains one [`CharacterWidget`] per position over a working copy of the
//! buffer. YES on a position moves right, or commits the buffer at the last
//! one. NO moves left, or abandons the edit at the first.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{ConfigError, ConfigResult};
use crate::grid::CharGrid;
use crate::model::{Config, Value, ValueType, Variable};
use crate::theme::Theme;
use crate::types::{Buttons, Coordinate, Feedback, Outcome};

use super::character::{ALPHANUMERIC, CharacterWidget};
use super::{HapticHandle, Widget};

/// Variable over one position of a shared buffer.
pub(crate) fn element(buffer: &Rc<RefCell<Vec<char>>>, index: usize) -> Variable {
    let (reader, writer) = (buffer.clone(), buffer.clone());
    Variable::new(
        format!("[{index}]"),
        ValueType::Char,
        move || Ok(Value::Char(reader.borrow().get(index).copied().unwrap_or(' '))),
        move |value| {
            if let (Some(c), Some(slot)) = (value.as_char(), writer.borrow_mut().get_mut(index)) {
                *slot = c;
            }
            Ok(())
        },
    )
}

/// Edits a `Vec<char>` variable one position at a time.
#[derive(Debug)]
pub struct CharArrayWidget {
    grid: CharGrid,
    location: Coordinate,
    variable: Variable,
    buffer: Rc<RefCell<Vec<char>>>,
    alphabet: Vec<char>,
    index: usize,
    element: CharacterWidget,
    outcome: Outcome,
    theme: Theme,
    haptic: HapticHandle,
}

impl CharArrayWidget {
    /// Editor for the buffer whose first glyph sits at `location`.
    pub fn new(grid: CharGrid, location: Coordinate, variable: Variable) -> ConfigResult<Self> {
        let value = variable.get()?;
        let chars = value.as_chars().ok_or_else(|| ConfigError::TypeMismatch {
            member: variable.name().to_string(),
            expected: ValueType::Chars.to_string(),
            found: value.kind().to_string(),
        })?;
        let buffer = Rc::new(RefCell::new(chars.to_vec()));
        let alphabet: Vec<char> = ALPHANUMERIC.chars().collect();
        let theme = Theme::default();
        let haptic = HapticHandle::default();
        let element = Self::build(&grid, location, &buffer, 0, &alphabet, &theme, &haptic)?;

        Ok(Self {
            grid,
            location,
            variable,
            buffer,
            alphabet,
            index: 0,
            element,
            outcome: Outcome::Continue,
            theme,
            haptic,
        })
    }

    pub fn with_alphabet(mut self, alphabet: &[char]) -> ConfigResult<Self> {
        self.alphabet = alphabet.to_vec();
        self.rebuild()?;
        Ok(self)
    }

    pub fn with_theme(mut self, theme: Theme) -> ConfigResult<Self> {
        self.theme = theme;
        self.rebuild()?;
        Ok(self)
    }

    pub fn with_haptic(mut self, haptic: HapticHandle) -> ConfigResult<Self> {
        self.haptic = haptic;
        self.rebuild()?;
        Ok(self)
    }

    /// The working copy.
    pub fn buffer(&self) -> Vec<char> {
        self.buffer.borrow().clone()
    }

    /// Position being edited.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    fn build(
        grid: &CharGrid,
        location: Coordinate,
        buffer: &Rc<RefCell<Vec<char>>>,
        index: usize,
        alphabet: &[char],
        theme: &Theme,
        haptic: &HapticHandle,
    ) -> ConfigResult<CharacterWidget> {
        let at = location.offset(0, index as i32);
        Ok(CharacterWidget::new(grid.clone(), at, element(buffer, index))?
            .with_alphabet(alphabet)
            .always_set(true)
            .with_theme(theme.clone())
            .with_haptic(haptic.clone()))
    }

    fn rebuild(&mut self) -> ConfigResult<()> {
        self.element = Self::build(
            &self.grid,
            self.location,
            &self.buffer,
            self.index,
            &self.alphabet,
            &self.theme,
            &self.haptic,
        )?;
        Ok(())
    }
}

impl Widget for CharArrayWidget {
    fn input_event(&mut self, pressed: Buttons) -> ConfigResult<()> {
        self.element.input_event(pressed)?;
        let last = self.buffer.borrow().len().saturating_sub(1);

        match self.element.outcome() {
            Outcome::Yes => {
                if self.index >= last {
                    self.variable.set(Value::Chars(self.buffer()))?;
                    self.outcome = Outcome::Yes;
                    self.haptic.send(Feedback::Yes);
                } else {
                    self.index += 1;
                }
                self.rebuild()?;
            }
            Outcome::No => {
                if self.index == 0 {
                    self.outcome = Outcome::No;
                    self.haptic.send(Feedback::No);
                } else {
                    self.index -= 1;
                }
                self.rebuild()?;
            }
            Outcome::Continue => {}
        }
        Ok(())
    }

    fn input_state(&mut self, held: Buttons) -> ConfigResult<()> {
        self.element.input_state(held)
    }

    fn update(&mut self, delta: f32) -> ConfigResult<()> {
        let text: String = self.buffer.borrow().iter().collect();
        let Coordinate { row, column } = self.location;
        self.grid
            .colour(self.theme.inactive)
            .line(self.theme.line)
            .move_to(row - 1, column - 1)
            .draw_box_with(text.chars().count() as i32 + 2, 3, |inner| {
                inner.write(&text);
            });
        self.element.update(delta)
    }

    fn text_grid(&self) -> &CharGrid {
        &self.grid
    }

    fn outcome(&self) -> Outcome {
        self.outcome
    }
}
