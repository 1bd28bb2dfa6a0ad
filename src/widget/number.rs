//! Digit-by-digit numeric editor.
//!
//! The value is formatted with its range's fixed width and edited as a
//! character buffer: a sign picker first when the range admits negatives,
//! digit pickers elsewhere, the decimal point skipped. After every edge the
//! buffer is parsed, clamped into the range and formatted again, so the
//! displayed digits are always a legal value.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{ConfigError, ConfigResult};
use crate::grid::CharGrid;
use crate::model::{Config, Range, Value, Variable};
use crate::theme::Theme;
use crate::types::{Buttons, Coordinate, Feedback, Outcome};

use super::char_array::element;
use super::character::CharacterWidget;
use super::{HapticHandle, Widget};

const DIGITS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
const SIGN: &[char] = &['-', '+'];

/// What the edited number is written back as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Float,
    Int,
}

/// Edits a numeric variable that has a closed range.
#[derive(Debug)]
pub struct NumberWidget {
    grid: CharGrid,
    location: Coordinate,
    variable: Variable,
    range: Range,
    kind: NumberKind,
    buffer: Rc<RefCell<Vec<char>>>,
    index: usize,
    element: CharacterWidget,
    live_update: bool,
    outcome: Outcome,
    theme: Theme,
    haptic: HapticHandle,
}

impl NumberWidget {
    /// Editor whose first digit sits at `location`.
    ///
    /// Fails with [`ConfigError::OpenRange`] unless the variable has a range
    /// with both bounds.
    pub fn new(grid: CharGrid, location: Coordinate, variable: Variable, kind: NumberKind) -> ConfigResult<Self> {
        let range = variable
            .range()
            .copied()
            .filter(Range::is_closed)
            .ok_or_else(|| ConfigError::OpenRange {
                member: variable.name().to_string(),
            })?;
        let value = variable.get()?;
        let number = value.as_float().ok_or_else(|| ConfigError::TypeMismatch {
            member: variable.name().to_string(),
            expected: "number".to_string(),
            found: value.kind().to_string(),
        })?;

        let buffer = Rc::new(RefCell::new(range.format(number).chars().collect()));
        let theme = Theme::default();
        let haptic = HapticHandle::default();
        let element = Self::build(&grid, location, &buffer, 0, &range, &theme, &haptic)?;

        Ok(Self {
            grid,
            location,
            variable,
            range,
            kind,
            buffer,
            index: 0,
            element,
            live_update: false,
            outcome: Outcome::Continue,
            theme,
            haptic,
        })
    }

    pub fn float(grid: CharGrid, location: Coordinate, variable: Variable) -> ConfigResult<Self> {
        Self::new(grid, location, variable, NumberKind::Float)
    }

    pub fn int(grid: CharGrid, location: Coordinate, variable: Variable) -> ConfigResult<Self> {
        Self::new(grid, location, variable, NumberKind::Int)
    }

    /// Write the variable whenever the input state changes, not only on YES.
    pub fn live_update(mut self, live: bool) -> Self {
        self.live_update = live;
        self
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

    /// The formatted text being edited.
    pub fn text(&self) -> String {
        self.buffer.borrow().iter().collect()
    }

    fn build(
        grid: &CharGrid,
        location: Coordinate,
        buffer: &Rc<RefCell<Vec<char>>>,
        index: usize,
        range: &Range,
        theme: &Theme,
        haptic: &HapticHandle,
    ) -> ConfigResult<CharacterWidget> {
        let alphabet = if index == 0 && range.has_negative() { SIGN } else { DIGITS };
        Ok(
            CharacterWidget::new(grid.clone(), location.offset(0, index as i32), element(buffer, index))?
                .with_alphabet(alphabet)
                .always_set(true)
                .live_update(true)
                .with_theme(theme.clone())
                .with_haptic(haptic.clone()),
        )
    }

    fn rebuild(&mut self) -> ConfigResult<()> {
        self.element = Self::build(
            &self.grid,
            self.location,
            &self.buffer,
            self.index,
            &self.range,
            &self.theme,
            &self.haptic,
        )?;
        Ok(())
    }

    /// Parse the buffer and clamp it into the range.
    fn parse(&self) -> ConfigResult<f32> {
        let text = self.text();
        let parsed: f32 = text.parse().map_err(|_| ConfigError::InvalidNumber { text })?;
        Ok(self.range.clamp(parsed))
    }

    fn value(&self, number: f32) -> Value {
        match self.kind {
            NumberKind::Float => Value::Float(number),
            NumberKind::Int => Value::Int(self.range.clamp_int(number.round() as i32)),
        }
    }

    fn is_point(&self, index: usize) -> bool {
        self.buffer.borrow().get(index) == Some(&'.')
    }
}

impl Widget for NumberWidget {
    fn input_event(&mut self, pressed: Buttons) -> ConfigResult<()> {
        self.element.input_event(pressed)?;

        let number = self.parse()?;
        *self.buffer.borrow_mut() = self.range.format(number).chars().collect();
        let last = self.buffer.borrow().len().saturating_sub(1);

        match self.element.outcome() {
            Outcome::Yes => {
                if self.index >= last {
                    self.variable.set(self.value(number))?;
                    self.outcome = Outcome::Yes;
                    self.haptic.send(Feedback::Yes);
                } else {
                    self.index += 1;
                    if self.is_point(self.index) {
                        self.index += 1;
                    }
                }
                self.rebuild()?;
            }
            Outcome::No => {
                if self.index == 0 {
                    self.outcome = Outcome::No;
                    self.haptic.send(Feedback::No);
                } else {
                    self.index -= 1;
                    if self.is_point(self.index) {
                        self.index -= 1;
                    }
                }
                self.rebuild()?;
            }
            Outcome::Continue => {}
        }
        Ok(())
    }

    fn input_state(&mut self, held: Buttons) -> ConfigResult<()> {
        self.element.input_state(held)?;
        if self.live_update {
            let number = self.parse()?;
            self.variable.set(self.value(number))?;
        }
        Ok(())
    }

    fn update(&mut self, delta: f32) -> ConfigResult<()> {
        let text = self.text();
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Limit, ValueType};
    use crate::widget::testing::stored;

    fn ranged(value: Value, value_type: ValueType, range: Range) -> (Variable, Rc<RefCell<Value>>) {
        let (variable, store) = stored("n", value_type, value);
        (variable.with_limit(Some(Limit::Range(range))), store)
    }

    fn tap_up(widget: &mut NumberWidget) {
        widget.input_state(Buttons::UP).unwrap();
        widget.update(0.05).unwrap();
        widget.input_state(Buttons::NONE).unwrap();
    }

    #[test]
    fn test_cursor_skips_the_point() {
        let range = Range::closed(-10.0, 20.0, 2).unwrap();
        let (variable, store) = ranged(Value::Float(123.456), ValueType::Float, range);
        let mut widget = NumberWidget::float(CharGrid::new(8, 3), Coordinate::new(1, 1), variable).unwrap();

        widget.update(0.0).unwrap();
        assert_eq!(widget.text_grid().rows(), vec!["┌△─────┐", "│+20.00│", "└▽─────┘"]);

        for expected in ["┌─△────┐", "┌──△───┐", "┌────△─┐", "┌─────△┐"] {
            widget.input_event(Buttons::YES).unwrap();
            widget.update(0.0).unwrap();
            let rows = widget.text_grid().rows();
            assert_eq!(rows[0], expected);
            assert_eq!(rows[1], "│+20.00│");
        }

        widget.input_event(Buttons::YES).unwrap();
        assert_eq!(widget.outcome(), Outcome::Yes);
        assert_eq!(*store.borrow(), Value::Float(20.0));
    }

    #[test]
    fn test_int_digit_edit() {
        let range = Range::closed(0.0, 255.0, 0).unwrap();
        let (variable, store) = ranged(Value::Int(7), ValueType::Int, range);
        let mut widget = NumberWidget::int(CharGrid::new(5, 3), Coordinate::new(1, 1), variable).unwrap();
        assert_eq!(widget.text(), "007");

        widget.input_event(Buttons::YES).unwrap();
        widget.input_event(Buttons::YES).unwrap();
        tap_up(&mut widget);
        assert_eq!(widget.text(), "008");

        widget.input_event(Buttons::YES).unwrap();
        assert_eq!(widget.outcome(), Outcome::Yes);
        assert_eq!(*store.borrow(), Value::Int(8));
    }

    #[test]
    fn test_out_of_range_digits_are_clamped() {
        let range = Range::closed(0.0, 255.0, 0).unwrap();
        let (variable, store) = ranged(Value::Int(200), ValueType::Int, range);
        let mut widget = NumberWidget::int(CharGrid::new(5, 3), Coordinate::new(1, 1), variable).unwrap();

        tap_up(&mut widget);
        assert_eq!(widget.text(), "300");
        widget.input_event(Buttons::YES).unwrap();
        assert_eq!(widget.text(), "255");
        assert_eq!(*store.borrow(), Value::Int(200));
    }

    #[test]
    fn test_live_update_writes_through() {
        let range = Range::closed(0.0, 9.0, 0).unwrap();
        let (variable, store) = ranged(Value::Int(3), ValueType::Int, range);
        let mut widget = NumberWidget::int(CharGrid::new(3, 3), Coordinate::new(1, 1), variable)
            .unwrap()
            .live_update(true);

        tap_up(&mut widget);
        assert_eq!(*store.borrow(), Value::Int(4));
    }

    #[test]
    fn test_no_at_first_digit_rejects() {
        let range = Range::closed(-1.0, 1.0, 1).unwrap();
        let (variable, store) = ranged(Value::Float(0.5), ValueType::Float, range);
        let mut widget = NumberWidget::float(CharGrid::new(6, 3), Coordinate::new(1, 1), variable).unwrap();
        widget.input_event(Buttons::NO).unwrap();
        assert_eq!(widget.outcome(), Outcome::No);
        assert_eq!(*store.borrow(), Value::Float(0.5));
    }

    #[test]
    fn test_open_range_is_an_error() {
        let range = Range::new(Some(0.0), None, 0).unwrap();
        let (variable, _) = ranged(Value::Int(1), ValueType::Int, range);
        let err = NumberWidget::int(CharGrid::new(4, 3), Coordinate::new(1, 1), variable).unwrap_err();
        assert_eq!(err, ConfigError::OpenRange { member: "n".into() });

        let (variable, _) = stored("m", ValueType::Int, Value::Int(1));
        let err = NumberWidget::int(CharGrid::new(4, 3), Coordinate::new(1, 1), variable).unwrap_err();
        assert!(matches!(err, ConfigError::OpenRange { .. }));
    }
}
