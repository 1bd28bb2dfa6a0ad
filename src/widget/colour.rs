//! Packed colour editor.
//!
//! Four int editors, red, green, blue then alpha, each over `0..=255` and
//! placed over its own field of the `RRR:GGG:BBB:AAA` text. The text is
//! drawn in the colour being composed, so every digit change previews live.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::{ConfigError, ConfigResult};
use crate::grid::CharGrid;
use crate::model::{Config, Limit, Range, Scalar, Value, ValueType, Variable};
use crate::theme::Theme;
use crate::types::{Buttons, Colour, Coordinate, Feedback, Outcome};

use super::number::NumberWidget;
use super::{HapticHandle, Widget};

const COMPONENTS: [&str; 4] = ["R", "G", "B", "A"];

/// Edits an int variable holding a packed colour.
#[derive(Debug)]
pub struct ColourWidget {
    grid: CharGrid,
    location: Coordinate,
    variable: Variable,
    current: Rc<Cell<Colour>>,
    index: usize,
    component: NumberWidget,
    outcome: Outcome,
    theme: Theme,
    haptic: HapticHandle,
}

impl ColourWidget {
    pub fn new(grid: CharGrid, location: Coordinate, variable: Variable) -> ConfigResult<Self> {
        let value = variable.get()?;
        let colour = Colour::from_value(value.clone()).ok_or_else(|| ConfigError::TypeMismatch {
            member: variable.name().to_string(),
            expected: ValueType::Int.to_string(),
            found: value.kind().to_string(),
        })?;
        let current = Rc::new(Cell::new(colour));
        let theme = Theme::default();
        let haptic = HapticHandle::default();
        let component = Self::build(&grid, location, &current, 0, &theme, &haptic)?;

        Ok(Self {
            grid,
            location,
            variable,
            current,
            index: 0,
            component,
            outcome: Outcome::Continue,
            theme,
            haptic,
        })
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

    /// The colour composed so far.
    #[inline]
    pub fn colour(&self) -> Colour {
        self.current.get()
    }

    /// Variable over one component of the working colour.
    fn channel(current: &Rc<Cell<Colour>>, index: usize) -> ConfigResult<Variable> {
        let (reader, writer) = (current.clone(), current.clone());
        Ok(Variable::new(
            COMPONENTS[index],
            ValueType::Int,
            move || Ok(Value::Int(reader.get().component(index) as i32)),
            move |value| {
                if let Some(v) = value.as_int() {
                    writer.set(writer.get().with_component(index, v.clamp(0, 255) as u8));
                }
                Ok(())
            },
        )
        .with_limit(Some(Limit::Range(Range::closed(0.0, 255.0, 0)?))))
    }

    fn build(
        grid: &CharGrid,
        location: Coordinate,
        current: &Rc<Cell<Colour>>,
        index: usize,
        theme: &Theme,
        haptic: &HapticHandle,
    ) -> ConfigResult<NumberWidget> {
        let at = location.offset(0, index as i32 * 4);
        NumberWidget::int(grid.clone(), at, Self::channel(current, index)?)?
            .live_update(true)
            .with_theme(theme.clone())?
            .with_haptic(haptic.clone())
    }

    fn rebuild(&mut self) -> ConfigResult<()> {
        self.component = Self::build(
            &self.grid,
            self.location,
            &self.current,
            self.index,
            &self.theme,
            &self.haptic,
        )?;
        Ok(())
    }
}

impl Widget for ColourWidget {
    fn input_event(&mut self, pressed: Buttons) -> ConfigResult<()> {
        self.component.input_event(pressed)?;

        match self.component.outcome() {
            Outcome::Yes => {
                if self.index == COMPONENTS.len() - 1 {
                    self.variable.set(self.colour().into_value())?;
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
        self.component.input_state(held)
    }

    fn update(&mut self, delta: f32) -> ConfigResult<()> {
        let colour = self.colour();
        let Coordinate { row, column } = self.location;
        self.grid
            .move_to(row, column)
            .colour(colour)
            .write(&colour.to_string());
        self.component.update(delta)
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
    use crate::model::WidgetHint;
    use crate::widget::testing::stored;

    fn editor(colour: Colour) -> (ColourWidget, std::rc::Rc<std::cell::RefCell<Value>>) {
        let (variable, store) = stored("tint", ValueType::Int, colour.into_value());
        let variable = variable.with_hint(Some(WidgetHint::Colour));
        let widget = ColourWidget::new(CharGrid::new(20, 3), Coordinate::new(1, 1), variable).unwrap();
        (widget, store)
    }

    fn tap_up(widget: &mut ColourWidget) {
        widget.input_state(Buttons::UP).unwrap();
        widget.update(0.05).unwrap();
        widget.input_state(Buttons::NONE).unwrap();
    }

    #[test]
    fn test_components_edit_in_turn() {
        let (mut widget, store) = editor(Colour::pack(10, 20, 30, 40));

        // last digit of red
        widget.input_event(Buttons::YES).unwrap();
        widget.input_event(Buttons::YES).unwrap();
        tap_up(&mut widget);
        assert_eq!(widget.colour(), Colour::pack(11, 20, 30, 40));

        widget.input_event(Buttons::YES).unwrap();
        for _ in 0..9 {
            widget.input_event(Buttons::YES).unwrap();
        }
        assert_eq!(widget.outcome(), Outcome::Yes);
        assert_eq!(*store.borrow(), Colour::pack(11, 20, 30, 40).into_value());
    }

    #[test]
    fn test_text_is_drawn_in_its_colour() {
        let (mut widget, _) = editor(Colour::RED);
        widget.update(0.0).unwrap();
        // the red editor's box covers the first separator
        assert_eq!(widget.text_grid().rows()[1], "│255│000:000:255    ");
        assert_eq!(widget.text_grid().get_colour(1, 5), Some(Colour::RED));
    }

    #[test]
    fn test_no_backs_out_then_rejects() {
        let (mut widget, store) = editor(Colour::BLUE);
        for _ in 0..3 {
            widget.input_event(Buttons::YES).unwrap();
        }
        assert_eq!(widget.index, 1);

        // first digit of green backs out to red
        widget.input_event(Buttons::NO).unwrap();
        assert_eq!(widget.index, 0);
        assert_eq!(widget.outcome(), Outcome::Continue);

        widget.input_event(Buttons::NO).unwrap();
        assert_eq!(widget.outcome(), Outcome::No);
        assert_eq!(*store.borrow(), Colour::BLUE.into_value());
    }
}
