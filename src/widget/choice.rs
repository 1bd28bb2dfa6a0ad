//! Discrete choice picker.
//!
//! Lists every label in a box that slides so the selected label sits on the
//! variable's row, marked by `├` and `┤` on the box edges. Labels of
//! colour-hinted variables that name a colour are drawn in that colour.

use unicode_width::UnicodeWidthStr;

use crate::error::{ConfigError, ConfigResult};
use crate::grid::CharGrid;
use crate::model::{Choice, Config, Variable, WidgetHint};
use crate::theme::Theme;
use crate::types::{Buttons, Colour, Coordinate, Feedback, Outcome};

use super::{HapticHandle, Widget, dispatch};

/// Picks one entry of a choice and writes its value.
#[derive(Debug)]
pub struct ChoiceWidget {
    grid: CharGrid,
    location: Coordinate,
    variable: Variable,
    choice: Choice,
    selected: usize,
    outcome: Outcome,
    theme: Theme,
    haptic: HapticHandle,
}

impl ChoiceWidget {
    /// Picker over the variable's choice limit, or its type's own choices.
    pub fn new(grid: CharGrid, location: Coordinate, variable: Variable) -> ConfigResult<Self> {
        let choice = variable
            .choice()
            .cloned()
            .ok_or_else(|| ConfigError::UnsupportedType {
                member: variable.name().to_string(),
                value_type: variable.value_type().to_string(),
            })?;
        Self::with_choice(grid, location, variable, choice)
    }

    /// Picker offering `true` and `false`.
    pub fn boolean(grid: CharGrid, location: Coordinate, variable: Variable) -> ConfigResult<Self> {
        Self::with_choice(grid, location, variable, Choice::boolean())
    }

    /// Picker over an explicit choice. Starts on the entry matching the
    /// variable's current value, or the first.
    pub fn with_choice(grid: CharGrid, location: Coordinate, variable: Variable, choice: Choice) -> ConfigResult<Self> {
        let selected = choice.index_of(&variable.get()?).unwrap_or(0);
        Ok(Self {
            grid,
            location,
            variable,
            choice,
            selected,
            outcome: Outcome::Continue,
            theme: Theme::default(),
            haptic: HapticHandle::default(),
        })
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_haptic(mut self, haptic: HapticHandle) -> Self {
        self.haptic = haptic;
        self
    }

    #[inline]
    pub fn selected(&self) -> usize {
        self.selected
    }

    fn yes(&mut self) -> ConfigResult<()> {
        match self.choice.chosen(self.selected) {
            Some(value) => {
                self.variable.set(value.clone())?;
                self.outcome = Outcome::Yes;
                self.haptic.send(Feedback::Yes);
            }
            None => self.no(),
        }
        Ok(())
    }

    fn no(&mut self) {
        self.outcome = Outcome::No;
        self.haptic.send(Feedback::No);
    }

    fn select(&mut self, step: i32, feedback: Feedback) {
        let last = self.choice.len().saturating_sub(1) as i32;
        let next = (self.selected as i32 + step).clamp(0, last) as usize;
        if next != self.selected {
            self.selected = next;
            self.haptic.send(feedback);
        }
    }

    fn label_colour(&self, index: usize) -> Colour {
        let named = (self.variable.widget_hint() == Some(WidgetHint::Colour))
            .then(|| Colour::named(&self.choice.labels()[index]))
            .flatten();
        named.unwrap_or_else(|| self.theme.pick(index == self.selected))
    }
}

impl Widget for ChoiceWidget {
    fn input_event(&mut self, pressed: Buttons) -> ConfigResult<()> {
        dispatch(pressed, |button| {
            if button == Buttons::YES {
                self.yes()?;
            } else if button == Buttons::NO {
                self.no();
            } else if button == Buttons::UP {
                self.select(-1, Feedback::Up);
            } else if button == Buttons::DOWN {
                self.select(1, Feedback::Down);
            }
            Ok(())
        })
    }

    fn input_state(&mut self, _held: Buttons) -> ConfigResult<()> {
        Ok(())
    }

    fn update(&mut self, _delta: f32) -> ConfigResult<()> {
        if self.choice.is_empty() {
            self.outcome = Outcome::No;
            return Ok(());
        }
        if self.outcome != Outcome::Continue {
            return Ok(());
        }

        let labels = self.choice.labels().to_vec();
        let colours: Vec<Colour> = (0..labels.len()).map(|i| self.label_colour(i)).collect();
        let width = labels.iter().map(|l| l.width()).max().unwrap_or(4) as i32;
        let height = labels.len() as i32 + 2;
        let Coordinate { row, column } = self.location;

        self.grid
            .colour(self.theme.inactive)
            .line(self.theme.line)
            .move_to(row - self.selected as i32 - 1, column - 1)
            .draw_box_with(width + 2, height, |inner| {
                for (i, label) in labels.iter().enumerate() {
                    inner.move_to(i as i32, 0).colour(colours[i]).write(label);
                }
            });
        self.grid
            .move_to(row, column - 1)
            .write("├")
            .move_to(row, column + width)
            .write("┤");
        Ok(())
    }

    fn text_grid(&self) -> &CharGrid {
        &self.grid
    }

    fn outcome(&self) -> Outcome {
        self.outcome
    }

    fn description(&self) -> Option<String> {
        self.choice.description(self.selected).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Limit, Value, ValueType};
    use crate::widget::testing::{recorder, stored};

    fn picker(labels: &[&str], value: &str) -> (ChoiceWidget, std::rc::Rc<std::cell::RefCell<Value>>) {
        let (variable, store) = stored("pick", ValueType::Str, Value::Str(value.into()));
        let variable = variable.with_limit(Some(Limit::Choice(Choice::strings(labels))));
        let widget = ChoiceWidget::new(CharGrid::new(8, 6), Coordinate::new(2, 1), variable).unwrap();
        (widget, store)
    }

    #[test]
    fn test_starts_on_current_value() {
        let (widget, _) = picker(&["a", "bb", "c"], "bb");
        assert_eq!(widget.selected(), 1);
        let (widget, _) = picker(&["a", "bb", "c"], "zz");
        assert_eq!(widget.selected(), 0);
    }

    #[test]
    fn test_box_slides_with_selection() {
        let (mut widget, _) = picker(&["a", "bb", "c"], "bb");
        widget.update(0.0).unwrap();
        assert_eq!(
            widget.text_grid().rows(),
            vec!["┌──┐    ", "│a │    ", "├bb┤    ", "│c │    ", "└──┘    ", "        "]
        );
        assert_eq!(widget.text_grid().get_colour(2, 1), Some(Colour::WHITE));
        assert_eq!(widget.text_grid().get_colour(1, 1), Some(Colour::GREY));
    }

    #[test]
    fn test_selection_clamps_and_commits() {
        let (widget, store) = picker(&["a", "bb", "c"], "a");
        let (haptic, log) = recorder();
        let mut widget = widget.with_haptic(haptic);

        widget.input_event(Buttons::UP).unwrap();
        assert_eq!(widget.selected(), 0);
        widget.input_event(Buttons::DOWN).unwrap();
        widget.input_event(Buttons::DOWN).unwrap();
        widget.input_event(Buttons::DOWN).unwrap();
        assert_eq!(widget.selected(), 2);

        widget.input_event(Buttons::YES).unwrap();
        assert_eq!(widget.outcome(), Outcome::Yes);
        assert_eq!(*store.borrow(), Value::Str("c".into()));
        assert_eq!(*log.borrow(), vec![Feedback::Down, Feedback::Down, Feedback::Yes]);
    }

    #[test]
    fn test_no_keeps_value() {
        let (mut widget, store) = picker(&["a", "b"], "a");
        widget.input_event(Buttons::DOWN | Buttons::NO).unwrap();
        assert_eq!(widget.outcome(), Outcome::No);
        assert_eq!(*store.borrow(), Value::Str("a".into()));
    }

    #[test]
    fn test_empty_choice_rejects() {
        let (mut widget, _) = picker(&[], "a");
        widget.update(0.0).unwrap();
        assert_eq!(widget.outcome(), Outcome::No);
    }

    #[test]
    fn test_boolean() {
        let (variable, store) = stored("flag", ValueType::Bool, Value::Bool(false));
        let mut widget = ChoiceWidget::boolean(CharGrid::new(8, 4), Coordinate::new(1, 1), variable).unwrap();
        assert_eq!(widget.selected(), 1);
        widget.input_event(Buttons::UP | Buttons::YES).unwrap();
        // yes is handled before up
        assert_eq!(*store.borrow(), Value::Bool(false));
    }

    #[test]
    fn test_colour_labels_and_descriptions() {
        let choice = Choice::strings(&["red", "plain"]).describe("red", "Warm");
        let (variable, _) = stored("tint", ValueType::Str, Value::Str("red".into()));
        let variable = variable.with_hint(Some(WidgetHint::Colour));
        let mut widget =
            ChoiceWidget::with_choice(CharGrid::new(10, 5), Coordinate::new(1, 1), variable, choice).unwrap();

        widget.update(0.0).unwrap();
        assert_eq!(widget.text_grid().get_colour(1, 1), Some(Colour::RED));
        assert_eq!(widget.text_grid().get_colour(2, 1), Some(Colour::GREY));
        assert_eq!(widget.description(), Some("Warm".to_string()));

        widget.input_event(Buttons::DOWN).unwrap();
        assert_eq!(widget.description(), None);
    }
}
