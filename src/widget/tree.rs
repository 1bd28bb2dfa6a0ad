//! Settings tree navigator.
//!
//! Draws the breadcrumb path, a connector under the current composite's name
//! and the composite's children with their values. Up and down move the
//! highlight, YES enters composites, runs actions and opens editors on
//! leaves, NO climbs back out. While an editor is open it gets all input.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::error::{ConfigError, ConfigResult};
use crate::grid::CharGrid;
use crate::model::{Config, Node, Value, ValueType, Variable, WidgetHint};
use crate::theme::Theme;
use crate::types::{Buttons, Coordinate, Feedback, Outcome};

use super::char_array::CharArrayWidget;
use super::character::CharacterWidget;
use super::choice::ChoiceWidget;
use super::colour::ColourWidget;
use super::number::NumberWidget;
use super::summary::summary;
use super::{HapticHandle, Widget, dispatch};

// =============================================================================
// WidgetBuilder
// =============================================================================

/// Builds editors for a value type the navigator has no editor for.
pub trait WidgetBuilder {
    fn build(
        &self,
        grid: CharGrid,
        location: Coordinate,
        variable: Variable,
        theme: &Theme,
        haptic: HapticHandle,
    ) -> ConfigResult<Box<dyn Widget>>;
}

impl<F> WidgetBuilder for F
where
    F: Fn(CharGrid, Coordinate, Variable, &Theme, HapticHandle) -> ConfigResult<Box<dyn Widget>>,
{
    fn build(
        &self,
        grid: CharGrid,
        location: Coordinate,
        variable: Variable,
        theme: &Theme,
        haptic: HapticHandle,
    ) -> ConfigResult<Box<dyn Widget>> {
        self(grid, location, variable, theme, haptic)
    }
}

// =============================================================================
// ConfigTree
// =============================================================================

/// One child row, gathered before drawing.
struct Entry {
    name: String,
    selected: bool,
    value: String,
}

/// Walks a [`Config`] tree on a character grid.
pub struct ConfigTree {
    grid: CharGrid,
    root: Rc<dyn Config>,
    /// Composites entered below the root.
    path: Vec<Rc<dyn Config>>,
    selected: Option<Node>,
    /// Position of the highlight when it was last found.
    index: usize,
    widget: Option<Box<dyn Widget>>,
    builders: HashMap<ValueType, Rc<dyn WidgetBuilder>>,
    theme: Theme,
    haptic: HapticHandle,
}

impl ConfigTree {
    /// Navigator over `root`, with its first child highlighted and the first
    /// frame already drawn.
    pub fn new(grid: CharGrid, root: Rc<dyn Config>) -> ConfigResult<Self> {
        let mut tree = Self {
            grid,
            root,
            path: Vec::new(),
            selected: None,
            index: 0,
            widget: None,
            builders: HashMap::new(),
            theme: Theme::default(),
            haptic: HapticHandle::default(),
        };
        tree.update(0.0)?;
        Ok(tree)
    }

    /// Edit variables of `value_type` with editors from `builder`.
    pub fn with_builder(mut self, value_type: ValueType, builder: impl WidgetBuilder + 'static) -> Self {
        self.builders.insert(value_type, Rc::new(builder));
        self
    }

    /// Draw with `theme`, and hand it to every editor opened from now on.
    pub fn with_theme(mut self, theme: Theme) -> ConfigResult<Self> {
        self.theme = theme;
        self.update(0.0)?;
        Ok(self)
    }

    pub fn with_haptic(mut self, haptic: HapticHandle) -> Self {
        self.haptic = haptic;
        self
    }

    /// The composite whose children are listed.
    pub fn current(&self) -> &Rc<dyn Config> {
        self.path.last().unwrap_or(&self.root)
    }

    /// The highlighted child, `None` only when the current composite is empty.
    #[inline]
    pub fn selected(&self) -> Option<&Node> {
        self.selected.as_ref()
    }

    /// The open editor.
    pub fn widget(&self) -> Option<&dyn Widget> {
        self.widget.as_deref()
    }

    /// Composites from the root down to the current one.
    pub fn depth(&self) -> usize {
        self.path.len() + 1
    }

    /// `/root/child/` style path to the current composite.
    pub fn breadcrumb(&self) -> String {
        let mut out = format!("/{}/", self.root.name());
        for composite in &self.path {
            out.push_str(composite.name());
            out.push('/');
        }
        out
    }

    fn children(&self) -> ConfigResult<Vec<Node>> {
        Ok(self.current().children()?.unwrap_or_default())
    }

    /// Move the highlight by `step`, clamped to the children. The highlight
    /// is found again by name, so a re-read list picks up the fresh node. A
    /// highlight that vanished falls back to the nearest remaining position.
    fn select(&mut self, step: i32, feedback: Option<Feedback>) -> ConfigResult<()> {
        let children = self.children()?;
        if children.is_empty() {
            self.selected = None;
            return Ok(());
        }

        let last = children.len() as i32 - 1;
        let from = self
            .selected
            .as_ref()
            .and_then(|s| children.iter().position(|c| c.name() == s.name()))
            .map_or_else(|| (self.index as i32).min(last), |i| i as i32);
        let next = (from + step).clamp(0, last);
        self.index = next as usize;
        self.selected = children.into_iter().nth(next as usize);

        if next != from {
            if let Some(signal) = feedback {
                trace!(from, to = next, "tree selection moved");
                self.haptic.send(signal);
            }
        }
        Ok(())
    }

    fn yes(&mut self) -> ConfigResult<()> {
        let Some(selected) = self.selected.clone() else {
            return Ok(());
        };

        match selected {
            Node::Leaf(variable) if variable.is_action() => {
                trace!(action = variable.name(), "invoking action");
                self.haptic.send(Feedback::Yes);
                variable.set(Value::None)?;
            }
            Node::Leaf(variable) => {
                trace!(variable = variable.name(), "opening editor");
                self.widget = Some(self.widget_for(&variable)?);
                self.haptic.send(Feedback::Yes);
            }
            Node::Composite(composite) => {
                let first = composite.children()?.unwrap_or_default().into_iter().next();
                match first {
                    Some(first) => {
                        trace!(composite = composite.name(), "entering");
                        self.path.push(composite);
                        self.selected = Some(first);
                        self.index = 0;
                        self.haptic.send(Feedback::Yes);
                    }
                    None => self.haptic.send(Feedback::No),
                }
            }
        }
        Ok(())
    }

    fn no(&mut self) {
        if let Some(composite) = self.path.pop() {
            trace!(composite = composite.name(), "leaving");
            self.selected = Some(Node::Composite(composite));
            self.haptic.send(Feedback::No);
        }
    }

    /// Pick and build the editor for a leaf, most specific first.
    fn widget_for(&self, variable: &Variable) -> ConfigResult<Box<dyn Widget>> {
        let children = self.children()?;
        let row = children
            .iter()
            .position(|c| c.name() == variable.name())
            .map_or(-1, |i| i as i32);
        let at = Coordinate::new(row + 3, value_column(&children));

        let grid = self.grid.clone();
        let var = variable.clone();
        let theme = self.theme.clone();
        let haptic = self.haptic.clone();

        if variable.choice().is_some() {
            return Ok(Box::new(
                ChoiceWidget::new(grid, at, var)?.with_theme(theme).with_haptic(haptic),
            ));
        }
        if variable.widget_hint() == Some(WidgetHint::Colour) {
            return Ok(Box::new(
                ColourWidget::new(grid, at, var)?.with_theme(theme)?.with_haptic(haptic)?,
            ));
        }

        Ok(match variable.value_type() {
            ValueType::Int => Box::new(NumberWidget::int(grid, at, var)?.with_theme(theme)?.with_haptic(haptic)?),
            ValueType::Bool => Box::new(ChoiceWidget::boolean(grid, at, var)?.with_theme(theme).with_haptic(haptic)),
            ValueType::Chars => Box::new(CharArrayWidget::new(grid, at, var)?.with_theme(theme)?.with_haptic(haptic)?),
            ValueType::Char => Box::new(CharacterWidget::new(grid, at, var)?.with_theme(theme).with_haptic(haptic)),
            ValueType::Float => Box::new(NumberWidget::float(grid, at, var)?.with_theme(theme)?.with_haptic(haptic)?),
            other => match self.builders.get(&other) {
                Some(builder) => builder.build(grid, at, var, &theme, haptic)?,
                None => {
                    return Err(ConfigError::UnsupportedType {
                        member: variable.name().to_string(),
                        value_type: other.to_string(),
                    });
                }
            },
        })
    }

    fn entries(&self, children: &[Node]) -> ConfigResult<Vec<Entry>> {
        let selected = self.selected.as_ref().map(Node::name);
        children
            .iter()
            .map(|child| {
                let (name, value) = match child {
                    Node::Leaf(variable) => (variable.name().to_string(), summary(variable)?),
                    Node::Composite(composite) => (format!("{}/", composite.name()), String::new()),
                };
                Ok(Entry {
                    selected: Some(child.name()) == selected,
                    name,
                    value,
                })
            })
            .collect()
    }

    fn draw(&mut self) -> ConfigResult<()> {
        let children = self.children()?;
        let entries = self.entries(&children)?;
        // content is inset by the frame
        let value_at = value_column(&children) - 1;
        let (columns, rows) = (self.grid.width(), self.grid.height());

        let header = truncate_path(&self.breadcrumb(), columns.saturating_sub(2) as usize);
        let connector = connector(&header, self.current().name());
        let theme = &self.theme;

        self.grid
            .move_to(0, 0)
            .colour(theme.inactive)
            .line(theme.line)
            .draw_box_with(columns, rows, |content| {
                content.colour(theme.active).write(&header);
                content.move_to(1, 0).write(&connector);

                for (i, entry) in entries.iter().enumerate() {
                    let branch = if i + 1 == entries.len() { "└" } else { "├" };
                    let (left, right) = if entry.selected { ("[", "]") } else { (" ", " ") };
                    let row = i as i32 + 2;
                    content
                        .move_to(row, 0)
                        .colour(theme.active)
                        .write(branch)
                        .colour(theme.pick(entry.selected))
                        .write(left)
                        .write(&entry.name)
                        .write(right)
                        .move_to(row, value_at)
                        .write(&entry.value);
                }
            });

        let description = match (&self.widget, &self.selected) {
            (Some(widget), _) => widget.description().unwrap_or_default(),
            (None, Some(node)) => node.description().to_string(),
            (None, None) => String::new(),
        };
        if !description.trim().is_empty() {
            let lines: Vec<&str> = description.split('\n').collect();
            let w = lines.iter().map(|l| l.chars().count()).max().unwrap_or(10) as i32;
            let h = lines.len() as i32;
            self.grid
                .colour(theme.inactive)
                .move_to(rows - 2 - h, columns - w - 3)
                .draw_box_with(w + 3, h + 2, |inner| {
                    inner.colour(theme.inactive).write(&description);
                });
        }
        Ok(())
    }
}

/// Widest child name, composites without their `/`.
fn name_width(children: &[Node]) -> usize {
    children.iter().map(|c| c.name().chars().count()).max().unwrap_or(0)
}

/// Grid column where leaf values are drawn and their editors open: the
/// frame, the branch glyph, the bracketed name padded by four.
fn value_column(children: &[Node]) -> i32 {
    name_width(children) as i32 + 8
}

/// Keep the tail of a path that does not fit, marked with a leading `…`.
fn truncate_path(path: &str, width: usize) -> String {
    let length = path.chars().count();
    if length <= width || width == 0 {
        return path.to_string();
    }
    let tail: String = path.chars().skip(length - (width - 1)).collect();
    format!("…{tail}")
}

/// The line that points from the header up at the current composite's name.
fn connector(header: &str, name: &str) -> String {
    let length = header.chars().count();
    let name = name.chars().count();
    format!(
        "┌{}┴{}┘",
        "─".repeat(length.saturating_sub(name + 2)),
        "─".repeat(length.saturating_sub(3).min(name.saturating_sub(2))),
    )
}

impl Widget for ConfigTree {
    fn input_event(&mut self, pressed: Buttons) -> ConfigResult<()> {
        if let Some(widget) = self.widget.as_mut() {
            return widget.input_event(pressed);
        }
        dispatch(pressed, |button| {
            if button == Buttons::YES {
                self.yes()
            } else if button == Buttons::NO {
                self.no();
                Ok(())
            } else if button == Buttons::UP {
                self.select(-1, Some(Feedback::Up))
            } else if button == Buttons::DOWN {
                self.select(1, Some(Feedback::Down))
            } else {
                Ok(())
            }
        })
    }

    fn input_state(&mut self, held: Buttons) -> ConfigResult<()> {
        match self.widget.as_mut() {
            Some(widget) => widget.input_state(held),
            None => Ok(()),
        }
    }

    fn update(&mut self, delta: f32) -> ConfigResult<()> {
        self.select(0, None)?;
        self.draw()?;

        let Some(widget) = self.widget.as_mut() else {
            return Ok(());
        };
        widget.update(delta)?;

        let outcome = widget.outcome();
        if outcome.is_finished() {
            trace!(?outcome, "editor closed");
            self.widget = None;
            // children may have changed limits or visibility
            self.select(0, None)?;
            if outcome == Outcome::Yes && self.current().wizard() {
                self.select(1, None)?;
            }
        }
        Ok(())
    }

    fn text_grid(&self) -> &CharGrid {
        &self.grid
    }

    /// The navigator never finishes on its own.
    fn outcome(&self) -> Outcome {
        Outcome::Continue
    }

    fn description(&self) -> Option<String> {
        self.selected
            .as_ref()
            .map(|node| node.description().to_string())
            .filter(|d| !d.is_empty())
    }
}

impl fmt::Debug for ConfigTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigTree")
            .field("path", &self.breadcrumb())
            .field("selected", &self.selected)
            .field("editing", &self.widget.is_some())
            .field("theme", &self.theme.name)
            .finish_non_exhaustive()
    }
}
