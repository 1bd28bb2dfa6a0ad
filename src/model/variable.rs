//! Leaf nodes: a single typed value with its constraints.

use std::fmt;
use std::rc::Rc;

use super::config::{Config, Node};
use super::enabled::Enabled;
use super::limit::{Choice, Limit, Range};
use super::value::{Value, ValueType, WidgetHint};
use crate::error::ConfigResult;

type Getter = Rc<dyn Fn() -> ConfigResult<Value>>;
type Setter = Rc<dyn Fn(Value) -> ConfigResult<()>>;

/// A gettable, settable value plus everything needed to edit it.
///
/// Variables are cheap handles. Composites build fresh ones each time their
/// children are read, so they always reflect the live backing state.
#[derive(Clone)]
pub struct Variable {
    name: String,
    description: String,
    value_type: ValueType,
    hint: Option<WidgetHint>,
    limit: Option<Limit>,
    choices: Option<Choice>,
    enabled: Enabled,
    getter: Getter,
    setter: Setter,
}

impl Variable {
    pub fn new(
        name: impl Into<String>,
        value_type: ValueType,
        get: impl Fn() -> ConfigResult<Value> + 'static,
        set: impl Fn(Value) -> ConfigResult<()> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            value_type,
            hint: None,
            limit: None,
            choices: None,
            enabled: Enabled::always(),
            getter: Rc::new(get),
            setter: Rc::new(set),
        }
    }

    /// A variable that runs `run` when set and reads as [`Value::None`].
    pub fn action(name: impl Into<String>, run: impl Fn() -> ConfigResult<()> + 'static) -> Self {
        Self::new(name, ValueType::Action, || Ok(Value::None), move |_| run())
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_hint(mut self, hint: Option<WidgetHint>) -> Self {
        self.hint = hint;
        self
    }

    pub fn with_limit(mut self, limit: Option<Limit>) -> Self {
        self.limit = limit;
        self
    }

    /// The value type's own choice set (enumerations).
    pub fn with_choices(mut self, choices: Option<Choice>) -> Self {
        self.choices = choices;
        self
    }

    pub fn with_enabled(mut self, enabled: Enabled) -> Self {
        self.enabled = enabled;
        self
    }

    #[inline]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    #[inline]
    pub fn widget_hint(&self) -> Option<WidgetHint> {
        self.hint
    }

    #[inline]
    pub fn limit(&self) -> Option<&Limit> {
        self.limit.as_ref()
    }

    #[inline]
    pub fn is_action(&self) -> bool {
        self.value_type == ValueType::Action
    }

    /// The range limit, if that is the limit.
    pub fn range(&self) -> Option<&Range> {
        self.limit.as_ref().and_then(Limit::as_range)
    }

    /// The explicit choice limit, falling back to the type's own choices.
    pub fn choice(&self) -> Option<&Choice> {
        self.limit
            .as_ref()
            .and_then(Limit::as_choice)
            .or(self.choices.as_ref())
    }

    pub fn get(&self) -> ConfigResult<Value> {
        (self.getter)()
    }

    pub fn set(&self, value: Value) -> ConfigResult<()> {
        (self.setter)(value)
    }
}

impl Config for Variable {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn enabled(&self) -> ConfigResult<bool> {
        self.enabled.evaluate()
    }

    fn children(&self) -> ConfigResult<Option<Vec<Node>>> {
        Ok(None)
    }
}

/// Variables are identified by name within their composite.
impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("hint", &self.hint)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}
