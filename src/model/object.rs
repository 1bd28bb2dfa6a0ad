//! Composite nodes backed by a configurable object.

use std::cell::RefCell;
use std::rc::Rc;

use super::config::{Config, Node};
use super::descriptor::{Check, Configurable, Kind, Resolved, TypeDescriptor};
use super::enabled::Enabled;
use super::harvest::Harvested;
use super::limit::Limit;
use super::subject::Subject;
use super::variable::Variable;
use crate::error::ConfigResult;

/// A composite whose children are derived from a [`Configurable`] object.
///
/// Children are rebuilt on every [`Config::children`] call, so enablement,
/// produced choice sets and values always reflect the object as it is now.
pub struct ObjectConfig<T: Configurable> {
    name: String,
    description: Option<String>,
    subject: Subject<T>,
    enabled: Enabled,
    descriptor: Rc<TypeDescriptor<T>>,
}

impl<T: Configurable> ObjectConfig<T> {
    /// Root composite over a shared object.
    ///
    /// Registration errors for `T` and every nested type surface here.
    pub fn new(name: impl Into<String>, root: Rc<RefCell<T>>) -> ConfigResult<Self> {
        let name = name.into();
        let subject = Subject::new(&name, root);
        Self::with_subject(&name, subject, Enabled::always())
    }

    pub(crate) fn with_subject(
        name: &str,
        subject: Subject<T>,
        enabled: Enabled,
    ) -> ConfigResult<Self> {
        Ok(Self {
            name: name.to_string(),
            description: None,
            subject,
            enabled,
            descriptor: TypeDescriptor::resolved()?,
        })
    }

    /// Replace the type's description; empty text keeps it.
    pub fn with_description(mut self, description: &str) -> Self {
        if !description.is_empty() {
            self.description = Some(description.to_string());
        }
        self
    }

    pub fn subject(&self) -> &Subject<T> {
        &self.subject
    }

    pub fn descriptor(&self) -> &TypeDescriptor<T> {
        &self.descriptor
    }

    fn gate(&self, checks: &[Check<T>]) -> Enabled {
        checks.iter().fold(Enabled::always(), |gate, check| {
            let subject = self.subject.clone();
            let check = check.clone();
            gate.and(move || subject.read(|t| check(t)))
        })
    }

    fn limit(&self, member: &Resolved<T>) -> ConfigResult<Option<Limit>> {
        Ok(match &member.limit {
            Harvested::None => None,
            Harvested::Fixed(limit) => Some(limit.clone()),
            Harvested::Produced(produce) => {
                Some(Limit::Choice(self.subject.read(|t| produce(t))?))
            }
        })
    }

    fn node(&self, name: &str, member: &Resolved<T>) -> ConfigResult<Node> {
        let enabled = self.gate(&member.checks);
        let node = match &member.kind {
            Kind::Value { typed, get, set } => {
                let (reader, writer) = (self.subject.clone(), self.subject.clone());
                let (get, set) = (get.clone(), set.clone());
                let variable = Variable::new(
                    name,
                    typed.value_type,
                    move || reader.read(|t| get(t)),
                    move |value| writer.with(|t| set(t, value)).and_then(|r| r),
                )
                .with_description(member.description.as_str())
                .with_hint(typed.hint)
                .with_limit(self.limit(member)?)
                .with_choices(typed.choices.clone())
                .with_enabled(enabled);
                Node::Leaf(variable)
            }
            Kind::Action(run) => {
                let subject = self.subject.clone();
                let run = run.clone();
                let variable = Variable::action(name, move || subject.with(|t| run(t)))
                    .with_description(member.description.as_str())
                    .with_enabled(enabled);
                Node::Leaf(variable)
            }
            Kind::Nested(nest) => {
                Node::Composite(nest(&self.subject, name, &member.description, enabled)?)
            }
        };
        Ok(node)
    }
}

impl<T: Configurable> Config for ObjectConfig<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or_else(|| self.descriptor.description())
    }

    fn enabled(&self) -> ConfigResult<bool> {
        self.enabled.evaluate()
    }

    fn wizard(&self) -> bool {
        self.descriptor.wizard()
    }

    fn children(&self) -> ConfigResult<Option<Vec<Node>>> {
        let mut nodes = Vec::new();
        for (name, member) in self.descriptor.members() {
            let node = self.node(name, member)?;
            if node.enabled()? {
                nodes.push(node);
            }
        }

        let descriptor = &self.descriptor;
        nodes.sort_by(|a, b| {
            descriptor
                .priority(a.name())
                .cmp(&descriptor.priority(b.name()))
                .then_with(|| a.name().cmp(b.name()))
        });
        Ok(Some(nodes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::model::descriptor::Descriptor;
    use crate::model::limit::Choice;
    use crate::model::value::Value;

    #[derive(Default)]
    struct Panel {
        level: i32,
        mode: String,
        expert: bool,
        resets: u32,
    }

    impl Configurable for Panel {
        fn describe(desc: &mut Descriptor<Self>) {
            desc.description("Panel settings").order(&["level"]);
            desc.field("level", |p| p.level, |p, v| p.level = v)
                .min(0.0)
                .max(10.0)
                .description("Brightness");
            desc.field("mode", |p| p.mode.clone(), |p, v| p.mode = v);
            desc.field("expert", |p| p.expert, |p, v| p.expert = v);
            desc.action("reset", |p| p.resets += 1);
            desc.choice_for("mode", |p| {
                if p.expert {
                    Choice::strings(&["basic", "advanced"])
                } else {
                    Choice::strings(&["basic"])
                }
            });
            desc.enabled_for(&["reset"], |p| p.expert);
        }
    }

    fn panel() -> (Rc<RefCell<Panel>>, ObjectConfig<Panel>) {
        let root = Rc::new(RefCell::new(Panel::default()));
        let config = ObjectConfig::new("panel", root.clone()).unwrap();
        (root, config)
    }

    fn child(config: &ObjectConfig<Panel>, name: &str) -> Option<Variable> {
        config
            .children()
            .unwrap()
            .unwrap()
            .into_iter()
            .find(|n| n.name() == name)
            .and_then(|n| n.as_variable().cloned())
    }

    #[test]
    fn test_children_ordered_and_gated() {
        let (root, config) = panel();
        let names = |c: &ObjectConfig<Panel>| -> Vec<String> {
            c.children()
                .unwrap()
                .unwrap()
                .iter()
                .map(|n| n.name().to_string())
                .collect()
        };
        assert_eq!(names(&config), ["level", "expert", "mode"]);

        root.borrow_mut().expert = true;
        assert_eq!(names(&config), ["level", "expert", "mode", "reset"]);
        assert_eq!(config.description(), "Panel settings");
    }

    #[test]
    fn test_variables_edit_the_object() {
        let (root, config) = panel();
        let level = child(&config, "level").unwrap();
        assert_eq!(level.description(), "Brightness");
        assert!(level.range().is_some());

        level.set(Value::Int(7)).unwrap();
        assert_eq!(root.borrow().level, 7);
        assert_eq!(level.get().unwrap(), Value::Int(7));
    }

    #[test]
    fn test_wrong_value_kind() {
        let (_, config) = panel();
        let level = child(&config, "level").unwrap();
        let err = level.set(Value::Bool(true)).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    }

    #[test]
    fn test_produced_choice_follows_state() {
        let (root, config) = panel();
        let mode = child(&config, "mode").unwrap();
        assert_eq!(mode.choice().map(Choice::len), Some(1));

        root.borrow_mut().expert = true;
        let mode = child(&config, "mode").unwrap();
        assert_eq!(mode.choice().map(Choice::len), Some(2));
    }

    #[test]
    fn test_action_runs() {
        let (root, config) = panel();
        root.borrow_mut().expert = true;
        let reset = child(&config, "reset").unwrap();
        assert!(reset.is_action());
        reset.set(Value::None).unwrap();
        reset.set(Value::None).unwrap();
        assert_eq!(root.borrow().resets, 2);
    }
}
