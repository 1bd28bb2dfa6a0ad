//! Registration of configurable types.
//!
//! A type opts in by implementing [`Configurable`], listing its editable
//! members on a [`Descriptor`]. The registration is resolved once per type
//! (and per thread) into a [`TypeDescriptor`]: getter/setter halves are
//! paired, limits are harvested from markers and every ambiguity is reported
//! before any tree is built.
//!
//! # Example
//!
//! ```ignore
//! impl Configurable for Display {
//!     fn describe(desc: &mut Descriptor<Self>) {
//!         desc.description("Screen settings").order(&["width", "height"]);
//!         desc.field("width", |d| d.width, |d, v| d.width = v).min(320.0).max(3840.0);
//!         desc.getter("scale", |d| d.scale()).description("UI scale");
//!         desc.setter("scale", |d, v| d.set_scale(v));
//!         desc.action("reset", |d| *d = Display::default());
//!         desc.nested("colours", |d| &d.colours, |d| &mut d.colours);
//!         desc.enabled_for(&["scale"], |d| d.width > 640);
//!     }
//! }
//! ```

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use super::config::Config;
use super::enabled::Enabled;
use super::harvest::{harvest_limit, Harvested, Markers};
use super::limit::Choice;
use super::object::ObjectConfig;
use super::subject::{Lens, Subject};
use super::value::{Scalar, Value, ValueType, WidgetHint};
use crate::error::{ConfigError, ConfigResult};

/// A type whose members can be presented as a settings tree.
pub trait Configurable: Sized + 'static {
    /// Register the type's members and markers.
    fn describe(desc: &mut Descriptor<Self>);
}

pub(crate) type Get<T> = Rc<dyn Fn(&T) -> Value>;
pub(crate) type Set<T> = Rc<dyn Fn(&mut T, Value) -> ConfigResult<()>>;
pub(crate) type Run<T> = Rc<dyn Fn(&mut T)>;
pub(crate) type Produce<T> = Rc<dyn Fn(&T) -> Choice>;
pub(crate) type Check<T> = Rc<dyn Fn(&T) -> bool>;
pub(crate) type Nest<T> =
    Rc<dyn Fn(&Subject<T>, &str, &str, Enabled) -> ConfigResult<Rc<dyn Config>>>;

/// What a scalar type says about itself.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Typed {
    pub(crate) value_type: ValueType,
    pub(crate) hint: Option<WidgetHint>,
    pub(crate) choices: Option<Choice>,
}

impl Typed {
    fn of<V: Scalar>() -> Self {
        Self {
            value_type: V::value_type(),
            hint: V::widget_hint(),
            choices: V::choices(),
        }
    }
}

// =============================================================================
// Descriptor (registration side)
// =============================================================================

enum Entry<T> {
    Field { typed: Typed, get: Get<T>, set: Set<T> },
    Getter { typed: Typed, get: Get<T> },
    Setter { typed: Typed, set: Set<T> },
    Action(Run<T>),
    Nested { nest: Nest<T>, validate: fn() -> ConfigResult<()> },
}

struct Registered<T> {
    name: String,
    markers: Markers,
    entry: Entry<T>,
}

/// Collects a type's members during [`Configurable::describe`].
pub struct Descriptor<T> {
    owner: String,
    description: String,
    wizard: bool,
    order: Vec<String>,
    entries: Vec<Registered<T>>,
    producers: Vec<(String, Produce<T>)>,
    checks: Vec<(String, Check<T>)>,
}

/// Marker builder for one registered member.
pub struct Member<'a> {
    markers: &'a mut Markers,
}

impl Member<'_> {
    pub fn description(self, text: impl Into<String>) -> Self {
        self.markers.description = Some(text.into());
        self
    }

    pub fn hint(self, hint: WidgetHint) -> Self {
        self.markers.hint = Some(hint);
        self
    }

    pub fn min(self, minimum: f32) -> Self {
        self.markers.minimums.push(minimum);
        self
    }

    pub fn max(self, maximum: f32) -> Self {
        self.markers.maximums.push(maximum);
        self
    }

    pub fn decimals(self, places: u32) -> Self {
        self.markers.decimals.push(places);
        self
    }

    /// Offer exactly these integers.
    pub fn choice_of_ints(self, values: &[i32]) -> Self {
        self.choices(Choice::ints(values))
    }

    /// Offer exactly these strings.
    pub fn choice_of_strings<S: AsRef<str>>(self, values: &[S]) -> Self {
        self.choices(Choice::strings(values))
    }

    pub fn choices(self, choice: Choice) -> Self {
        self.markers.choice_sets.push(choice);
        self
    }

    /// Free-form marker for host-registered harvesters.
    pub fn tag(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.markers.tags.push((key.into(), value.into()));
        self
    }
}

fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

fn getter<T: 'static, V: Scalar>(get: impl Fn(&T) -> V + 'static) -> Get<T> {
    Rc::new(move |t: &T| get(t).into_value())
}

fn setter<T: 'static, V: Scalar>(name: &str, set: impl Fn(&mut T, V) + 'static) -> Set<T> {
    let member = name.to_string();
    Rc::new(move |t: &mut T, value: Value| -> ConfigResult<()> {
        let found = value.kind();
        let v = V::from_value(value).ok_or_else(|| ConfigError::TypeMismatch {
            member: member.clone(),
            expected: V::value_type().to_string(),
            found: found.to_string(),
        })?;
        set(t, v);
        Ok(())
    })
}

/// Resolve a nested type eagerly. A type already being resolved further up
/// (a recursive structure) is checked when its own resolution finishes.
fn validate<U: Configurable>() -> ConfigResult<()> {
    let id = TypeId::of::<U>();
    if RESOLVING.with(|r| r.borrow().contains(&id)) {
        return Ok(());
    }
    TypeDescriptor::<U>::resolved().map(|_| ())
}

impl<T: Configurable> Descriptor<T> {
    fn new() -> Self {
        Self {
            owner: short_type_name::<T>(),
            description: String::new(),
            wizard: false,
            order: Vec::new(),
            entries: Vec::new(),
            producers: Vec::new(),
            checks: Vec::new(),
        }
    }

    fn push(&mut self, name: &str, entry: Entry<T>) -> Member<'_> {
        let index = self.entries.len();
        self.entries.push(Registered {
            name: name.to_string(),
            markers: Markers::default(),
            entry,
        });
        Member {
            markers: &mut self.entries[index].markers,
        }
    }

    /// Description shown for composites of this type.
    pub fn description(&mut self, text: impl Into<String>) -> &mut Self {
        self.description = text.into();
        self
    }

    /// Accepting an edit advances to the next sibling.
    pub fn wizard(&mut self) -> &mut Self {
        self.wizard = true;
        self
    }

    /// Members listed here come first, in this order.
    pub fn order(&mut self, names: &[&str]) -> &mut Self {
        self.order = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// A directly readable and writable value.
    pub fn field<V: Scalar>(
        &mut self,
        name: &str,
        get: impl Fn(&T) -> V + 'static,
        set: impl Fn(&mut T, V) + 'static,
    ) -> Member<'_> {
        let entry = Entry::Field {
            typed: Typed::of::<V>(),
            get: getter(get),
            set: setter(name, set),
        };
        self.push(name, entry)
    }

    /// The reading half of an accessor pair, linked to its setter by name.
    pub fn getter<V: Scalar>(&mut self, name: &str, get: impl Fn(&T) -> V + 'static) -> Member<'_> {
        let entry = Entry::Getter {
            typed: Typed::of::<V>(),
            get: getter(get),
        };
        self.push(name, entry)
    }

    /// The writing half of an accessor pair, linked to its getter by name.
    pub fn setter<V: Scalar>(&mut self, name: &str, set: impl Fn(&mut T, V) + 'static) -> Member<'_> {
        let entry = Entry::Setter {
            typed: Typed::of::<V>(),
            set: setter(name, set),
        };
        self.push(name, entry)
    }

    /// A method invoked from the tree.
    pub fn action(&mut self, name: &str, run: impl Fn(&mut T) + 'static) -> Member<'_> {
        self.push(name, Entry::Action(Rc::new(run)))
    }

    /// A member that is itself configurable, presented as a nested composite.
    ///
    /// `get` serves reads and enable checks, `get_mut` serves writes and
    /// actions.
    pub fn nested<U: Configurable>(
        &mut self,
        name: &str,
        get: impl Fn(&T) -> &U + 'static,
        get_mut: impl Fn(&mut T) -> &mut U + 'static,
    ) -> Member<'_> {
        let lens = Lens::new(get, get_mut);
        let nest: Nest<T> = Rc::new(
            move |subject: &Subject<T>,
                  name: &str,
                  description: &str,
                  enabled: Enabled|
                  -> ConfigResult<Rc<dyn Config>> {
                let part = subject.project(name, lens.clone());
                let config = ObjectConfig::<U>::with_subject(name, part, enabled)?
                    .with_description(description);
                Ok(Rc::new(config))
            },
        );
        self.push(
            name,
            Entry::Nested {
                nest,
                validate: validate::<U>,
            },
        )
    }

    /// Produce the choice set for `name` each time its node is built.
    pub fn choice_for(&mut self, name: &str, produce: impl Fn(&T) -> Choice + 'static) -> &mut Self {
        self.producers.push((name.to_string(), Rc::new(produce)));
        self
    }

    /// Show the named members only while `check` holds.
    pub fn enabled_for(&mut self, names: &[&str], check: impl Fn(&T) -> bool + 'static) -> &mut Self {
        let check: Check<T> = Rc::new(check);
        for name in names {
            self.checks.push((name.to_string(), check.clone()));
        }
        self
    }

    fn resolve(self) -> ConfigResult<TypeDescriptor<T>> {
        let Descriptor {
            owner,
            description,
            wizard,
            order,
            entries,
            producers,
            checks,
        } = self;

        let duplicate = |member: &str| ConfigError::DuplicateMember {
            owner: owner.clone(),
            member: member.to_string(),
        };

        type Half<X> = Option<(Markers, Typed, X)>;
        let mut halves: BTreeMap<String, (Half<Get<T>>, Half<Set<T>>)> = BTreeMap::new();
        let mut found: BTreeMap<String, (Markers, Kind<T>)> = BTreeMap::new();

        for Registered {
            name,
            markers,
            entry,
        } in entries
        {
            let kind = match entry {
                Entry::Getter { typed, get } => {
                    let slot = &mut halves.entry(name.clone()).or_default().0;
                    if slot.is_some() {
                        return Err(duplicate(&name));
                    }
                    *slot = Some((markers, typed, get));
                    continue;
                }
                Entry::Setter { typed, set } => {
                    let slot = &mut halves.entry(name.clone()).or_default().1;
                    if slot.is_some() {
                        return Err(duplicate(&name));
                    }
                    *slot = Some((markers, typed, set));
                    continue;
                }
                Entry::Field { typed, get, set } => Kind::Value { typed, get, set },
                Entry::Action(run) => Kind::Action(run),
                Entry::Nested { nest, validate } => {
                    validate()?;
                    Kind::Nested(nest)
                }
            };
            if found.insert(name.clone(), (markers, kind)).is_some() {
                return Err(duplicate(&name));
            }
        }

        for (name, pair) in halves {
            match pair {
                (Some((got_markers, got_type, get)), Some((set_markers, set_type, set))) => {
                    let mismatch = |marker: &'static str| ConfigError::MismatchedAccessors {
                        owner: owner.clone(),
                        member: name.clone(),
                        marker,
                    };
                    if got_type.value_type != set_type.value_type {
                        return Err(mismatch("value type"));
                    }
                    let markers = got_markers.merge(set_markers).map_err(mismatch)?;
                    let kind = Kind::Value {
                        typed: set_type,
                        get,
                        set,
                    };
                    if found.insert(name.clone(), (markers, kind)).is_some() {
                        return Err(duplicate(&name));
                    }
                }
                (Some(_), None) | (None, Some(_)) => {
                    tracing::debug!(owner = %owner, member = %name, "dropping unpaired accessor");
                }
                (None, None) => {}
            }
        }

        for name in producers.iter().map(|(n, _)| n).chain(checks.iter().map(|(n, _)| n)) {
            if !found.contains_key(name) {
                tracing::warn!(owner = %owner, member = %name, "marker names an unknown member");
            }
        }

        let mut members = BTreeMap::new();
        for (name, (markers, kind)) in found {
            let own: Vec<Produce<T>> = producers
                .iter()
                .filter(|(n, _)| *n == name)
                .map(|(_, p)| p.clone())
                .collect();
            let (kind, limit) = match kind {
                Kind::Value {
                    mut typed,
                    get,
                    set,
                } => {
                    typed.hint = markers.hint.or(typed.hint);
                    let limit = harvest_limit(&owner, &name, &markers, &own)?;
                    (Kind::Value { typed, get, set }, limit)
                }
                other => (other, Harvested::None),
            };
            let member_checks = checks
                .iter()
                .filter(|(n, _)| *n == name)
                .map(|(_, c)| c.clone())
                .collect();

            members.insert(
                name,
                Resolved {
                    description: markers.description.unwrap_or_default(),
                    kind,
                    limit,
                    checks: member_checks,
                },
            );
        }

        tracing::debug!(owner = %owner, members = members.len(), "resolved configurable type");
        Ok(TypeDescriptor {
            owner,
            description,
            wizard,
            order,
            members,
        })
    }
}

// =============================================================================
// TypeDescriptor (resolved side)
// =============================================================================

pub(crate) enum Kind<T> {
    Value { typed: Typed, get: Get<T>, set: Set<T> },
    Action(Run<T>),
    Nested(Nest<T>),
}

pub(crate) struct Resolved<T> {
    pub(crate) description: String,
    pub(crate) kind: Kind<T>,
    pub(crate) limit: Harvested<Produce<T>>,
    pub(crate) checks: Vec<Check<T>>,
}

/// A type's members, keyed by name, with limits and gates resolved.
pub struct TypeDescriptor<T> {
    owner: String,
    description: String,
    wizard: bool,
    order: Vec<String>,
    members: BTreeMap<String, Resolved<T>>,
}

thread_local! {
    static RESOLVED: RefCell<HashMap<TypeId, Rc<dyn Any>>> = RefCell::new(HashMap::new());
    static RESOLVING: RefCell<Vec<TypeId>> = const { RefCell::new(Vec::new()) };
}

impl<T: Configurable> TypeDescriptor<T> {
    /// The resolved descriptor for `T`, registering it on first use.
    pub fn resolved() -> ConfigResult<Rc<Self>> {
        let id = TypeId::of::<T>();
        let cached = RESOLVED.with(|r| r.borrow().get(&id).cloned());
        if let Some(found) = cached.and_then(|any| any.downcast::<Self>().ok()) {
            return Ok(found);
        }

        let mut desc = Descriptor::new();
        T::describe(&mut desc);
        RESOLVING.with(|r| r.borrow_mut().push(id));
        let outcome = desc.resolve();
        RESOLVING.with(|r| r.borrow_mut().retain(|t| *t != id));
        let resolved = Rc::new(outcome?);
        RESOLVED.with(|r| r.borrow_mut().insert(id, resolved.clone() as Rc<dyn Any>));
        Ok(resolved)
    }
}

impl<T> TypeDescriptor<T> {
    /// Short name of the described type.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn wizard(&self) -> bool {
        self.wizard
    }

    /// Registered member names, alphabetically.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    pub(crate) fn members(&self) -> impl Iterator<Item = (&String, &Resolved<T>)> {
        self.members.iter()
    }

    /// Position in the declared order; unlisted names sort last.
    pub fn priority(&self, name: &str) -> usize {
        self.order
            .iter()
            .position(|n| n == name)
            .unwrap_or(usize::MAX)
    }
}
