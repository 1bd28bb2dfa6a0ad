//! Descriptor model - turning objects into navigable settings trees.
//!
//! A settings tree is made of [`Config`] nodes. Leaves are [`Variable`]s:
//! typed values with an optional [`Limit`] and an [`Enabled`] gate.
//! Composites list their children on demand. [`ObjectConfig`] is the composite
//! derived from any [`Configurable`] type.
//!
//! # Example
//!
//! ```ignore
//! let state = Rc::new(RefCell::new(Settings::default()));
//! let root = ObjectConfig::new("settings", state.clone())?;
//! println!("{}", root.tree("")?);
//! ```

mod config;
mod descriptor;
mod enabled;
mod harvest;
mod limit;
mod object;
mod subject;
mod value;
mod variable;

pub use config::{Config, Node};
pub use descriptor::{Configurable, Descriptor, Member, TypeDescriptor};
pub use enabled::Enabled;
pub use harvest::{ambiguous, register_harvester, ChoiceOfHarvester, LimitHarvester, Markers, RangeHarvester};
pub use limit::{Choice, Limit, Range};
pub use object::ObjectConfig;
pub use subject::{Lens, Subject};
pub use value::{ConfigEnum, EnumValue, Scalar, Value, ValueType, WidgetHint};
pub use variable::Variable;
