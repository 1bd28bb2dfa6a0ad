//! Dynamically typed values flowing through variable getters and setters.
//!
//! A leaf setting is any type implementing [`Scalar`]. The built-in set covers
//! strings, fixed-length char buffers, integers, booleans, floats, single
//! characters, packed colours and every [`ConfigEnum`]. Hosts add their own
//! leaf types by implementing [`Scalar`] with a [`ValueType::Custom`] kind and
//! registering an editor for that kind on the navigator.

use std::fmt;

use super::limit::Choice;
use crate::types::Colour;

// =============================================================================
// ValueType & WidgetHint
// =============================================================================

/// Semantic type of a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Str,
    /// Fixed-length character buffer.
    Chars,
    Int,
    Bool,
    Float,
    Char,
    /// An enumeration, by type name.
    Enum(&'static str),
    /// Invoked rather than edited.
    Action,
    /// A host-defined leaf type, by name.
    Custom(&'static str),
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str => f.write_str("string"),
            Self::Chars => f.write_str("char buffer"),
            Self::Int => f.write_str("int"),
            Self::Bool => f.write_str("bool"),
            Self::Float => f.write_str("float"),
            Self::Char => f.write_str("char"),
            Self::Enum(name) => write!(f, "enum {name}"),
            Self::Action => f.write_str("action"),
            Self::Custom(name) => f.write_str(name),
        }
    }
}

/// Secondary type used only to choose how a value is rendered and edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetHint {
    /// The integer is a packed [`Colour`].
    Colour,
    Custom(&'static str),
}

// =============================================================================
// Value
// =============================================================================

/// One variant of an enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub ordinal: usize,
    pub label: &'static str,
}

/// The payload read from or written to a variable.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// What actions read as.
    #[default]
    None,
    Bool(bool),
    Int(i32),
    Float(f32),
    Char(char),
    Chars(Vec<char>),
    Str(String),
    Enum(EnumValue),
}

impl Value {
    /// Short name of the payload kind, for error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::None => "nothing",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Char(_) => "char",
            Self::Chars(_) => "char buffer",
            Self::Str(_) => "string",
            Self::Enum(_) => "enum",
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Floats, and integers widened to floats.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f32),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_chars(&self) -> Option<&[char]> {
        match self {
            Self::Chars(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Chars(v) => v.iter().try_for_each(|c| write!(f, "{c}")),
            Self::Str(v) => f.write_str(v),
            Self::Enum(v) => f.write_str(v.label),
        }
    }
}

// =============================================================================
// Scalar
// =============================================================================

/// A type that is edited as a single leaf value.
pub trait Scalar: Sized + 'static {
    /// Semantic type reported by variables holding this type.
    fn value_type() -> ValueType;

    fn into_value(self) -> Value;

    /// Convert back, or `None` when the value is of another kind.
    fn from_value(value: Value) -> Option<Self>;

    /// Hint applied when the registration does not give one.
    fn widget_hint() -> Option<WidgetHint> {
        None
    }

    /// The type's own value set, for enumerations.
    fn choices() -> Option<Choice> {
        None
    }
}

impl Scalar for String {
    fn value_type() -> ValueType {
        ValueType::Str
    }

    fn into_value(self) -> Value {
        Value::Str(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s),
            Value::Chars(c) => Some(c.into_iter().collect()),
            _ => None,
        }
    }
}

impl Scalar for Vec<char> {
    fn value_type() -> ValueType {
        ValueType::Chars
    }

    fn into_value(self) -> Value {
        Value::Chars(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Chars(c) => Some(c),
            _ => None,
        }
    }
}

impl Scalar for i32 {
    fn value_type() -> ValueType {
        ValueType::Int
    }

    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_int()
    }
}

impl Scalar for bool {
    fn value_type() -> ValueType {
        ValueType::Bool
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_bool()
    }
}

impl Scalar for f32 {
    fn value_type() -> ValueType {
        ValueType::Float
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_float()
    }
}

impl Scalar for char {
    fn value_type() -> ValueType {
        ValueType::Char
    }

    fn into_value(self) -> Value {
        Value::Char(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_char()
    }
}

/// Colours travel as the packed integer, hinted so they get the colour editor.
impl Scalar for Colour {
    fn value_type() -> ValueType {
        ValueType::Int
    }

    fn into_value(self) -> Value {
        Value::Int(self.0 as i32)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_int().map(|v| Colour(v as u32))
    }

    fn widget_hint() -> Option<WidgetHint> {
        Some(WidgetHint::Colour)
    }
}

// =============================================================================
// ConfigEnum
// =============================================================================

/// An enumeration whose variants are offered as a choice.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Quality { Low, High }
///
/// impl ConfigEnum for Quality {
///     const NAME: &'static str = "Quality";
///     const VARIANTS: &'static [Self] = &[Self::Low, Self::High];
///     fn label(&self) -> &'static str {
///         match self { Self::Low => "Low", Self::High => "High" }
///     }
/// }
/// ```
pub trait ConfigEnum: Copy + PartialEq + 'static {
    const NAME: &'static str;
    const VARIANTS: &'static [Self];

    fn label(&self) -> &'static str;

    fn description(&self) -> Option<&'static str> {
        None
    }
}

impl<E: ConfigEnum> Scalar for E {
    fn value_type() -> ValueType {
        ValueType::Enum(E::NAME)
    }

    fn into_value(self) -> Value {
        let ordinal = E::VARIANTS.iter().position(|v| *v == self).unwrap_or(0);
        Value::Enum(EnumValue {
            ordinal,
            label: self.label(),
        })
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Enum(e) => E::VARIANTS.get(e.ordinal).copied(),
            Value::Str(s) => E::VARIANTS.iter().find(|v| v.label() == s).copied(),
            _ => None,
        }
    }

    fn choices() -> Option<Choice> {
        Some(Choice::of_enum::<E>())
    }
}
