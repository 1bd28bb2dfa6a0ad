//! Error types.
//!
//! Configuration mistakes and access failures are unrecoverable: they surface
//! when a type is registered, when a tree node is read or written, or when an
//! editor is chosen for a variable. Out-of-range input is never an error, it
//! is clamped.

/// Errors raised by the descriptor model and the widget engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// More than one limit was declared for a member
    #[error("Ambiguous limit on {owner}.{member}: {detail}")]
    AmbiguousLimit {
        owner: String,
        member: String,
        detail: String,
    },

    /// A getter and setter registered under one name disagree on a marker
    #[error("Linked accessors {owner}.{member} disagree on {marker}")]
    MismatchedAccessors {
        owner: String,
        member: String,
        marker: &'static str,
    },

    /// The same name was registered twice
    #[error("Member {member} registered more than once on {owner}")]
    DuplicateMember { owner: String, member: String },

    /// Range bounds are the wrong way round
    #[error("Invalid range: minimum {minimum} exceeds maximum {maximum}")]
    InvalidRange { minimum: f32, maximum: f32 },

    /// A numeric editor needs both bounds
    #[error("Variable {member} has no closed range to edit within")]
    OpenRange { member: String },

    /// A value of the wrong kind was handed to a setter
    #[error("Variable {member} expects {expected}, got {found}")]
    TypeMismatch {
        member: String,
        expected: String,
        found: String,
    },

    /// No editor handles the variable's type
    #[error("No editor for {member} of type {value_type}")]
    UnsupportedType { member: String, value_type: String },

    /// The backing object is already borrowed
    #[error("Backing object of {member} is not accessible")]
    Inaccessible { member: String },

    /// An edit buffer did not parse back into a number
    #[error("Failed to parse {text:?} as a number")]
    InvalidNumber { text: String },

    /// A colour string was not in RRR:GGG:BBB:AAA form
    #[error("Failed to parse {text:?} as RRR:GGG:BBB:AAA")]
    InvalidColour { text: String },
}

/// Result alias used throughout the crate.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::AmbiguousLimit {
            owner: "Root".into(),
            member: "count".into(),
            detail: "range and choice".into(),
        };
        assert_eq!(err.to_string(), "Ambiguous limit on Root.count: range and choice");

        let err = ConfigError::InvalidColour { text: "nope".into() };
        assert_eq!(err.to_string(), "Failed to parse \"nope\" as RRR:GGG:BBB:AAA");
    }
}
