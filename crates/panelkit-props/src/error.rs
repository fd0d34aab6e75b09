use std::fmt;

/// Errors from property registration and access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// Name is empty or exceeds [`PROP_NAME_MAX`](crate::PROP_NAME_MAX) bytes.
    InvalidName { name: String },
    /// A property with this name is already registered.
    DuplicateName { name: String },
    /// No property with this name exists.
    NotFound { name: String },
    /// Value rejected by a range property's bounds.
    OutOfRange {
        name: String,
        value: u32,
        min: u32,
        max: u32,
    },
    /// Value is not one of an enum property's registered variants.
    InvalidEnumValue { name: String, value: u32 },
    /// Malformed registration input (empty variant list, inverted bounds, ...).
    InvalidArgument { reason: String },
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName { name } => {
                write!(f, "invalid property name {name:?}")
            }
            Self::DuplicateName { name } => {
                write!(f, "property {name:?} is already registered")
            }
            Self::NotFound { name } => {
                write!(f, "property {name:?} not found")
            }
            Self::OutOfRange {
                name,
                value,
                min,
                max,
            } => {
                write!(f, "value {value} out of range [{min}, {max}] for property {name:?}")
            }
            Self::InvalidEnumValue { name, value } => {
                write!(f, "value {value} is not a variant of enum property {name:?}")
            }
            Self::InvalidArgument { reason } => {
                write!(f, "invalid argument: {reason}")
            }
        }
    }
}

impl std::error::Error for PropertyError {}
