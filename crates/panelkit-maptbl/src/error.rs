use std::fmt;

use panelkit_props::PropertyError;

/// Errors from map-table construction and addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaptblError {
    /// A per-dimension index exceeds that dimension's extent, or a computed
    /// window does not fit in the backing buffer. Never wraps.
    OutOfBounds {
        table: String,
        index: usize,
        bound: usize,
    },
    /// Source/destination length disagrees with what the shape requires.
    SizeMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },
    /// Bulk copy between tables of different shapes.
    ShapeMismatch { dst: String, src: String },
    /// Malformed shape or table parameters.
    InvalidArgument { reason: String },
    /// The table has not been initialized yet.
    NotInitialized { table: String },
    /// `init()` was called on a table with no init hook.
    NoInitCallback { table: String },
    /// The init hook reported failure.
    InitFailed { table: String, reason: String },
    /// A table with this name is already registered.
    DuplicateName { name: String },
    /// No table with this name exists.
    NotFound { name: String },
    /// A per-dimension property binding failed to resolve.
    Property(PropertyError),
}

impl fmt::Display for MaptblError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                table,
                index,
                bound,
            } => {
                write!(f, "index {index} out of bounds {bound} in maptbl {table:?}")
            }
            Self::SizeMismatch {
                table,
                expected,
                actual,
            } => {
                write!(f, "size mismatch in maptbl {table:?}: expected {expected}, got {actual}")
            }
            Self::ShapeMismatch { dst, src } => {
                write!(f, "maptbl {dst:?} and {src:?} have different shapes")
            }
            Self::InvalidArgument { reason } => {
                write!(f, "invalid argument: {reason}")
            }
            Self::NotInitialized { table } => {
                write!(f, "maptbl {table:?} is not initialized")
            }
            Self::NoInitCallback { table } => {
                write!(f, "maptbl {table:?} has no init hook")
            }
            Self::InitFailed { table, reason } => {
                write!(f, "maptbl {table:?} init hook failed: {reason}")
            }
            Self::DuplicateName { name } => {
                write!(f, "maptbl {name:?} is already registered")
            }
            Self::NotFound { name } => {
                write!(f, "maptbl {name:?} not found")
            }
            Self::Property(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for MaptblError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Property(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PropertyError> for MaptblError {
    fn from(err: PropertyError) -> Self {
        Self::Property(err)
    }
}
