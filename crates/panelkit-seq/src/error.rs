use std::fmt;
use std::io;

use panelkit_expr::ExprError;
use panelkit_maptbl::MaptblError;

/// Errors from sequence registration, sorting and execution.
#[derive(Debug)]
pub enum SequenceError {
    /// A sequence failed validation (empty name or empty command list).
    InvalidSequence { name: String },
    /// A sequence with this name is already registered.
    DuplicateName { name: String },
    /// No sequence with this name exists.
    NotFound { name: String },
    /// A table packet references a table not present in the deployment.
    UnknownTable { sequence: String, table: String },
    /// The reference graph has a cycle through this sequence.
    CycleDetected { name: String },
    /// A packet's table window does not fit its payload.
    WindowMismatch {
        packet: String,
        offset: usize,
        window: usize,
        payload: usize,
    },
    /// Graph node id outside the node range.
    InvalidArgument { reason: String },
    /// The set must be dependency-sorted before it can be executed.
    NotSorted,
    /// Condition evaluation failed.
    Expr(ExprError),
    /// Table selection or copy failed.
    Maptbl(MaptblError),
    /// The command sink rejected a transmission.
    Io(io::Error),
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSequence { name } => {
                write!(f, "invalid sequence {name:?}")
            }
            Self::DuplicateName { name } => {
                write!(f, "sequence {name:?} is already registered")
            }
            Self::NotFound { name } => {
                write!(f, "sequence {name:?} not found")
            }
            Self::UnknownTable { sequence, table } => {
                write!(f, "sequence {sequence:?} references unknown table {table:?}")
            }
            Self::CycleDetected { name } => {
                write!(f, "sequence dependency cycle through {name:?}")
            }
            Self::WindowMismatch {
                packet,
                offset,
                window,
                payload,
            } => {
                write!(
                    f,
                    "table window {window}@{offset} does not fit packet {packet:?} of {payload} bytes"
                )
            }
            Self::InvalidArgument { reason } => {
                write!(f, "invalid argument: {reason}")
            }
            Self::NotSorted => {
                write!(f, "sequence set has not been dependency-sorted")
            }
            Self::Expr(err) => write!(f, "{err}"),
            Self::Maptbl(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SequenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Expr(err) => Some(err),
            Self::Maptbl(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ExprError> for SequenceError {
    fn from(err: ExprError) -> Self {
        Self::Expr(err)
    }
}

impl From<MaptblError> for SequenceError {
    fn from(err: MaptblError) -> Self {
        Self::Maptbl(err)
    }
}

impl From<io::Error> for SequenceError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
