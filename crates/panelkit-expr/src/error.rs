use std::fmt;

/// Errors from expression compilation, binding and evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// The token stream is empty.
    Empty,
    /// An operator has no operand where one is required.
    MissingOperand { position: usize },
    /// Two operands (or an operand and a group) with no operator between.
    MissingOperator { position: usize },
    /// A `From` group bracket was never closed.
    UnmatchedFrom { position: usize },
    /// A `To` group bracket with no matching `From`.
    UnmatchedTo { position: usize },
    /// A `From`/`To` pair encloses nothing.
    EmptyGroup { position: usize },
    /// A property operand does not name a registered property.
    UnknownProperty { name: String },
    /// A function operand does not name a registered function.
    UnknownFunction { name: String },
    /// A function with this name is already registered.
    DuplicateFunction { name: String },
    /// Division or divisibility test with a zero right-hand side.
    DivideByZero,
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty expression"),
            Self::MissingOperand { position } => {
                write!(f, "operator at token {position} is missing an operand")
            }
            Self::MissingOperator { position } => {
                write!(f, "missing operator before token {position}")
            }
            Self::UnmatchedFrom { position } => {
                write!(f, "unclosed group opened at token {position}")
            }
            Self::UnmatchedTo { position } => {
                write!(f, "group closed at token {position} was never opened")
            }
            Self::EmptyGroup { position } => {
                write!(f, "empty group at token {position}")
            }
            Self::UnknownProperty { name } => {
                write!(f, "expression references unknown property {name:?}")
            }
            Self::UnknownFunction { name } => {
                write!(f, "expression references unknown function {name:?}")
            }
            Self::DuplicateFunction { name } => {
                write!(f, "function {name:?} is already registered")
            }
            Self::DivideByZero => write!(f, "division by zero"),
        }
    }
}

impl std::error::Error for ExprError {}
