#![forbid(unsafe_code)]

//! PanelKit public facade crate.
//!
//! This crate provides the stable surface for panel drivers: it re-exports
//! the engine types from the internal crates and adds [`PanelEngine`], the
//! per-panel object tying a property store, map tables, condition
//! functions and sorted command sequences together.

use std::fmt;

// --- Property re-exports ---------------------------------------------------

pub use panelkit_props::{
    EnumVariant, PROP_NAME_MAX, Property, PropertyError, PropertyKind, PropertyRegistry, UpdateFn,
};

// --- Map-table re-exports --------------------------------------------------

pub use panelkit_maptbl::{
    Dimension, GetIdxFn, InitFn, MAX_DIMENSIONS, MapTbl, MapTblBuilder, MaptblError, MaptblSet,
    Position, Shape,
};

// --- Expression re-exports -------------------------------------------------

pub use panelkit_expr::{
    EvalContext, ExprError, ExprNode, ExprToken, ExprTree, FunctionTable, Operand, Operator,
    PanelFn, group, rule,
};

// --- Sequence re-exports ---------------------------------------------------

pub use panelkit_seq::{
    CaptureSink, CommandSink, DepGraph, Packet, SeqEntry, Sequence, SequenceError, SequenceRunner,
    SequenceSet,
};

// --- Engine ---------------------------------------------------------------

mod definition;
mod engine;

pub use definition::{MaptblDef, PanelDefinition, PropertyDef};
pub use engine::PanelEngine;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for panelkit APIs.
#[derive(Debug)]
pub enum Error {
    Property(PropertyError),
    Maptbl(MaptblError),
    Expr(ExprError),
    Sequence(SequenceError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(err) => write!(f, "{err}"),
            Self::Maptbl(err) => write!(f, "{err}"),
            Self::Expr(err) => write!(f, "{err}"),
            Self::Sequence(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Property(err) => Some(err),
            Self::Maptbl(err) => Some(err),
            Self::Expr(err) => Some(err),
            Self::Sequence(err) => Some(err),
        }
    }
}

impl From<PropertyError> for Error {
    fn from(err: PropertyError) -> Self {
        Self::Property(err)
    }
}

impl From<MaptblError> for Error {
    fn from(err: MaptblError) -> Self {
        Self::Maptbl(err)
    }
}

impl From<ExprError> for Error {
    fn from(err: ExprError) -> Self {
        Self::Expr(err)
    }
}

impl From<SequenceError> for Error {
    fn from(err: SequenceError) -> Self {
        Self::Sequence(err)
    }
}

/// Standard result type for panelkit APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CaptureSink, CommandSink, Dimension, EnumVariant, Error, ExprToken, ExprTree, MaptblDef,
        Operator, Packet, PanelDefinition, PanelEngine, PropertyDef, Result, SeqEntry, Sequence,
        Shape, group, rule,
    };

    pub use crate::{expr, maptbl, props, seq};
}

pub use panelkit_expr as expr;
pub use panelkit_maptbl as maptbl;
pub use panelkit_props as props;
pub use panelkit_seq as seq;
