#![forbid(unsafe_code)]

//! Compiled condition expressions over panel properties.
//!
//! Panel command sequences gate blocks of commands on live state: "send
//! this timing packet only at 120Hz in high-speed mode". Those conditions
//! are written as infix token streams over property reads, literals and
//! registered predicate functions, compiled once into a binary tree via
//! shunting-yard, and evaluated as often as needed.
//!
//! Compilation is fail-closed: a malformed stream (dangling operator,
//! unbalanced group, empty group) is rejected with a position before any
//! tree is built. [`ExprTree::bind`] then checks every referenced name
//! against the deployment at definition-load time.
//!
//! # Example
//!
//! ```
//! use panelkit_expr::{EvalContext, ExprTree, FunctionTable, Operator, rule};
//! use panelkit_props::PropertyRegistry;
//!
//! let mut props = PropertyRegistry::new();
//! props.add_range("panel_refresh_rate", 120, 0, 120).unwrap();
//! let funcs = FunctionTable::new();
//!
//! let tree = ExprTree::compile(&rule("panel_refresh_rate", Operator::Ge, 96)).unwrap();
//! tree.bind(&props, &funcs).unwrap();
//! assert!(tree.is_true(&EvalContext { props: &props, funcs: &funcs }).unwrap());
//! ```

mod compile;
mod error;
mod func;
mod token;
mod tree;

pub use compile::compile;
pub use error::ExprError;
pub use func::{EvalContext, FunctionTable, PanelFn};
pub use token::{ExprToken, Operand, Operator, group, rule};
pub use tree::{ExprNode, ExprTree};
