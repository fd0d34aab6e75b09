use std::fmt;
use std::sync::Arc;

use panelkit_props::PropertyRegistry;
use rustc_hash::FxHashMap;

use crate::error::ExprError;

/// Everything an expression can see while evaluating: the live property
/// store and the registered functions.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    pub props: &'a PropertyRegistry,
    pub funcs: &'a FunctionTable,
}

impl fmt::Debug for EvalContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalContext")
            .field("props", &self.props.len())
            .field("funcs", &self.funcs.len())
            .finish()
    }
}

/// A named nullary predicate usable as an expression leaf.
///
/// Must be pure: it reads the context and returns an integer (0/1 for
/// boolean predicates).
pub type PanelFn = Arc<dyn Fn(&EvalContext<'_>) -> i32 + Send + Sync>;

/// Name-keyed registry of [`PanelFn`] plugins.
///
/// The function-as-expression-leaf mechanism: chip-specific predicates
/// ("is this the first backlight write?") register here and conditions
/// reference them by name.
#[derive(Clone, Default)]
pub struct FunctionTable {
    funcs: FxHashMap<String, PanelFn>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function. Names are unique.
    pub fn register(&mut self, name: &str, func: PanelFn) -> Result<(), ExprError> {
        if self.funcs.contains_key(name) {
            return Err(ExprError::DuplicateFunction {
                name: name.to_string(),
            });
        }
        self.funcs.insert(name.to_string(), func);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PanelFn> {
        self.funcs.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.funcs.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.funcs.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("FunctionTable").field("funcs", &names).finish()
    }
}
