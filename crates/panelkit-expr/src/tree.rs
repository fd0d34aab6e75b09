use panelkit_props::PropertyRegistry;

use crate::error::ExprError;
use crate::func::{EvalContext, FunctionTable};
use crate::token::{ExprToken, Operand, Operator};

/// One node of a compiled expression.
///
/// Nodes are exclusively owned by their parent; trees are finite and
/// acyclic by construction, so teardown is plain recursive drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprNode {
    Operand(Operand),
    Unary {
        op: Operator,
        child: Box<ExprNode>,
    },
    Binary {
        op: Operator,
        lhs: Box<ExprNode>,
        rhs: Box<ExprNode>,
    },
}

/// A compiled, immutable expression over panel state.
///
/// Built once at definition time via [`ExprTree::compile`], checked against
/// the deployment with [`ExprTree::bind`], then evaluated any number of
/// times. The tree itself never changes after compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprTree {
    root: ExprNode,
}

impl ExprTree {
    /// Compile an infix token stream. See [`crate::compile`].
    pub fn compile(tokens: &[ExprToken]) -> Result<Self, ExprError> {
        crate::compile::compile(tokens)
    }

    pub(crate) fn from_root(root: ExprNode) -> Self {
        Self { root }
    }

    #[inline]
    pub fn root(&self) -> &ExprNode {
        &self.root
    }

    /// Check that every property and function operand resolves against the
    /// deployment. Run once at definition-load time so that a name typo is
    /// a load failure, not a surprise at evaluation time.
    pub fn bind(
        &self,
        props: &PropertyRegistry,
        funcs: &FunctionTable,
    ) -> Result<(), ExprError> {
        bind_node(&self.root, props, funcs)
    }

    /// Evaluate against current panel state. Booleans are 0/1.
    pub fn eval(&self, ctx: &EvalContext<'_>) -> Result<i32, ExprError> {
        eval_node(&self.root, ctx)
    }

    /// Evaluate as a condition: any nonzero result is true.
    pub fn is_true(&self, ctx: &EvalContext<'_>) -> Result<bool, ExprError> {
        Ok(self.eval(ctx)? != 0)
    }
}

fn bind_node(
    node: &ExprNode,
    props: &PropertyRegistry,
    funcs: &FunctionTable,
) -> Result<(), ExprError> {
    match node {
        ExprNode::Operand(Operand::Literal(_)) => Ok(()),
        ExprNode::Operand(Operand::Property(name)) => {
            if props.contains(name) {
                Ok(())
            } else {
                Err(ExprError::UnknownProperty { name: name.clone() })
            }
        }
        ExprNode::Operand(Operand::Func(name)) => {
            if funcs.contains(name) {
                Ok(())
            } else {
                Err(ExprError::UnknownFunction { name: name.clone() })
            }
        }
        ExprNode::Unary { child, .. } => bind_node(child, props, funcs),
        ExprNode::Binary { lhs, rhs, .. } => {
            bind_node(lhs, props, funcs)?;
            bind_node(rhs, props, funcs)
        }
    }
}

fn eval_node(node: &ExprNode, ctx: &EvalContext<'_>) -> Result<i32, ExprError> {
    match node {
        ExprNode::Operand(Operand::Literal(value)) => Ok(*value as i32),
        ExprNode::Operand(Operand::Property(name)) => ctx
            .props
            .get_value(name)
            .map(|v| v as i32)
            .map_err(|_| ExprError::UnknownProperty { name: name.clone() }),
        ExprNode::Operand(Operand::Func(name)) => {
            let func = ctx
                .funcs
                .get(name)
                .ok_or_else(|| ExprError::UnknownFunction { name: name.clone() })?;
            Ok(func(ctx))
        }
        ExprNode::Unary { op, child } => {
            debug_assert!(op.is_unary());
            let value = eval_node(child, ctx)?;
            Ok(i32::from(value == 0))
        }
        ExprNode::Binary { op, lhs, rhs } => {
            // Both sides always evaluate; operands are pure by contract, so
            // short-circuiting would be unobservable anyway.
            let l = eval_node(lhs, ctx)?;
            let r = eval_node(rhs, ctx)?;
            apply_binary(*op, l, r)
        }
    }
}

fn apply_binary(op: Operator, l: i32, r: i32) -> Result<i32, ExprError> {
    let value = match op {
        Operator::Or => i32::from(l != 0 || r != 0),
        Operator::And => i32::from(l != 0 && r != 0),
        Operator::Eq => i32::from(l == r),
        Operator::Ne => i32::from(l != r),
        Operator::Lt => i32::from(l < r),
        Operator::Le => i32::from(l <= r),
        Operator::Gt => i32::from(l > r),
        Operator::Ge => i32::from(l >= r),
        Operator::BitOr => l | r,
        Operator::BitAnd => l & r,
        Operator::Mod => {
            // Divisibility test: true when l is an exact multiple of r.
            if r == 0 {
                return Err(ExprError::DivideByZero);
            }
            i32::from(l.wrapping_rem(r) == 0)
        }
        Operator::Mul => l.wrapping_mul(r),
        Operator::Div => {
            if r == 0 {
                return Err(ExprError::DivideByZero);
            }
            l.wrapping_div(r)
        }
        Operator::Add => l.wrapping_add(r),
        Operator::Sub => l.wrapping_sub(r),
        Operator::Not => {
            debug_assert!(false, "unary operator in binary node");
            return Err(ExprError::MissingOperand { position: 0 });
        }
    };
    Ok(value)
}
