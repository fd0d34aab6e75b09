//! Infix validation, shunting-yard lowering, and tree construction.
//!
//! Compilation is staged: the token stream is validated as a whole before
//! any lowering happens, so a malformed expression fails with a precise
//! position and no tree is ever built from partial input.

use smallvec::SmallVec;
use tracing::debug;

use crate::error::ExprError;
use crate::token::{ExprToken, Operand, Operator};
use crate::tree::{ExprNode, ExprTree};

/// Compile an infix token stream into an evaluable tree.
pub fn compile(tokens: &[ExprToken]) -> Result<ExprTree, ExprError> {
    validate(tokens).inspect_err(|err| {
        debug!(%err, tokens = tokens.len(), "expression rejected");
    })?;
    let postfix = to_postfix(tokens);
    let root = build_tree(postfix)?;
    Ok(ExprTree::from_root(root))
}

/// Check the infix shape: operators have operands on the proper sides and
/// `From`/`To` brackets balance around non-empty groups.
fn validate(tokens: &[ExprToken]) -> Result<(), ExprError> {
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }

    // Positions of currently-open From brackets, for error reporting.
    let mut open: SmallVec<[usize; 8]> = SmallVec::new();
    let mut expect_operand = true;

    for (i, token) in tokens.iter().enumerate() {
        match token {
            ExprToken::Operand(_) => {
                if !expect_operand {
                    return Err(ExprError::MissingOperator { position: i });
                }
                expect_operand = false;
            }
            ExprToken::Operator(op) if op.is_unary() => {
                if !expect_operand {
                    return Err(ExprError::MissingOperator { position: i });
                }
            }
            ExprToken::Operator(_) => {
                if expect_operand {
                    return Err(ExprError::MissingOperand { position: i });
                }
                expect_operand = true;
            }
            ExprToken::From => {
                if !expect_operand {
                    return Err(ExprError::MissingOperator { position: i });
                }
                open.push(i);
            }
            ExprToken::To => {
                if open.pop().is_none() {
                    return Err(ExprError::UnmatchedTo { position: i });
                }
                if expect_operand {
                    // `From To` is an empty group; `op To` lacks an operand.
                    if matches!(tokens[i - 1], ExprToken::From) {
                        return Err(ExprError::EmptyGroup { position: i });
                    }
                    return Err(ExprError::MissingOperand { position: i });
                }
            }
        }
    }

    if let Some(position) = open.pop() {
        return Err(ExprError::UnmatchedFrom { position });
    }
    if expect_operand {
        return Err(ExprError::MissingOperand {
            position: tokens.len(),
        });
    }
    Ok(())
}

enum StackItem {
    Op(Operator),
    GroupMark,
}

enum PostfixItem {
    Operand(Operand),
    Operator(Operator),
}

/// Classic shunting-yard. `From`/`To` are consumed here and never emitted.
fn to_postfix(tokens: &[ExprToken]) -> Vec<PostfixItem> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: SmallVec<[StackItem; 8]> = SmallVec::new();

    for token in tokens {
        match token {
            ExprToken::Operand(operand) => output.push(PostfixItem::Operand(operand.clone())),
            ExprToken::Operator(op) => {
                while let Some(StackItem::Op(top)) = stack.last() {
                    // Left-associative operators also pop equal precedence;
                    // the unary Not stacks up so it binds right-to-left.
                    let pops = top.precedence() > op.precedence()
                        || (top.precedence() == op.precedence() && !op.is_unary());
                    if !pops {
                        break;
                    }
                    output.push(PostfixItem::Operator(*top));
                    stack.pop();
                }
                stack.push(StackItem::Op(*op));
            }
            ExprToken::From => stack.push(StackItem::GroupMark),
            ExprToken::To => {
                while let Some(item) = stack.pop() {
                    match item {
                        StackItem::Op(op) => output.push(PostfixItem::Operator(op)),
                        StackItem::GroupMark => break,
                    }
                }
            }
        }
    }

    while let Some(item) = stack.pop() {
        if let StackItem::Op(op) = item {
            output.push(PostfixItem::Operator(op));
        }
    }
    output
}

/// Fold a postfix run into a binary tree.
///
/// Underflows cannot occur on validated input; they are still reported as
/// malformed-expression errors rather than trusted away.
fn build_tree(postfix: Vec<PostfixItem>) -> Result<ExprNode, ExprError> {
    let mut stack: SmallVec<[ExprNode; 8]> = SmallVec::new();

    for (i, item) in postfix.into_iter().enumerate() {
        match item {
            PostfixItem::Operand(operand) => stack.push(ExprNode::Operand(operand)),
            PostfixItem::Operator(op) if op.is_unary() => {
                let child = stack
                    .pop()
                    .ok_or(ExprError::MissingOperand { position: i })?;
                stack.push(ExprNode::Unary {
                    op,
                    child: Box::new(child),
                });
            }
            PostfixItem::Operator(op) => {
                let rhs = stack
                    .pop()
                    .ok_or(ExprError::MissingOperand { position: i })?;
                let lhs = stack
                    .pop()
                    .ok_or(ExprError::MissingOperand { position: i })?;
                stack.push(ExprNode::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                });
            }
        }
    }

    debug_assert!(stack.len() == 1, "validated postfix must fold to one root");
    stack.pop().ok_or(ExprError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{group, rule};

    fn lit(v: u32) -> ExprToken {
        ExprToken::literal(v)
    }

    fn op(o: Operator) -> ExprToken {
        ExprToken::op(o)
    }

    #[test]
    fn single_operand_compiles_to_a_leaf() {
        let tree = compile(&[lit(7)]).unwrap();
        assert_eq!(tree.root(), &ExprNode::Operand(Operand::Literal(7)));
    }

    #[test]
    fn and_binds_tighter_than_or() {
        // a || b && c  =>  Or(a, And(b, c))
        let tree = compile(&[lit(1), op(Operator::Or), lit(2), op(Operator::And), lit(3)]).unwrap();
        let ExprNode::Binary { op: root, lhs, rhs } = tree.root() else {
            panic!("expected binary root");
        };
        assert_eq!(*root, Operator::Or);
        assert_eq!(**lhs, ExprNode::Operand(Operand::Literal(1)));
        assert!(matches!(
            &**rhs,
            ExprNode::Binary {
                op: Operator::And,
                ..
            }
        ));
    }

    #[test]
    fn equal_precedence_is_left_associative() {
        // a - b + c  =>  Add(Sub(a, b), c)
        let tree =
            compile(&[lit(9), op(Operator::Sub), lit(3), op(Operator::Add), lit(1)]).unwrap();
        let ExprNode::Binary { op: root, lhs, .. } = tree.root() else {
            panic!("expected binary root");
        };
        assert_eq!(*root, Operator::Add);
        assert!(matches!(
            &**lhs,
            ExprNode::Binary {
                op: Operator::Sub,
                ..
            }
        ));
    }

    #[test]
    fn grouping_overrides_precedence() {
        // (a || b) && c  =>  And(Or(a, b), c)
        let mut tokens = group([lit(1), op(Operator::Or), lit(2)]);
        tokens.push(op(Operator::And));
        tokens.push(lit(3));
        let tree = compile(&tokens).unwrap();
        let ExprNode::Binary { op: root, lhs, .. } = tree.root() else {
            panic!("expected binary root");
        };
        assert_eq!(*root, Operator::And);
        assert!(matches!(
            &**lhs,
            ExprNode::Binary {
                op: Operator::Or,
                ..
            }
        ));
    }

    #[test]
    fn not_is_right_associative() {
        // !!a  =>  Not(Not(a))
        let tree = compile(&[op(Operator::Not), op(Operator::Not), lit(128)]).unwrap();
        let ExprNode::Unary { child, .. } = tree.root() else {
            panic!("expected unary root");
        };
        assert!(matches!(&**child, ExprNode::Unary { .. }));
    }

    #[test]
    fn not_binds_tighter_than_binary_operators() {
        // !a && b  =>  And(Not(a), b)
        let tree =
            compile(&[op(Operator::Not), lit(0), op(Operator::And), lit(1)]).unwrap();
        let ExprNode::Binary { op: root, lhs, .. } = tree.root() else {
            panic!("expected binary root");
        };
        assert_eq!(*root, Operator::And);
        assert!(matches!(&**lhs, ExprNode::Unary { .. }));
    }

    #[test]
    fn empty_stream_is_rejected() {
        assert_eq!(compile(&[]), Err(ExprError::Empty));
    }

    #[test]
    fn trailing_operator_is_rejected() {
        assert_eq!(
            compile(&[lit(1), op(Operator::And)]),
            Err(ExprError::MissingOperand { position: 2 })
        );
    }

    #[test]
    fn leading_binary_operator_is_rejected() {
        assert_eq!(
            compile(&[op(Operator::And), lit(1)]),
            Err(ExprError::MissingOperand { position: 0 })
        );
    }

    #[test]
    fn adjacent_operands_are_rejected() {
        assert_eq!(
            compile(&[lit(1), lit(2)]),
            Err(ExprError::MissingOperator { position: 1 })
        );
    }

    #[test]
    fn lone_not_is_rejected() {
        assert_eq!(
            compile(&[op(Operator::Not)]),
            Err(ExprError::MissingOperand { position: 1 })
        );
    }

    #[test]
    fn unbalanced_groups_are_rejected() {
        assert_eq!(
            compile(&[ExprToken::From, lit(1)]),
            Err(ExprError::UnmatchedFrom { position: 0 })
        );
        assert_eq!(
            compile(&[lit(1), ExprToken::To]),
            Err(ExprError::UnmatchedTo { position: 1 })
        );
    }

    #[test]
    fn empty_group_is_rejected() {
        assert_eq!(
            compile(&[ExprToken::From, ExprToken::To]),
            Err(ExprError::EmptyGroup { position: 1 })
        );
    }

    #[test]
    fn operator_before_group_close_is_rejected() {
        let tokens = [ExprToken::From, lit(1), op(Operator::And), ExprToken::To];
        assert_eq!(
            compile(&tokens),
            Err(ExprError::MissingOperand { position: 3 })
        );
    }

    #[test]
    fn rule_helper_compiles() {
        let tree = compile(&rule("panel_refresh_rate", Operator::Eq, 120)).unwrap();
        assert!(matches!(tree.root(), ExprNode::Binary { .. }));
    }
}
