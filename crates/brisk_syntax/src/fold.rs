//! Parse-time constant folding.
//!
//! An operator node whose operands are literals is replaced by the literal it evaluates to. Folding runs bottom-up,
//! so by the time the parser folds a node its children are already as reduced as they can get; [`fold`] still
//! loops until [`is_reducible`] is false, which makes it safe on arbitrary trees and idempotent on literals.
//!
//! Numbers follow the `brisk_core` numeric policy. Operand combinations that have no constant meaning (assignment,
//! identifiers, `true + 1`) are left in place for later stages.

use brisk_core::lang::operators::{self, OperatorCategory, OperatorId};
use brisk_core::{BitwiseOp, ComparisonOp, Number, NumericError, NumericOp};

use crate::ast::{Literal, Node, NodeKind, Span};
use crate::diagnostics::CompileError;

/// Fold `node` until nothing reducible is left.
///
/// ## Errors
/// - `Semantic` when a string and a number meet under one operator.
/// - `InvalidOperation` for division by zero, integer overflow, bad shift amounts, or bitwise operators on floats.
pub fn fold(mut node: Node) -> Result<Node, CompileError> {
    while is_reducible(&node) {
        node = reduce(node)?;
    }
    Ok(node)
}

/// `true` if folding would change `node`: an operator over literals it can evaluate, or any reducible child.
pub fn is_reducible(node: &Node) -> bool {
    match &node.kind {
        NodeKind::BinaryOperator { op, left, right } => {
            is_reducible(left)
                || is_reducible(right)
                || match (left.as_literal(), right.as_literal()) {
                    (Some(lhs), Some(rhs)) => !matches!(evaluate_binary(*op, lhs, rhs, node.span), Ok(None)),
                    _ => false,
                }
        }
        NodeKind::UnaryOperator { op, operand } => {
            is_reducible(operand)
                || operand
                    .as_literal()
                    .is_some_and(|lit| !matches!(evaluate_unary(*op, lit, node.span), Ok(None)))
        }
        _ => false,
    }
}

/// One bottom-up folding pass over operator nodes.
pub fn reduce(node: Node) -> Result<Node, CompileError> {
    let Node { id, span, kind } = node;
    let kind = match kind {
        NodeKind::BinaryOperator { op, left, right } => {
            let left = reduce(*left)?;
            let right = reduce(*right)?;
            let folded = match (left.as_literal(), right.as_literal()) {
                (Some(lhs), Some(rhs)) => evaluate_binary(op, lhs, rhs, span)?,
                _ => None,
            };
            match folded {
                Some(lit) => NodeKind::Literal(lit),
                None => NodeKind::BinaryOperator {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
            }
        }
        NodeKind::UnaryOperator { op, operand } => {
            let operand = reduce(*operand)?;
            let folded = match operand.as_literal() {
                Some(lit) => evaluate_unary(op, lit, span)?,
                None => None,
            };
            match folded {
                Some(lit) => NodeKind::Literal(lit),
                None => NodeKind::UnaryOperator {
                    op,
                    operand: Box::new(operand),
                },
            }
        }
        other => other,
    };
    Ok(Node { id, span, kind })
}

/// Evaluate `lhs op rhs`. `Ok(None)` means the combination is not a constant expression.
pub fn evaluate_binary(op: OperatorId, lhs: &Literal, rhs: &Literal, span: Span) -> Result<Option<Literal>, CompileError> {
    let category = operators::info_for(op).category;
    if category == OperatorCategory::Assignment {
        return Ok(None);
    }

    match (lhs, rhs) {
        (Literal::String(_), other) | (other, Literal::String(_)) if other.is_numeric() => {
            Err(CompileError::semantic(
                format!(
                    "Cannot mix string and {} operands under '{}'",
                    other.kind_name(),
                    operators::as_str(op)
                ),
                span,
            ))
        }
        (Literal::String(a), Literal::String(b)) => Ok(match op {
            OperatorId::Plus => Some(Literal::String(format!("{a}{b}"))),
            OperatorId::EqEq => Some(Literal::Bool(a == b)),
            OperatorId::NotEq => Some(Literal::Bool(a != b)),
            _ => None,
        }),
        (Literal::Bool(a), Literal::Bool(b)) => Ok(match op {
            OperatorId::AmpAmp => Some(Literal::Bool(*a && *b)),
            OperatorId::PipePipe => Some(Literal::Bool(*a || *b)),
            OperatorId::EqEq => Some(Literal::Bool(a == b)),
            OperatorId::NotEq => Some(Literal::Bool(a != b)),
            _ => None,
        }),
        _ => match (number(lhs), number(rhs)) {
            (Some(a), Some(b)) => evaluate_numeric(op, category, a, b, span),
            _ => Ok(None),
        },
    }
}

fn evaluate_numeric(
    op: OperatorId,
    category: OperatorCategory,
    lhs: Number,
    rhs: Number,
    span: Span,
) -> Result<Option<Literal>, CompileError> {
    match category {
        OperatorCategory::Arithmetic => {
            let Some(numeric_op) = numeric_op(op) else {
                return Ok(None);
            };
            let value = brisk_core::eval_arithmetic(numeric_op, lhs, rhs)
                .map_err(|e| numeric_failure(op, lhs, rhs, e, span))?;
            Ok(Some(literal_of(value)))
        }
        OperatorCategory::Bitwise => {
            let Some(bitwise_op) = bitwise_op(op) else {
                return Ok(None);
            };
            let (Number::Int(a), Number::Int(b)) = (lhs, rhs) else {
                return Err(CompileError::invalid_operation(
                    format!("Operator '{}' requires integer operands", operators::as_str(op)),
                    span,
                ));
            };
            let value = brisk_core::eval_bitwise(bitwise_op, a, b).map_err(|e| numeric_failure(op, lhs, rhs, e, span))?;
            Ok(Some(Literal::Int(value)))
        }
        OperatorCategory::Comparison => Ok(comparison_op(op).map(|cmp| Literal::Bool(brisk_core::eval_comparison(cmp, lhs, rhs)))),
        OperatorCategory::Logical | OperatorCategory::Assignment => Ok(None),
    }
}

/// Evaluate `op operand`. `Ok(None)` means the combination is not a constant expression.
pub fn evaluate_unary(op: OperatorId, operand: &Literal, span: Span) -> Result<Option<Literal>, CompileError> {
    match (op, operand) {
        (OperatorId::Plus, Literal::Int(_) | Literal::Float(_)) => Ok(Some(operand.clone())),
        (OperatorId::Minus, Literal::Int(n)) => n.checked_neg().map(|v| Some(Literal::Int(v))).ok_or_else(|| {
            CompileError::invalid_operation(format!("Cannot evaluate '-{n}': integer overflow"), span)
        }),
        (OperatorId::Minus, Literal::Float(n)) => Ok(Some(Literal::Float(-n))),
        (OperatorId::Tilde, Literal::Int(n)) => Ok(Some(Literal::Int(!n))),
        (OperatorId::Tilde, Literal::Float(_)) => Err(CompileError::invalid_operation(
            "Operator '~' requires an integer operand",
            span,
        )),
        (OperatorId::Bang, Literal::Bool(b)) => Ok(Some(Literal::Bool(!b))),
        _ => Ok(None),
    }
}

fn numeric_failure(op: OperatorId, lhs: Number, rhs: Number, error: NumericError, span: Span) -> CompileError {
    CompileError::invalid_operation(
        format!(
            "Cannot evaluate '{} {} {}': {error}",
            literal_of(lhs),
            operators::as_str(op),
            literal_of(rhs)
        ),
        span,
    )
}

fn number(lit: &Literal) -> Option<Number> {
    match lit {
        Literal::Int(n) => Some(Number::Int(*n)),
        Literal::Float(n) => Some(Number::Float(*n)),
        _ => None,
    }
}

fn literal_of(value: Number) -> Literal {
    match value {
        Number::Int(n) => Literal::Int(n),
        Number::Float(n) => Literal::Float(n),
    }
}

fn numeric_op(op: OperatorId) -> Option<NumericOp> {
    Some(match op {
        OperatorId::Plus => NumericOp::Add,
        OperatorId::Minus => NumericOp::Sub,
        OperatorId::Star => NumericOp::Mul,
        OperatorId::Slash => NumericOp::Div,
        OperatorId::Percent => NumericOp::Mod,
        OperatorId::StarStar => NumericOp::Pow,
        _ => return None,
    })
}

fn bitwise_op(op: OperatorId) -> Option<BitwiseOp> {
    Some(match op {
        OperatorId::Shl => BitwiseOp::Shl,
        OperatorId::Shr => BitwiseOp::Shr,
        OperatorId::Amp => BitwiseOp::And,
        OperatorId::Pipe => BitwiseOp::Or,
        OperatorId::Caret => BitwiseOp::Xor,
        _ => return None,
    })
}

fn comparison_op(op: OperatorId) -> Option<ComparisonOp> {
    Some(match op {
        OperatorId::EqEq => ComparisonOp::Eq,
        OperatorId::NotEq => ComparisonOp::NotEq,
        OperatorId::Lt => ComparisonOp::Lt,
        OperatorId::LtEq => ComparisonOp::LtEq,
        OperatorId::Gt => ComparisonOp::Gt,
        OperatorId::GtEq => ComparisonOp::GtEq,
        _ => return None,
    })
}
