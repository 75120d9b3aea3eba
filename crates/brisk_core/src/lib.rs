//! Provide the canonical language vocabulary and pure numeric helpers for the Brisk front end.
//!
//! This crate is intentionally small and dependency-free. It contains:
//! - the vocabulary registries (`lang::keywords`, `lang::operators`, `lang::punctuation`) the lexer builds its
//!   rule table from and the expression parser climbs on, and
//! - the numeric policy constant folding uses to evaluate literal-only sub-expressions.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, and no AST types.
//! - Numeric policy: `+ - * %` on two integers, and `**` with a non-negative integer exponent, use checked `i64`
//!   arithmetic; `/`, negative powers and anything touching a float are evaluated in `f64`. A float result computed from two integers is narrowed back to an integer when it
//!   is exactly integral, so `6 / 2` folds to `3` while `7 / 2` folds to `3.5`.
//! - Shift and bitwise operators only accept integers and are always checked.

use std::fmt;

pub mod lang;

/// Represent the numeric category of a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericTy {
    Int,
    Float,
}

/// A numeric literal value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn ty(self) -> NumericTy {
        match self {
            Number::Int(_) => NumericTy::Int,
            Number::Float(_) => NumericTy::Float,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }
}

/// Arithmetic operators subject to the numeric policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

/// Integer-only operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitwiseOp {
    Shl,
    Shr,
    And,
    Or,
    Xor,
}

/// Ordering / equality operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

/// Why a constant operation could not be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    DivisionByZero,
    Overflow,
    ShiftOutOfRange,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::Overflow => write!(f, "integer overflow"),
            NumericError::ShiftOutOfRange => write!(f, "shift amount out of range"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Evaluate an arithmetic operator on two numeric literals.
///
/// ## Errors
/// - [`NumericError::DivisionByZero`] for `/` or `%` with a zero divisor.
/// - [`NumericError::Overflow`] when checked integer arithmetic overflows.
///
/// ## Examples
/// ```rust
/// use brisk_core::{eval_arithmetic, Number, NumericOp};
///
/// assert_eq!(eval_arithmetic(NumericOp::Add, Number::Int(2), Number::Int(12)), Ok(Number::Int(14)));
/// assert_eq!(eval_arithmetic(NumericOp::Div, Number::Int(7), Number::Int(2)), Ok(Number::Float(3.5)));
/// assert_eq!(eval_arithmetic(NumericOp::Div, Number::Int(6), Number::Int(2)), Ok(Number::Int(3)));
/// ```
pub fn eval_arithmetic(op: NumericOp, lhs: Number, rhs: Number) -> Result<Number, NumericError> {
    if let (Number::Int(a), Number::Int(b)) = (lhs, rhs) {
        let checked = match op {
            NumericOp::Add => Some(a.checked_add(b)),
            NumericOp::Sub => Some(a.checked_sub(b)),
            NumericOp::Mul => Some(a.checked_mul(b)),
            NumericOp::Mod => {
                if b == 0 {
                    return Err(NumericError::DivisionByZero);
                }
                Some(a.checked_rem(b))
            }
            NumericOp::Pow if b >= 0 => Some(int_pow(a, b)),
            NumericOp::Div | NumericOp::Pow => None,
        };
        if let Some(result) = checked {
            return result.map(Number::Int).ok_or(NumericError::Overflow);
        }
    }

    let (a, b) = (lhs.as_f64(), rhs.as_f64());
    let value = match op {
        NumericOp::Add => a + b,
        NumericOp::Sub => a - b,
        NumericOp::Mul => a * b,
        NumericOp::Div => {
            if b == 0.0 {
                return Err(NumericError::DivisionByZero);
            }
            a / b
        }
        NumericOp::Mod => {
            if b == 0.0 {
                return Err(NumericError::DivisionByZero);
            }
            a % b
        }
        NumericOp::Pow => a.powf(b),
    };

    if lhs.ty() == NumericTy::Int && rhs.ty() == NumericTy::Int {
        if let Some(int) = exact_int(value) {
            return Ok(Number::Int(int));
        }
    }
    Ok(Number::Float(value))
}

/// `base ** exp` for a non-negative exponent, `None` on overflow.
///
/// Bases 0, 1 and -1 stay in range for any exponent, even one too wide for `u32`.
fn int_pow(base: i64, exp: i64) -> Option<i64> {
    match (base, u32::try_from(exp)) {
        (_, Ok(exp)) => base.checked_pow(exp),
        (0 | 1, Err(_)) => Some(base),
        (-1, Err(_)) => Some(if exp % 2 == 0 { 1 } else { -1 }),
        (_, Err(_)) => None,
    }
}

/// Evaluate a shift/bitwise operator on two integer literals.
///
/// ## Errors
/// - [`NumericError::ShiftOutOfRange`] for negative shift amounts or amounts of 64 and above.
pub fn eval_bitwise(op: BitwiseOp, lhs: i64, rhs: i64) -> Result<i64, NumericError> {
    match op {
        BitwiseOp::And => Ok(lhs & rhs),
        BitwiseOp::Or => Ok(lhs | rhs),
        BitwiseOp::Xor => Ok(lhs ^ rhs),
        BitwiseOp::Shl | BitwiseOp::Shr => {
            let amount = u32::try_from(rhs).map_err(|_| NumericError::ShiftOutOfRange)?;
            let shifted = if op == BitwiseOp::Shl {
                lhs.checked_shl(amount)
            } else {
                lhs.checked_shr(amount)
            };
            shifted.ok_or(NumericError::ShiftOutOfRange)
        }
    }
}

/// Compare two numeric literals, promoting to `f64` when either side is a float.
pub fn eval_comparison(op: ComparisonOp, lhs: Number, rhs: Number) -> bool {
    if let (Number::Int(a), Number::Int(b)) = (lhs, rhs) {
        return compare(op, a.cmp(&b));
    }
    match lhs.as_f64().partial_cmp(&rhs.as_f64()) {
        Some(ordering) => compare(op, ordering),
        // NaN: only `!=` holds.
        None => op == ComparisonOp::NotEq,
    }
}

/// Apply a comparison operator to an already computed ordering.
pub fn compare(op: ComparisonOp, ordering: std::cmp::Ordering) -> bool {
    use std::cmp::Ordering::*;
    match op {
        ComparisonOp::Eq => ordering == Equal,
        ComparisonOp::NotEq => ordering != Equal,
        ComparisonOp::Lt => ordering == Less,
        ComparisonOp::LtEq => ordering != Greater,
        ComparisonOp::Gt => ordering == Greater,
        ComparisonOp::GtEq => ordering != Less,
    }
}

/// Narrow an `f64` to `i64` when it holds an exact, in-range integer.
fn exact_int(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}
