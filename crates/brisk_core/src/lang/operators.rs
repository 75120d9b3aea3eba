//! Operator vocabulary.
//!
//! This module defines the canonical operator set along with the metadata the expression parser climbs on:
//! precedence, associativity, and fixity (the arity hint).
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** and exact; longest-match tokenization is the lexer's job.
//! - `precedence` is a relative ordering where higher binds tighter. Bands, high to low: multiplicative (`**`
//!   included), additive (unary `+`/`-` included), shift/bitwise (logical `&&`/`||` included), relational/equality,
//!   assignment.
//! - A prefix operator binds at its own band: `-2 ** 2` is `-(2 ** 2)`.
//!
//! ## Examples
//! ```rust
//! use brisk_core::lang::operators::{self, Associativity, OperatorId};
//!
//! assert_eq!(operators::from_str("<<="), Some(OperatorId::ShlEq));
//! assert!(operators::info_for(OperatorId::Star).precedence > operators::info_for(OperatorId::Plus).precedence);
//! assert_eq!(operators::info_for(OperatorId::Eq).associativity, Associativity::Right);
//! ```

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Define whether an operator is infix (binary), prefix (unary), or may be either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
    InfixOrPrefix,
}

/// Broad semantic grouping, used by constant folding to pick an evaluation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorCategory {
    Arithmetic,
    Bitwise,
    Logical,
    Comparison,
    Assignment,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,

    // Shift / bitwise
    Shl,
    Shr,
    Amp,
    Pipe,
    Caret,
    Tilde,

    // Logical
    AmpAmp,
    PipePipe,
    Bang,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    ShlEq,
    ShrEq,
    AmpEq,
    PipeEq,
    CaretEq,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub category: OperatorCategory,
}

impl OperatorInfo {
    /// Return `true` if the operator can appear between two operands.
    pub fn is_infix(&self) -> bool {
        matches!(self.fixity, Fixity::Infix | Fixity::InfixOrPrefix)
    }

    /// Return `true` if the operator can prefix a single operand.
    pub fn is_prefix(&self) -> bool {
        matches!(self.fixity, Fixity::Prefix | Fixity::InfixOrPrefix)
    }
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::StarStar, "**", 60, Associativity::Left, Fixity::Infix, OperatorCategory::Arithmetic),
    op(OperatorId::Star, "*", 60, Associativity::Left, Fixity::Infix, OperatorCategory::Arithmetic),
    op(OperatorId::Slash, "/", 60, Associativity::Left, Fixity::Infix, OperatorCategory::Arithmetic),
    op(OperatorId::Percent, "%", 60, Associativity::Left, Fixity::Infix, OperatorCategory::Arithmetic),
    op(OperatorId::Plus, "+", 50, Associativity::Left, Fixity::InfixOrPrefix, OperatorCategory::Arithmetic),
    op(OperatorId::Minus, "-", 50, Associativity::Left, Fixity::InfixOrPrefix, OperatorCategory::Arithmetic),
    // Shift / bitwise
    op(OperatorId::Shl, "<<", 40, Associativity::Left, Fixity::Infix, OperatorCategory::Bitwise),
    op(OperatorId::Shr, ">>", 40, Associativity::Left, Fixity::Infix, OperatorCategory::Bitwise),
    op(OperatorId::Amp, "&", 40, Associativity::Left, Fixity::Infix, OperatorCategory::Bitwise),
    op(OperatorId::Pipe, "|", 40, Associativity::Left, Fixity::Infix, OperatorCategory::Bitwise),
    op(OperatorId::Caret, "^", 40, Associativity::Left, Fixity::Infix, OperatorCategory::Bitwise),
    op(OperatorId::Tilde, "~", 40, Associativity::Left, Fixity::Prefix, OperatorCategory::Bitwise),
    // Comparison
    op(OperatorId::EqEq, "==", 30, Associativity::Left, Fixity::Infix, OperatorCategory::Comparison),
    op(OperatorId::NotEq, "!=", 30, Associativity::Left, Fixity::Infix, OperatorCategory::Comparison),
    op(OperatorId::Lt, "<", 30, Associativity::Left, Fixity::Infix, OperatorCategory::Comparison),
    op(OperatorId::LtEq, "<=", 30, Associativity::Left, Fixity::Infix, OperatorCategory::Comparison),
    op(OperatorId::Gt, ">", 30, Associativity::Left, Fixity::Infix, OperatorCategory::Comparison),
    op(OperatorId::GtEq, ">=", 30, Associativity::Left, Fixity::Infix, OperatorCategory::Comparison),
    // Logical
    op(OperatorId::AmpAmp, "&&", 40, Associativity::Left, Fixity::Infix, OperatorCategory::Logical),
    op(OperatorId::PipePipe, "||", 40, Associativity::Left, Fixity::Infix, OperatorCategory::Logical),
    op(OperatorId::Bang, "!", 40, Associativity::Left, Fixity::Prefix, OperatorCategory::Logical),
    // Assignment
    op(OperatorId::Eq, "=", 10, Associativity::Right, Fixity::Infix, OperatorCategory::Assignment),
    op(OperatorId::PlusEq, "+=", 10, Associativity::Right, Fixity::Infix, OperatorCategory::Assignment),
    op(OperatorId::MinusEq, "-=", 10, Associativity::Right, Fixity::Infix, OperatorCategory::Assignment),
    op(OperatorId::StarEq, "*=", 10, Associativity::Right, Fixity::Infix, OperatorCategory::Assignment),
    op(OperatorId::SlashEq, "/=", 10, Associativity::Right, Fixity::Infix, OperatorCategory::Assignment),
    op(OperatorId::PercentEq, "%=", 10, Associativity::Right, Fixity::Infix, OperatorCategory::Assignment),
    op(OperatorId::ShlEq, "<<=", 10, Associativity::Right, Fixity::Infix, OperatorCategory::Assignment),
    op(OperatorId::ShrEq, ">>=", 10, Associativity::Right, Fixity::Infix, OperatorCategory::Assignment),
    op(OperatorId::AmpEq, "&=", 10, Associativity::Right, Fixity::Infix, OperatorCategory::Assignment),
    op(OperatorId::PipeEq, "|=", 10, Associativity::Right, Fixity::Infix, OperatorCategory::Assignment),
    op(OperatorId::CaretEq, "^=", 10, Associativity::Right, Fixity::Infix, OperatorCategory::Assignment),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Canonical spelling.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Resolve an operator spelling to its identifier.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spelling: &'static str,
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
    category: OperatorCategory,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
        fixity,
        category,
    }
}
