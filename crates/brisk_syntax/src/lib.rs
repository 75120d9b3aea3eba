//! Shared syntax frontend for the Brisk language: lexer, token cursor, parser, AST, constant folding, diagnostics.
//!
//! ## Notes
//! - This crate is intentionally "syntax-only": it does not do name resolution, type checking, or code generation.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `brisk_core::lang` registries.
//! - Errors are values: nothing here prints or exits. Callers decide how to render a [`CompileError`].
//!
//! ## Examples
//! ```rust
//! use brisk_syntax::ast::{Literal, NodeKind};
//!
//! let ast = brisk_syntax::parse_source("let x: i32 = 2 + 3;").unwrap();
//! let decl = ast.statements()[0].as_variable().unwrap();
//! assert_eq!(decl.initializer.as_ref().unwrap().kind, NodeKind::Literal(Literal::Int(5)));
//! ```
//!
//! ## See also
//! - `brisk_core::lang` for registry-backed language vocabulary (keywords/operators/punctuation).

pub mod ast;
pub mod cursor;
pub mod diagnostics;
pub mod fold;
pub mod lexer;
pub mod parser;
pub mod token_helpers;

pub use diagnostics::{CompileError, ErrorKind, SourceFile};

/// Lex and parse a whole source buffer.
///
/// ## Errors
/// Returns the first lexing or parsing error.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse_source(source: &str) -> Result<ast::Ast, CompileError> {
    let tokens = lexer::lex(source)?;
    parser::parse(&tokens)
}
