//! Parser for the Brisk programming language
//!
//! Converts a token list into an [`Ast`]. Statements and declarations are parsed by recursive descent, expressions by
//! precedence climbing over the `brisk_core` operator table. Every nested `{…}`, `(…)`, `[…]` and generic parameter
//! list `<…>` is handed to the production that owns it as a bounded [`Cursor`] obtained from block capture.
//!
//! Parsing is fail-fast: the first [`CompileError`] aborts the whole parse and no partial tree is returned.
//!
//! ## Examples
//!
//! ```rust
//! use brisk_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("let x: i32 = 2 + 3;").unwrap();
//! let ast = parser::parse(&tokens).unwrap();
//! assert_eq!(ast.statements().len(), 1);
//! ```

use crate::ast::*;
use crate::cursor::Cursor;
use crate::diagnostics::CompileError;
use crate::fold;
use crate::lexer::{Token, TokenKind};
use brisk_core::lang::keywords::KeywordId;
use brisk_core::lang::operators::{self, Associativity, OperatorId};
use brisk_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
