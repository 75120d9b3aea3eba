#![forbid(unsafe_code)]
//! Brisk Programming Language Front End
//!
//! Brisk is a small curly-brace language. This crate ties the front end together: the syntax crate
//! (`brisk_syntax`: lexer, token cursor, parser, AST, constant folding, diagnostics) and the `brisk` driver CLI.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a front-end bug (logic error), use `.expect("INVARIANT: reason")`
//!   with a clear explanation.

pub mod cli;

pub use brisk_syntax::ast;
pub use brisk_syntax::cursor;
pub use brisk_syntax::diagnostics;
pub use brisk_syntax::fold;
pub use brisk_syntax::lexer;
pub use brisk_syntax::parser;

pub use brisk_syntax::{CompileError, ErrorKind, SourceFile, parse_source};

/// The front end version string, taken from Cargo metadata.
pub const BRISK_VERSION: &str = env!("CARGO_PKG_VERSION");
