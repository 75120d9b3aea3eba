//! Brisk language vocabulary registries.
//!
//! This module is the "front door" for language-level vocabulary: reserved keywords, operators
//! and punctuation.
//!
//! Callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`) and look up spellings and
//! metadata via registry tables instead of comparing strings.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - The lexer builds its rule table from these registries, so a spelling added here becomes a token
//!   without further lexer changes.
//!
//! ## Examples
//! ```rust
//! use brisk_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("if"), Some(KeywordId::If));
//! assert_eq!(keywords::as_str(KeywordId::If), "if");
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
