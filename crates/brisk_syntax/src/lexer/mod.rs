//! Lexer for the Brisk programming language
//!
//! Scans left to right, skipping ASCII whitespace. At every offset each rule of the [`RuleTable`] is tried in
//! order and the first anchored match wins. Keyword rules are only accepted when the characters on both sides of
//! the match are word boundaries; otherwise scanning falls through to the next rule, which lets `classify` reach
//! the identifier rule instead of lexing as `class` + `ify`.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `rules` - The ordered pattern → kind rule table

pub mod rules;
pub mod tokens;

pub use rules::{RuleSpec, RuleTable, TokenRule};
pub use tokens::{Token, TokenKind};

use crate::ast::Span;
use crate::diagnostics::CompileError;

/// Lexer for Brisk source code.
///
/// Holds an immutable rule table; one lexer can tokenize any number of sources.
#[derive(Debug, Clone, Default)]
pub struct Lexer {
    rules: RuleTable,
}

impl Lexer {
    /// Create a lexer using the standard rule table.
    pub fn new() -> Self {
        Self::with_rules(RuleTable::standard())
    }

    /// Create a lexer over a caller-supplied rule table.
    pub fn with_rules(rules: RuleTable) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Tokenize the entire source text.
    ///
    /// Comment tokens are kept in the output; the parser skips them.
    ///
    /// ## Errors
    /// Returns an `IllegalCharacter` [`CompileError`] at the first offset no rule matches.
    #[tracing::instrument(skip_all, fields(source_len = source.len()))]
    pub fn tokenize<'src>(&self, source: &'src str) -> Result<Vec<Token<'src>>, CompileError> {
        let mut tokens = Vec::new();
        let mut offset = 0;

        while let Some(c) = source[offset..].chars().next() {
            if matches!(c, ' ' | '\t' | '\n' | '\r') {
                offset += 1;
                continue;
            }

            let rest = &source[offset..];
            let accepted = self.rules.rules().iter().find_map(|rule| {
                let len = rule.match_len(rest)?;
                if rule.keyword && !at_word_boundaries(source, offset, offset + len) {
                    return None;
                }
                Some((rule.kind, len))
            });

            let Some((kind, len)) = accepted else {
                return Err(illegal_character(c, offset));
            };
            if kind == TokenKind::Comment && is_unclosed_block_comment(&rest[..len]) {
                return Err(CompileError::illegal_character(
                    "Unterminated block comment",
                    Span::new(offset, offset + 2),
                ));
            }
            tokens.push(Token::new(kind, &source[offset..offset + len], offset));
            offset += len;
        }

        tracing::trace!(token_count = tokens.len(), "tokenized source");
        Ok(tokens)
    }
}

fn illegal_character(c: char, offset: usize) -> CompileError {
    let span = Span::new(offset, offset + c.len_utf8());
    let message = match c {
        '"' => "Unterminated string literal".to_string(),
        '\'' => "Malformed or unterminated char literal".to_string(),
        _ => format!("Illegal character '{}'", c.escape_debug()),
    };
    CompileError::illegal_character(message, span)
}

// ============================================================================
// Helper functions
// ============================================================================

/// `/*` without its own closing `*/` (the `*` of the opener cannot close it).
fn is_unclosed_block_comment(text: &str) -> bool {
    text.starts_with("/*") && (text.len() < 4 || !text.ends_with("*/"))
}

/// Check if a character can appear inside a word (ASCII-only).
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Return `true` if `source[start..end]` is delimited by non-word characters (or the buffer ends).
fn at_word_boundaries(source: &str, start: usize, end: usize) -> bool {
    let before = source[..start].chars().next_back();
    let after = source[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Convenience function to lex a source string with the standard rule table.
///
/// This is a shorthand for `Lexer::new().tokenize(source)`; it compiles a fresh rule table on every call, so
/// prefer holding a [`Lexer`] when tokenizing many sources.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token<'_>>, CompileError> {
    Lexer::new().tokenize(source)
}

// ============================================================================
// TESTS
// ============================================================================
