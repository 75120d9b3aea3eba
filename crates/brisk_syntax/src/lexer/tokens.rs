//! Token types for the Brisk lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! Data-bearing tokens (identifiers, literals, comments) carry no payload in the kind; their spelling is the
//! token's `text`, a slice of the source buffer.

use std::fmt;

use crate::ast::Span;
use brisk_core::lang::keywords::{self, KeywordId};
use brisk_core::lang::operators::{self, OperatorId};
use brisk_core::lang::punctuation::{self, PunctuationId};

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident,
    Int,
    Float,
    String,
    Char,

    // ========== Trivia ==========
    Comment,
}

impl TokenKind {
    pub const LPAREN: TokenKind = TokenKind::Punctuation(PunctuationId::LParen);
    pub const RPAREN: TokenKind = TokenKind::Punctuation(PunctuationId::RParen);
    pub const LBRACKET: TokenKind = TokenKind::Punctuation(PunctuationId::LBracket);
    pub const RBRACKET: TokenKind = TokenKind::Punctuation(PunctuationId::RBracket);
    pub const LBRACE: TokenKind = TokenKind::Punctuation(PunctuationId::LBrace);
    pub const RBRACE: TokenKind = TokenKind::Punctuation(PunctuationId::RBrace);
    pub const COMMA: TokenKind = TokenKind::Punctuation(PunctuationId::Comma);
    pub const SEMICOLON: TokenKind = TokenKind::Punctuation(PunctuationId::Semicolon);
    pub const COLON: TokenKind = TokenKind::Punctuation(PunctuationId::Colon);
    /// `<` doubles as the generic-parameter opener.
    pub const LT: TokenKind = TokenKind::Operator(OperatorId::Lt);
    /// `>` doubles as the generic-parameter closer.
    pub const GT: TokenKind = TokenKind::Operator(OperatorId::Gt);
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(id) => write!(f, "'{}'", keywords::as_str(*id)),
            TokenKind::Operator(id) => write!(f, "'{}'", operators::as_str(*id)),
            TokenKind::Punctuation(id) => write!(f, "'{}'", punctuation::as_str(*id)),
            TokenKind::Ident => write!(f, "identifier"),
            TokenKind::Int => write!(f, "integer literal"),
            TokenKind::Float => write!(f, "float literal"),
            TokenKind::String => write!(f, "string literal"),
            TokenKind::Char => write!(f, "char literal"),
            TokenKind::Comment => write!(f, "comment"),
        }
    }
}

/// A token: its kind, its spelling in the source, and the byte offset where it starts.
///
/// Tokens are immutable once produced and borrow their text from the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub offset: usize,
}

impl<'src> Token<'src> {
    /// Construct a new token.
    pub fn new(kind: TokenKind, text: &'src str, offset: usize) -> Self {
        Self { kind, text, offset }
    }

    /// Byte offset one past the last byte of the token.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    pub fn span(&self) -> Span {
        Span::new(self.offset, self.end())
    }
}

