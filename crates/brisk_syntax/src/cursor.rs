//! Non-copying, position-tracking views over a token list.
//!
//! A [`Cursor`] borrows the token slice and is bounded to `[start, start + len)`. Block capture carves a
//! sub-cursor for the interior of a balanced delimiter pair and moves the outer cursor past the closer; the
//! grammar uses it for every `{…}`, `(…)`, `[…]` and generic `<…>` it meets. Cursors are `Copy`, so parsers can
//! speculate by copying one and committing only on success.

use brisk_core::lang::punctuation;

use crate::ast::Span;
use crate::diagnostics::CompileError;
use crate::lexer::{Token, TokenKind};

#[derive(Debug, Clone, Copy)]
pub struct Cursor<'t, 'src> {
    tokens: &'t [Token<'src>],
    start: usize,
    len: usize,
    pos: usize,
    /// Byte offset reported for "end of input" errors: the closing delimiter of a captured block, or the end of the
    /// last token for a top-level cursor.
    end_offset: usize,
}

impl<'t, 'src> Cursor<'t, 'src> {
    /// A cursor over the whole token list.
    pub fn new(tokens: &'t [Token<'src>]) -> Self {
        Self {
            tokens,
            start: 0,
            len: tokens.len(),
            pos: 0,
            end_offset: tokens.last().map(Token::end).unwrap_or(0),
        }
    }

    /// Token at `pos + offset` inside this view, if any.
    pub fn peek_token(&self, offset: usize) -> Option<&'t Token<'src>> {
        let index = self.pos.checked_add(offset)?;
        if index < self.len {
            self.tokens.get(self.start + index)
        } else {
            None
        }
    }

    /// `true` iff the token at `pos + offset` exists in this view and has `kind`.
    pub fn peek(&self, kind: TokenKind, offset: usize) -> bool {
        self.peek_token(offset).is_some_and(|t| t.kind == kind)
    }

    pub fn current(&self) -> Option<&'t Token<'src>> {
        self.peek_token(0)
    }

    pub fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    pub fn has_next(&self) -> bool {
        self.pos < self.len
    }

    pub fn is_exhausted(&self) -> bool {
        !self.has_next()
    }

    pub fn remaining(&self) -> usize {
        self.len - self.pos
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Take the current token unconditionally.
    pub fn advance(&mut self) -> Option<&'t Token<'src>> {
        let token = self.current()?;
        self.pos += 1;
        Some(token)
    }

    /// Advance past the current token if it has `kind`.
    pub fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek(kind, 0) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Like [`Cursor::consume`], but a mismatch is a syntax error: `"{message}, found {current}"`.
    pub fn require(&mut self, kind: TokenKind, message: &str) -> Result<&'t Token<'src>, CompileError> {
        match self.current() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            _ => Err(self.error_here(message)),
        }
    }

    /// Syntax error at the current token, naming what was found there.
    pub fn error_here(&self, message: &str) -> CompileError {
        CompileError::syntax(format!("{message}, found {}", self.describe_current()), self.current_span())
    }

    pub fn describe_current(&self) -> String {
        match self.current() {
            Some(token) => token.describe(),
            None => "end of input".to_string(),
        }
    }

    /// Span of the current token, or an empty span at the end of this view.
    pub fn current_span(&self) -> Span {
        match self.current() {
            Some(token) => token.span(),
            None => Span::new(self.end_offset, self.end_offset),
        }
    }

    /// Position marker for [`Cursor::span_from`].
    pub fn mark(&self) -> usize {
        self.pos
    }

    /// Span covering the tokens consumed since `mark`.
    pub fn span_from(&self, mark: usize) -> Span {
        let first = self.tokens.get(self.start + mark).filter(|_| mark < self.len);
        let last = self.pos.checked_sub(1).and_then(|i| self.tokens.get(self.start + i));
        match (first, last) {
            (Some(first), Some(last)) if mark < self.pos => Span::new(first.offset, last.end()),
            _ => self.current_span(),
        }
    }

    /// Capture the interior of the balanced `open … close` block at the current position.
    ///
    /// Depth counts every `open` and `close` (nested ones included). On success the outer cursor moves past the
    /// closing token and the returned sub-cursor spans exactly the interior tokens.
    ///
    /// ## Errors
    /// - `Syntax` if the current token is not `open`.
    /// - `ImbalancedClosure` if the block never closes inside this view.
    pub fn capture_block(&mut self, open: TokenKind, close: TokenKind) -> Result<Cursor<'t, 'src>, CompileError> {
        let Some(opener) = self.current().filter(|t| t.kind == open) else {
            return Err(self.error_here(&format!("Expected {open}")));
        };

        let mut depth: usize = 0;
        for index in self.pos..self.len {
            let token = &self.tokens[self.start + index];
            if token.kind == open {
                depth += 1;
            } else if token.kind == close {
                depth -= 1;
                if depth == 0 {
                    let inner = Cursor {
                        tokens: self.tokens,
                        start: self.start + self.pos + 1,
                        len: index - self.pos - 1,
                        pos: 0,
                        end_offset: token.offset,
                    };
                    self.pos = index + 1;
                    return Ok(inner);
                }
            }
        }

        Err(CompileError::imbalanced(
            format!("Imbalanced closure: {open} is never closed by {close}"),
            opener.span(),
        ))
    }

    /// Distance from the current position to the next `kind` at the current nesting depth.
    ///
    /// Depth is tracked across parentheses, brackets and braces together. Returns `None` if `kind` does not occur
    /// before the view ends or before a closer takes the depth below zero.
    pub fn distance_to(&self, kind: TokenKind) -> Option<usize> {
        let mut depth: usize = 0;
        for index in self.pos..self.len {
            let token = &self.tokens[self.start + index];
            if depth == 0 && token.kind == kind {
                return Some(index - self.pos);
            }
            if let TokenKind::Punctuation(id) = token.kind {
                if punctuation::is_opening(id) {
                    depth += 1;
                } else if punctuation::is_closing(id) {
                    depth = depth.checked_sub(1)?;
                }
            }
        }
        None
    }

    /// Sub-cursor over the next `count` tokens (clamped to the view); the outer cursor moves past them.
    pub fn take(&mut self, count: usize) -> Cursor<'t, 'src> {
        let count = count.min(self.remaining());
        let end_offset = self
            .peek_token(count)
            .map(|t| t.offset)
            .unwrap_or(self.end_offset);
        let inner = Cursor {
            tokens: self.tokens,
            start: self.start + self.pos,
            len: count,
            pos: 0,
            end_offset,
        };
        self.pos += count;
        inner
    }

    /// Sub-cursor up to (not including) the next depth-zero `kind`, which is consumed. If there is none, the rest of
    /// the view is taken.
    pub fn take_until(&mut self, kind: TokenKind) -> Cursor<'t, 'src> {
        match self.distance_to(kind) {
            Some(distance) => {
                let inner = self.take(distance);
                self.pos += 1;
                inner
            }
            None => self.take(self.remaining()),
        }
    }

    /// Fail unless every token in this view was consumed.
    ///
    /// A leftover closing delimiter is reported as an imbalance rather than a plain syntax error.
    pub fn expect_exhausted(&self, context: &str) -> Result<(), CompileError> {
        let Some(token) = self.current() else {
            return Ok(());
        };
        match token.kind {
            TokenKind::Punctuation(id) if punctuation::is_closing(id) => Err(CompileError::imbalanced(
                format!("Imbalanced closure: unexpected {}", token.describe()),
                token.span(),
            )),
            _ => Err(CompileError::syntax(
                format!("Unexpected {} {context}", token.describe()),
                token.span(),
            )),
        }
    }

    /// Spellings of the remaining tokens, for tests and trace output.
    pub fn texts(&self) -> Vec<&'src str> {
        (self.pos..self.len).map(|i| self.tokens[self.start + i].text).collect()
    }
}
