//! Diagnostics and error reporting for Brisk
//!
//! Parsing is fail-fast: the first problem becomes a [`CompileError`] that propagates out of the lexer or parser
//! unchanged. Rendering is left to the caller, either as the plain boxed frame from [`format_error`], the ANSI
//! variant from [`print_error`], or a miette report via [`CompileError::to_report`].

use std::fmt;

use miette::{Diagnostic, LabeledSpan, NamedSource};

use crate::ast::Span;

/// Category of a compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No token rule matches at an offset.
    IllegalCharacter,
    /// An expected token was not found.
    Syntax,
    /// A bracket, paren or brace block never closes, or closes too often.
    ImbalancedClosure,
    /// Tokens are well-formed but a production rule is violated.
    Semantic,
    /// A constant expression cannot be evaluated.
    InvalidOperation,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::IllegalCharacter => "brisk::lex::illegal_character",
            ErrorKind::Syntax => "brisk::parse::syntax",
            ErrorKind::ImbalancedClosure => "brisk::parse::imbalanced_closure",
            ErrorKind::Semantic => "brisk::parse::semantic",
            ErrorKind::InvalidOperation => "brisk::parse::invalid_operation",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ErrorKind::IllegalCharacter => "no token starts here",
            ErrorKind::Syntax => "unexpected here",
            ErrorKind::ImbalancedClosure => "unbalanced delimiter",
            ErrorKind::Semantic => "invalid here",
            ErrorKind::InvalidOperation => "cannot be evaluated",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::IllegalCharacter => write!(f, "illegal character"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::ImbalancedClosure => write!(f, "imbalanced closure"),
            ErrorKind::Semantic => write!(f, "semantic error"),
            ErrorKind::InvalidOperation => write!(f, "invalid operation"),
        }
    }
}

/// A compile-time error with location information
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct CompileError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
}

impl CompileError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
        }
    }

    pub fn illegal_character(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::IllegalCharacter, message, span)
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Syntax, message, span)
    }

    pub fn imbalanced(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::ImbalancedClosure, message, span)
    }

    pub fn semantic(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Semantic, message, span)
    }

    pub fn invalid_operation(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::InvalidOperation, message, span)
    }

    /// Attach the source so miette's graphical handler can render the labelled excerpt.
    pub fn to_report(&self, source: &SourceFile) -> miette::Report {
        miette::Report::new(self.clone()).with_source_code(NamedSource::new(&source.name, source.text.clone()))
    }
}

impl Diagnostic for CompileError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.kind {
            ErrorKind::ImbalancedClosure => Some(Box::new(
                "every '(', '[', '{' and generic '<' needs exactly one matching closer",
            ) as Box<dyn fmt::Display>),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::at(self.span.start..self.span.end, self.kind.label());
        Some(Box::new(std::iter::once(label)))
    }
}

// ============================================================================
// Source files and locations
// ============================================================================

/// A source buffer with the name used in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// 1-based line and column (in characters) of a byte offset.
///
/// Offsets past the end of `text` clamp to the end.
pub fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let excerpt = Excerpt::locate(text, Span::new(offset, offset));
    (excerpt.line, excerpt.column)
}

/// The source line containing an error, split around the offending token.
struct Excerpt<'a> {
    line: usize,
    column: usize,
    before: &'a str,
    token: &'a str,
    after: &'a str,
}

impl<'a> Excerpt<'a> {
    fn locate(text: &'a str, span: Span) -> Self {
        let start = floor_char_boundary(text, span.start);
        let line_start = text[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line_end = text[start..].find('\n').map(|i| start + i).unwrap_or(text.len());
        let end = floor_char_boundary(text, span.end.clamp(start, line_end));

        let before = &text[line_start..start];
        Self {
            line: text[..line_start].matches('\n').count() + 1,
            column: before.chars().count() + 1,
            before,
            token: &text[start..end],
            after: &text[end..line_end],
        }
    }

    fn caret(&self) -> String {
        format!(
            "{}{}",
            " ".repeat(self.before.chars().count()),
            "^".repeat(self.token.chars().count().max(1))
        )
    }
}

fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

// ============================================================================
// Rendering
// ============================================================================

/// Render an error as a boxed frame with the offending token between `[` `]` markers.
///
/// ```text
/// +-----------------------------+
/// | syntax error at main.bk:1:7 |
/// +-----------------------------+
///  1 | let x [i32] = 1;
///    |        ^^^
///    = Expected ':' after variable name
/// ```
pub fn format_error(source: &SourceFile, error: &CompileError) -> String {
    let excerpt = Excerpt::locate(&source.text, error.span);
    let header = format!("{} at {}:{}:{}", error.kind, source.name, excerpt.line, excerpt.column);
    let rule = "-".repeat(header.chars().count() + 2);
    let gutter = excerpt.line.to_string();
    let pad = " ".repeat(gutter.len());

    [
        format!("+{rule}+"),
        format!("| {header} |"),
        format!("+{rule}+"),
        format!(" {gutter} | {}[{}]{}", excerpt.before, excerpt.token, excerpt.after),
        format!(" {pad} |  {}", excerpt.caret()),
        format!(" {pad} = {}", error.message),
    ]
    .join("\n")
}

/// Print the frame to stderr, highlighting the token in inverse video.
pub fn print_error(source: &SourceFile, error: &CompileError) {
    let excerpt = Excerpt::locate(&source.text, error.span);

    // Color codes
    let red = "\x1b[31m";
    let cyan = "\x1b[36m";
    let bold = "\x1b[1m";
    let inverse = "\x1b[7m";
    let reset = "\x1b[0m";

    let header = format!("{} at {}:{}:{}", error.kind, source.name, excerpt.line, excerpt.column);
    let rule = "─".repeat(header.chars().count() + 2);
    let gutter = excerpt.line.to_string();
    let pad = " ".repeat(gutter.len());

    eprintln!("{cyan}┌{rule}┐{reset}");
    eprintln!("{cyan}│{reset} {bold}{red}{header}{reset} {cyan}│{reset}");
    eprintln!("{cyan}└{rule}┘{reset}");
    eprintln!(
        " {cyan}{gutter} |{reset} {}{inverse}{}{reset}{}",
        excerpt.before, excerpt.token, excerpt.after
    );
    eprintln!(" {cyan}{pad} |{reset} {red}{}{reset}", excerpt.caret());
    eprintln!(" {cyan}{pad} ={reset} {bold}{}{reset}", error.message);
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let text = "let a: i32 = 1;\nlet b: i32 = 2;\n";
        assert_eq!(line_col(text, 0), (1, 1));
        assert_eq!(line_col(text, 4), (1, 5));
        assert_eq!(line_col(text, 16), (2, 1));
        assert_eq!(line_col(text, 20), (2, 5));
        assert_eq!(line_col(text, 10_000), (3, 1));
    }

    #[test]
    fn test_line_col_counts_characters() {
        assert_eq!(line_col("\"é\" x", 5), (1, 5));
    }

    #[test]
    fn test_format_error_frame() {
        let source = SourceFile::new("main.bk", "let a: i32 = 0;\nlet x i32 = 1;\n");
        let error = CompileError::syntax("Expected ':' after variable name", Span::new(22, 25));
        insta::assert_snapshot!(format_error(&source, &error), @r"
        +-----------------------------+
        | syntax error at main.bk:2:7 |
        +-----------------------------+
         2 | let x [i32] = 1;
           |        ^^^
           = Expected ':' after variable name
        ");
    }

    #[test]
    fn test_format_error_at_end_of_input() {
        let source = SourceFile::new("main.bk", "fn f(");
        let error = CompileError::imbalanced("Imbalanced closure", Span::new(5, 5));
        let rendered = format_error(&source, &error);
        assert!(rendered.contains("imbalanced closure at main.bk:1:6"));
        assert!(rendered.contains(" 1 | fn f([]"));
    }

    #[test]
    fn test_display_and_code() {
        let error = CompileError::semantic("Duplicate 'default' case", Span::new(0, 7));
        assert_eq!(error.to_string(), "semantic error: Duplicate 'default' case");
        assert_eq!(
            error.code().map(|c| c.to_string()).as_deref(),
            Some("brisk::parse::semantic")
        );
        assert_eq!(error.labels().map(|l| l.count()), Some(1));
    }
}
