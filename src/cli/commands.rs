//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use miette::{GraphicalReportHandler, GraphicalTheme};

use brisk_syntax::ast::Ast;
use brisk_syntax::diagnostics::{self, CompileError, SourceFile};
use brisk_syntax::lexer::{self, Token};
use brisk_syntax::parser;

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MiB); larger files are rejected before lexing.
pub const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// How compile errors are written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStyle {
    /// The boxed frame from `diagnostics::print_error`.
    Frame,
    /// miette's graphical report.
    Fancy,
}

/// Read a source file, rejecting unreadable or oversized files.
///
/// ## Errors
/// - The file cannot be accessed or is not valid UTF-8
/// - The file exceeds `MAX_SOURCE_SIZE`
pub fn read_source(path: &Path) -> CliResult<SourceFile> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    let text = fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", path.display(), e)))?;
    Ok(SourceFile::new(path.display().to_string(), text))
}

/// Write a compile error to stderr and turn it into an already-reported CLI failure.
fn report(source: &SourceFile, error: &CompileError, style: ReportStyle) -> CliError {
    tracing::debug!(code = error.kind.code(), start = error.span.start, "compile error");
    match style {
        ReportStyle::Frame => diagnostics::print_error(source, error),
        ReportStyle::Fancy => eprint!("{}", render_fancy(source, error, GraphicalTheme::default())),
    }
    CliError::reported()
}

/// Render miette's graphical report for `error`, labelled against `source`.
pub fn render_fancy(source: &SourceFile, error: &CompileError, theme: GraphicalTheme) -> String {
    let report = error.to_report(source);
    let mut out = String::new();
    if GraphicalReportHandler::new_themed(theme)
        .render_report(&mut out, &*report)
        .is_err()
    {
        // Fall back to the handler installed for `Debug`.
        return format!("{report:?}\n");
    }
    out
}

/// One line per token: byte range, kind, spelling.
pub fn render_tokens(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for tok in tokens {
        let range = format!("{}..{}", tok.offset, tok.end());
        let _ = writeln!(out, "{range:<12} {:<20} {}", tok.kind.to_string(), tok.text);
    }
    out
}

/// Tokenize and display the token stream.
pub fn lex_file(path: &Path, style: ReportStyle) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let tokens = lexer::lex(&source.text).map_err(|e| report(&source, &e, style))?;
    print!("{}", render_tokens(&tokens));
    Ok(ExitCode::SUCCESS)
}

/// Parse and display the AST.
pub fn parse_file(path: &Path, style: ReportStyle) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let ast = parse_checked(&source, style)?;
    println!("{:#?}", ast.root());
    Ok(ExitCode::SUCCESS)
}

/// Lex and parse a file, reporting only success or the first error.
pub fn check_file(path: &Path, style: ReportStyle) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let ast = parse_checked(&source, style)?;
    println!(
        "✓ {}: {} top-level statement(s), {} node(s)",
        source.name,
        ast.statements().len(),
        ast.walk().count()
    );
    Ok(ExitCode::SUCCESS)
}

fn parse_checked(source: &SourceFile, style: ReportStyle) -> CliResult<Ast> {
    let tokens = lexer::lex(&source.text).map_err(|e| report(source, &e, style))?;
    parser::parse(&tokens).map_err(|e| report(source, &e, style))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("brisk_cli_{}_{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("definitely/not/here.bk")).unwrap_err();
        assert!(err.message.starts_with("Cannot access file"));
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }

    #[test]
    fn test_read_source_names_the_buffer() {
        let path = write_temp("named.bk", "let x: i32 = 1;");
        let source = read_source(&path).unwrap();
        assert_eq!(source.name, path.display().to_string());
        assert_eq!(source.text, "let x: i32 = 1;");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_check_file_ok() {
        let path = write_temp("ok.bk", "fn main() { return 1 + 2; }");
        assert_eq!(check_file(&path, ReportStyle::Frame).unwrap(), ExitCode::SUCCESS);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_check_file_reports_compile_error() {
        let path = write_temp("bad.bk", "let x: i32 = 1 @ 2;");
        let err = check_file(&path, ReportStyle::Frame).unwrap_err();
        assert!(err.message.is_empty(), "error should already be printed");
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_render_fancy_labels_the_source() {
        let source = SourceFile::new("main.bk", "let x: i32 = 1 / 0;");
        let err = parser::parse(&lexer::lex(&source.text).unwrap()).unwrap_err();
        let rendered = render_fancy(&source, &err, GraphicalTheme::unicode_nocolor());
        assert!(rendered.contains("brisk::"), "{rendered}");
        assert!(rendered.contains("division by zero"), "{rendered}");
        assert!(rendered.contains("main.bk"), "{rendered}");
        assert!(rendered.contains("let x: i32 = 1 / 0;"), "{rendered}");
    }

    #[test]
    fn test_render_tokens() {
        let tokens = lexer::lex("let x").unwrap();
        let rendered = render_tokens(&tokens);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0..3"));
        assert!(lines[0].contains("'let'"));
        assert!(lines[1].starts_with("4..5"));
        assert!(lines[1].contains("identifier"));
        assert!(lines[1].ends_with(" x"));
    }
}
