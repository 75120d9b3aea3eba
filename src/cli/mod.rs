//! CLI module for the Brisk front end
//!
//! ## Usage
//!
//! - `brisk <file>` - Lex and parse a file, reporting the first error
//! - `brisk --lex <file>` - Dump the token stream (debug)
//! - `brisk --parse <file>` - Dump the AST (debug)
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::path::PathBuf;
use std::process;

use clap::Parser;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. An empty message means the
/// failure was already reported (for example a rendered compile error).
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// A failure whose diagnostic has already been written to stderr.
    pub fn reported() -> Self {
        Self::new("", ExitCode::FAILURE)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Front end for the Brisk programming language
#[derive(Parser, Debug)]
#[command(name = "brisk")]
#[command(version = crate::BRISK_VERSION)]
#[command(about = "Lex and parse Brisk source files", long_about = None)]
pub struct Cli {
    /// File to check (default action)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE", conflicts_with_all = ["file", "parse_file"])]
    pub lex_file: Option<PathBuf>,

    /// Parse only and dump the tree (debug)
    #[arg(long = "parse", value_name = "FILE", conflicts_with = "file")]
    pub parse_file: Option<PathBuf>,

    /// Render errors with miette's graphical report instead of the boxed frame
    #[arg(long)]
    pub fancy: bool,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    let style = if cli.fancy {
        commands::ReportStyle::Fancy
    } else {
        commands::ReportStyle::Frame
    };

    if let Some(file) = cli.lex_file {
        return commands::lex_file(&file, style);
    }
    if let Some(file) = cli.parse_file {
        return commands::parse_file(&file, style);
    }
    match cli.file {
        Some(file) => commands::check_file(&file, style),
        None => Err(CliError::failure("Error: no input file (try 'brisk --help')")),
    }
}

// ============================================================================
// Tests
// ============================================================================
