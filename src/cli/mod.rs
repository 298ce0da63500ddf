//! CLI module for infragen
//!
//! This module provides the command-line interface for the generator.
//!
//! ## Commands
//!
//! - `generate <PROGRAM.json> [OUTPUT_DIR]` - Write the generated Go program to a directory
//! - `imports <PROGRAM.json> [--json]` - Print the utility and provider modules the program needs
//! - `--emit-go <PROGRAM.json>` - Print the generated entry file (debug)
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::backend::{GenerateOptions, InputUnwrap};
use crate::format::FormatConfig;
use crate::version::INFRAGEN_VERSION;

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
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
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
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Translate typed infrastructure programs into Go
#[derive(Parser, Debug)]
#[command(name = "infragen")]
#[command(version = INFRAGEN_VERSION)]
#[command(about = "Translate typed infrastructure programs into Go", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print the generated entry file instead of writing it (debug)
    #[arg(long = "emit-go", value_name = "PROGRAM")]
    pub emit_go_file: Option<PathBuf>,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

/// Flags shared by every command that generates code.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerationArgs {
    /// Name of the generated entry file
    #[arg(long = "entry-file", value_name = "NAME", global = true)]
    pub entry_file: Option<String>,

    /// How SDK input wrappers are removed before JSON serialization (deep, outermost, never)
    #[arg(long = "input-unwrap", value_name = "POLICY", global = true)]
    pub input_unwrap: Option<InputUnwrap>,

    /// Indent generated code with this many spaces instead of tabs
    #[arg(long = "indent-spaces", value_name = "N", global = true)]
    pub indent_spaces: Option<usize>,
}

impl GenerationArgs {
    /// Options for the backend; unset flags keep their defaults.
    pub fn to_options(&self) -> GenerateOptions {
        let mut options = GenerateOptions::new();
        if let Some(name) = &self.entry_file {
            options = options.with_entry_file(name.clone());
        }
        if let Some(policy) = self.input_unwrap {
            options = options.with_input_unwrap(policy);
        }
        if let Some(width) = self.indent_spaces {
            options = options.with_format(FormatConfig::new().with_indent_spaces(width));
        }
        options
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the Go program and write it to a directory
    Generate {
        /// Bound program (JSON)
        #[arg(value_name = "PROGRAM")]
        file: PathBuf,
        /// Output directory (default: infragen_output)
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Print the modules the generated program imports
    Imports {
        /// Bound program (JSON)
        #[arg(value_name = "PROGRAM")]
        file: PathBuf,
        /// Print the import sets as a JSON object
        #[arg(long)]
        json: bool,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
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
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let options = cli.generation.to_options();

    if let Some(file) = cli.emit_go_file {
        return commands::emit_go(&file, &options);
    }

    match cli.command {
        Some(Command::Generate { file, output_dir }) => commands::generate_files(&file, output_dir.as_deref(), &options),
        Some(Command::Imports { file, json }) => commands::print_imports(&file, json),
        // No command and no flag - show help
        None => Err(CliError::failure("Usage: infragen <generate|imports> <PROGRAM.json> (see --help)")),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::try_parse_from(["infragen", "generate", "program.json", "out"]).unwrap();
        match cli.command {
            Some(Command::Generate { file, output_dir }) => {
                assert_eq!(file, PathBuf::from("program.json"));
                assert_eq!(output_dir, Some(PathBuf::from("out")));
            }
            other => panic!("Expected Generate command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_imports() {
        let cli = Cli::try_parse_from(["infragen", "imports", "program.json", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Imports { json: true, .. })));
    }

    #[test]
    fn test_cli_parse_emit_go() {
        let cli = Cli::try_parse_from(["infragen", "--emit-go", "program.json"]).unwrap();
        assert_eq!(cli.emit_go_file, Some(PathBuf::from("program.json")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_generation_flags_map_onto_options() {
        let cli = Cli::try_parse_from([
            "infragen",
            "generate",
            "program.json",
            "--entry-file",
            "program.go",
            "--input-unwrap",
            "outermost",
            "--indent-spaces",
            "4",
        ])
        .unwrap();
        let options = cli.generation.to_options();
        assert_eq!(options.entry_file, "program.go");
        assert_eq!(options.input_unwrap, InputUnwrap::Outermost);
        assert_eq!(options.format.indent_unit(), "    ");
    }

    #[test]
    fn test_unset_flags_keep_defaults() {
        let cli = Cli::try_parse_from(["infragen", "imports", "program.json"]).unwrap();
        let options = cli.generation.to_options();
        assert_eq!(options.entry_file, "main.go");
        assert_eq!(options.input_unwrap, InputUnwrap::Deep);
        assert_eq!(options.format.indent_unit(), "\t");
    }

    #[test]
    fn test_invalid_input_unwrap_is_rejected() {
        assert!(Cli::try_parse_from(["infragen", "--input-unwrap", "sometimes", "imports", "p.json"]).is_err());
    }
}
