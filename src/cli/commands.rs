//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Component, Path, PathBuf};

use infragen_model::{Diagnostics, Program, Severity};

use crate::backend::{GenerateOptions, GeneratedProgram, GenerationError, collect_imports, generate_program};
use infragen_core::Builtins;

use super::{CliError, CliResult, ExitCode};

/// Maximum program file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// while deserializing.
const MAX_PROGRAM_SIZE: u64 = 100 * 1024 * 1024;

/// Default directory for `generate` when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "infragen_output";

/// Validate the output directory to prevent path traversal.
///
/// Rejects `..` components; absolute paths are allowed with a warning.
pub fn validate_output_dir(out_dir: &Path) -> CliResult<()> {
    if out_dir.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(CliError::failure(format!(
            "Output directory '{}' contains path traversal (..)",
            out_dir.display()
        )));
    }

    if out_dir.is_absolute() {
        tracing::warn!(
            "Using absolute output path: {}. Consider using a relative path.",
            out_dir.display()
        );
    }

    Ok(())
}

/// Artifact names must be plain file names inside the output directory.
fn validate_artifact_name(name: &str) -> CliResult<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(CliError::failure(format!(
            "Artifact name '{name}' must be a plain file name"
        ))),
    }
}

/// Read a program file.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_PROGRAM_SIZE` (100 MB)
pub fn read_source(file_path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(file_path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path.display(), e)))?;

    if metadata.len() > MAX_PROGRAM_SIZE {
        return Err(CliError::failure(format!(
            "Program file '{}' is too large ({} bytes, max {} bytes)",
            file_path.display(),
            metadata.len(),
            MAX_PROGRAM_SIZE
        )));
    }

    fs::read_to_string(file_path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path.display(), e)))
}

/// Read and deserialize a bound program.
pub fn load_program(file_path: &Path) -> CliResult<Program> {
    let source = read_source(file_path)?;
    Program::from_json(&source)
        .map_err(|e| CliError::failure(format!("Invalid program '{}': {}", file_path.display(), e)))
}

/// Render a fatal generation error with miette.
fn generation_failure(error: GenerationError) -> CliError {
    let report = miette::Report::new(error);
    CliError::failure(format!("{report:?}"))
}

/// Run the generator and report its diagnostics on stderr.
fn generate(program: &Program, options: &GenerateOptions) -> CliResult<GeneratedProgram> {
    let generated = generate_program(program, options).map_err(generation_failure)?;
    report_diagnostics(&generated.diagnostics);
    Ok(generated)
}

fn report_diagnostics(diagnostics: &Diagnostics) {
    let red = "\x1b[1;31m";
    let yellow = "\x1b[1;33m";
    let reset = "\x1b[0m";

    for diagnostic in diagnostics {
        let color = match diagnostic.severity {
            Severity::Error => red,
            Severity::Warning => yellow,
        };
        eprintln!("{color}{}{reset}", diagnostic);
    }
}

/// Print the generated entry file.
pub fn emit_go(file_path: &Path, options: &GenerateOptions) -> CliResult<ExitCode> {
    let program = load_program(file_path)?;
    let generated = generate(&program, options)?;
    let source = generated
        .source(&options.entry_file)
        .ok_or_else(|| CliError::failure(format!("No '{}' was generated", options.entry_file)))?;
    print!("{source}");
    Ok(ExitCode::SUCCESS)
}

/// Generate a program and write its artifacts under `output_dir`.
pub fn generate_files(file_path: &Path, output_dir: Option<&Path>, options: &GenerateOptions) -> CliResult<ExitCode> {
    let out_dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    validate_output_dir(&out_dir)?;
    validate_artifact_name(&options.entry_file)?;

    let program = load_program(file_path)?;
    let generated = generate(&program, options)?;

    let written = write_artifacts(&out_dir, &generated)?;
    for path in &written {
        println!("Generated: {}", path.display());
    }
    println!("✓ {} file(s) written to {}", written.len(), out_dir.display());
    Ok(ExitCode::SUCCESS)
}

/// Write every artifact of `generated` into `out_dir`, creating it if needed.
pub fn write_artifacts(out_dir: &Path, generated: &GeneratedProgram) -> CliResult<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .map_err(|e| CliError::failure(format!("Error creating '{}': {}", out_dir.display(), e)))?;

    let mut written = Vec::with_capacity(generated.files.len());
    for (name, contents) in &generated.files {
        validate_artifact_name(name)?;
        let path = out_dir.join(name);
        fs::write(&path, contents)
            .map_err(|e| CliError::failure(format!("Error writing '{}': {}", path.display(), e)))?;
        written.push(path);
    }
    Ok(written)
}

/// Print the utility and provider modules a program imports.
pub fn print_imports(file_path: &Path, as_json: bool) -> CliResult<ExitCode> {
    let program = load_program(file_path)?;
    let imports = collect_imports(&program.nodes, &program, &Builtins).map_err(generation_failure)?;

    if as_json {
        let value = serde_json::json!({
            "utility": imports.utility,
            "provider": imports.provider,
        });
        let rendered = serde_json::to_string_pretty(&value)
            .map_err(|e| CliError::failure(format!("Error rendering imports: {}", e)))?;
        println!("{rendered}");
        return Ok(ExitCode::SUCCESS);
    }

    println!("utility:");
    for module in imports.utility_modules() {
        println!("  {module}");
    }
    println!("provider:");
    for module in imports.provider_modules() {
        println!("  {module}");
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dir_rejects_parent_components() {
        assert!(validate_output_dir(Path::new("../elsewhere")).is_err());
        assert!(validate_output_dir(Path::new("out/../../x")).is_err());
        assert!(validate_output_dir(Path::new("out/go")).is_ok());
    }

    #[test]
    fn test_artifact_names_must_be_plain() {
        assert!(validate_artifact_name("main.go").is_ok());
        assert!(validate_artifact_name("../main.go").is_err());
        assert!(validate_artifact_name("sub/main.go").is_err());
        assert!(validate_artifact_name("").is_err());
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = read_source(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.message.contains("Cannot access file"));
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }
}
