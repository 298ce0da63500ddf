//! Generate a complete Go program from a bound program.
//!
//! This module implements the program-level API:
//!
//! - collecting imports (fatal on missing packages or malformed tokens),
//! - assigning each node its Go identifier (fatal when two nodes share one),
//! - emitting the preamble, every node in order, and the postamble,
//! - formatting the result.
//!
//! ## Notes
//!
//! - Generation is pure: it does not read or write files.
//! - The node order is the upstream linearizer's; it is never changed.
//!
//! ## See also
//!
//! - [`crate::backend::imports`]
//! - [`crate::backend::nodes`]
//! - [`crate::format`]

use std::collections::BTreeMap;

use infragen_core::{Builtins, FunctionTable};
use infragen_model::{Diagnostics, Node, PackageMetadata, Program};

use super::GenerationError;
use super::imports::collect_imports;
use super::nodes::GoGenerator;
use super::options::GenerateOptions;
use crate::format::{FormatConfig, format_go_source_with_config};

/// Generated artifacts and the non-fatal diagnostics produced while generating them.
#[derive(Debug, Clone, Default)]
pub struct GeneratedProgram {
    /// Artifact name -> file contents
    pub files: BTreeMap<String, Vec<u8>>,
    pub diagnostics: Diagnostics,
}

impl GeneratedProgram {
    /// Contents of an artifact as text.
    pub fn source(&self, name: &str) -> Option<&str> {
        self.files
            .get(name)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }
}

/// Generate a program with the built-in function table.
#[tracing::instrument(skip_all, fields(node_count = program.nodes.len()))]
pub fn generate_program(program: &Program, options: &GenerateOptions) -> Result<GeneratedProgram, GenerationError> {
    generate_program_with(&program.nodes, program, &Builtins, options)
}

/// Generate a program from already ordered `nodes`, with explicit package metadata and function table.
pub fn generate_program_with(
    nodes: &[Node],
    packages: &dyn PackageMetadata,
    functions: &dyn FunctionTable,
    options: &GenerateOptions,
) -> Result<GeneratedProgram, GenerationError> {
    let imports = collect_imports(nodes, packages, functions)?;

    let mut generator = GoGenerator::new(nodes, &imports, functions, options)?;
    generator.gen_preamble(&imports);
    for node in nodes {
        generator.gen_node(node)?;
    }
    generator.gen_postamble();
    let (source, diagnostics) = generator.finish();

    let formatted = finalize_source(&source, &options.format)?;
    let mut files = BTreeMap::new();
    files.insert(options.entry_file.clone(), formatted.into_bytes());
    tracing::debug!(diagnostics = diagnostics.len(), "generated program");
    Ok(GeneratedProgram { files, diagnostics })
}

/// Format assembled source; a rejection means the generator produced invalid Go.
fn finalize_source(source: &str, config: &FormatConfig) -> Result<String, GenerationError> {
    format_go_source_with_config(source, config).map_err(|e| GenerationError::Internal {
        message: format!("invalid Go source code: {e}"),
        generated: source.to_string(),
    })
}
