//! infragen backend
//!
//! This module turns a bound, linearized program into Go source.
//!
//! The pipeline is:
//! 1. Import collection over every node (independent pass)
//! 2. Per node, in order: expression lowering -> temp emission -> node emission
//! 3. Preamble + statements + postamble -> Go formatter -> `main.go`
//!
//! ## Module Organization
//!
//! - `options.rs` - Generation options (`GenerateOptions`, `InputUnwrap`)
//! - `context.rs` - Per-run state: temp-name allocator, diagnostics
//! - `imports.rs` - Import collector
//! - `lower.rs` - Expression lowering and temp spilling
//! - `temps.rs` - Temp descriptors and their statements
//! - `expressions.rs` - Lowered expression -> Go expression
//! - `nodes.rs` - Node state machine, preamble and postamble
//! - `go_emitter.rs` - Low-level Go code string builder
//! - `program.rs` - Program-level entry points
//! - `errors.rs` - Fatal generation errors

#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod context;
pub mod errors;
pub mod expressions;
pub mod go_emitter;
pub mod imports;
pub mod lower;
pub mod nodes;
pub mod options;
pub mod program;
pub mod temps;

pub use errors::GenerationError;
pub use imports::{ImportSet, collect_imports};
pub use lower::{Lowered, ValueContext, lower_expression};
pub use options::{GenerateOptions, InputUnwrap};
pub use program::{GeneratedProgram, generate_program, generate_program_with};
pub use temps::TempDescriptor;
