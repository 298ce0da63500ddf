#![forbid(unsafe_code)]
//! infragen: typed infrastructure programs to Go
//!
//! This crate turns a bound, linearized infrastructure program (resources, outputs, and local bindings with typed
//! expressions) into a Go program that declares the same resources through the provider SDKs. It provides the
//! backend (import collection, expression lowering, temp and node emission), a Go source formatter, and a CLI.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Generated code**: The generator emits `if err != nil { return err }` as *string literals*. Failures of the
//!   deployed program are reported at run time by that program, not by this crate.
//!
//! - **True invariants**: If a panic represents a generator bug (logic error), use `.expect("INVARIANT: reason")` with
//!   a clear explanation.

pub mod backend;
pub mod cli;
pub mod format;
pub mod version;

pub use infragen_model as model;

pub use backend::{GenerateOptions, GeneratedProgram, GenerationError, InputUnwrap, generate_program};
pub use format::{FormatConfig, check_formatted, format_go_source, format_go_source_with_config};
