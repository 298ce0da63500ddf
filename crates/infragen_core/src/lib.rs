//! Provide the shared, pure vocabulary of the infragen code generator.
//!
//! This crate is intentionally small and dependency-free. It contains deterministic tables and helpers that the
//! generator consults when it lowers expressions and emits Go:
//! - the function registry (which program functions exist, which Go modules they need, which are fallible),
//! - Go keyword and identifier rules,
//! - the SDK runtime conventions (module paths, well-known identifiers).
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no model types.

pub mod lang;
pub mod naming;

pub use lang::functions::{Arity, Builtins, FunctionId, FunctionInfo, FunctionTable};
