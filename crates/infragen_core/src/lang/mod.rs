//! Generator vocabulary registries.
//!
//! Callers work with stable IDs (e.g. [`functions::FunctionId`]) and look up spellings and metadata via registry
//! tables instead of scattering string comparisons across the generator.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no model types, no IO, no side effects.
//!
//! ## Examples
//! ```rust
//! use infragen_core::lang::functions::{self, FunctionId};
//!
//! assert_eq!(functions::from_str("toJSON"), Some(FunctionId::ToJson));
//! assert_eq!(functions::as_str(FunctionId::ToJson), "toJSON");
//! ```

pub mod functions;
pub mod go_keywords;
pub mod runtime;
