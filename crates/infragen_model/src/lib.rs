//! Program model for the infragen generator: typed expressions, nodes, package metadata and diagnostics.
//!
//! The upstream binder (parser, type checker, linearizer) produces a [`Program`]: an already ordered list of nodes
//! whose expressions all carry a resolved [`Type`]. This crate only describes that shape and reads it from JSON; it
//! does not bind, check or reorder anything.
//!
//! ## Examples
//! ```rust
//! use infragen_model::{Node, Program};
//!
//! let program = Program::from_json(r#"{
//!     "packages": [{ "name": "aws", "version": "2.0.0" }],
//!     "nodes": [{ "kind": "resource", "name": "bucket", "token": "aws:s3/bucket:Bucket" }]
//! }"#).unwrap();
//! assert!(matches!(program.nodes[0], Node::Resource(_)));
//! ```

pub mod diagnostics;
pub mod errors;
pub mod expr;
pub mod node;
pub mod program;
pub mod token;
pub mod types;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use errors::{ModelError, TokenError, TraversalError, VersionError};
pub use expr::{BinaryOp, ExprKind, Expression, Literal, ObjectItem, Traverser};
pub use node::{Attribute, Node, Resource, Variable};
pub use program::{PackageDescriptor, PackageMetadata, Program, Version};
pub use token::TypeToken;
pub use types::{ObjectType, Type};
