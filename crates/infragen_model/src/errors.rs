//! Error types for reading programs.

use thiserror::Error;

/// A program could not be read.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid program JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate node name `{0}`")]
    DuplicateNode(String),
}

/// A type token does not have the `package:module:member` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed type token `{token}`: expected 3 `:`-separated components, found {found}")]
pub struct TokenError {
    pub token: String,
    pub found: usize,
}

/// A package version string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid package version `{version}`: {reason}")]
pub struct VersionError {
    pub version: String,
    pub reason: String,
}

/// Attribute or index traversal over a type failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    #[error("type `{ty}` has no attribute `{attr}`")]
    NoSuchAttribute { attr: String, ty: String },
    #[error("cannot traverse into a value of type `{ty}`")]
    NotTraversable { ty: String },
}
