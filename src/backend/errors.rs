//! Define error types for program generation.
//!
//! These are *fatal* failures: generation stops and no source is produced. Non-fatal problems (unknown functions,
//! failed attribute traversals) are reported as [`infragen_model::Diagnostics`] instead.
//!
//! ## Notes
//!
//! - Every configuration error names the node it was found in, so users can locate it in their program.
//! - [`GenerationError::Internal`] carries the full generated source for bug reports.

use miette::Diagnostic;
use thiserror::Error;

/// Fatal error during program generation.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerationError {
    #[error("could not find package information for `{package}` (resource `{node}` with type token `{token}`)")]
    #[diagnostic(
        code(infragen::missing_package),
        help("add the package and its version to the program's package list")
    )]
    MissingPackage { node: String, token: String, package: String },

    #[error("malformed type token `{token}` in `{node}`: {reason}")]
    #[diagnostic(
        code(infragen::malformed_token),
        help("type tokens have the form `package:module:Member`")
    )]
    MalformedToken { node: String, token: String, reason: String },

    #[error("function `{function}` in `{node}` expects {expected} argument(s), found {found}")]
    #[diagnostic(code(infragen::arity))]
    Arity {
        node: String,
        function: String,
        expected: String,
        found: usize,
    },

    #[error("nodes `{first}` and `{second}` both map to the Go identifier `{ident}`")]
    #[diagnostic(
        code(infragen::identifier_clash),
        help("rename one of the nodes so their names differ in more than punctuation")
    )]
    IdentifierClash { first: String, second: String, ident: String },

    #[error("unsupported construct in `{node}`: {message}")]
    #[diagnostic(code(infragen::unsupported))]
    Unsupported { node: String, message: String },

    #[error("internal error: {message}")]
    #[diagnostic(
        code(infragen::internal),
        help("this is a generator bug; please report it together with the generated source")
    )]
    Internal { message: String, generated: String },
}

impl GenerationError {
    /// Whether this error is an internal-consistency failure rather than a problem with the input.
    pub fn is_internal(&self) -> bool {
        matches!(self, GenerationError::Internal { .. })
    }

    /// Generated source attached to an internal error.
    pub fn generated_source(&self) -> Option<&str> {
        match self {
            GenerationError::Internal { generated, .. } => Some(generated),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_package_names_node_and_token() {
        let err = GenerationError::MissingPackage {
            node: "bucket".into(),
            token: "aws:s3/bucket:Bucket".into(),
            package: "aws".into(),
        };
        let message = err.to_string();
        assert!(message.contains("bucket"));
        assert!(message.contains("aws:s3/bucket:Bucket"));
        assert_eq!(err.code().map(|c| c.to_string()).as_deref(), Some("infragen::missing_package"));
        assert!(!err.is_internal());
    }

    #[test]
    fn test_internal_error_keeps_source() {
        let err = GenerationError::Internal {
            message: "unbalanced delimiters".into(),
            generated: "package main\n{".into(),
        };
        assert!(err.is_internal());
        assert_eq!(err.generated_source(), Some("package main\n{"));
    }
}
