//! Program function vocabulary.
//!
//! This module defines the canonical set of functions a program's expressions may call, together with what the
//! generated Go program needs for each of them: the utility modules to import, the accepted argument counts, and
//! whether the generated call is fallible (returns a `(value, error)` pair).
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Aliases exist for source-language spellings that mean the same thing (e.g. `"jsonencode"` for `"toJSON"`).
//! - The generator reaches this table through the [`FunctionTable`] trait so callers can supply their own.
//!
//! ## Examples
//! ```rust
//! use infragen_core::lang::functions::{self, FunctionId};
//!
//! assert_eq!(functions::from_str("toJSON"), Some(FunctionId::ToJson));
//! assert_eq!(functions::from_str("jsonencode"), Some(FunctionId::ToJson));
//! assert_eq!(functions::info_for(FunctionId::ToJson).utility_modules, &["encoding/json"]);
//! ```

use std::fmt;

/// Stable identifier for a program function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionId {
    ToJson,
    Invoke,
    FileAsset,
    FileArchive,
    ToBase64,
    Join,
    Split,
    MimeType,
    Length,
    Element,
}

/// Accepted argument counts for a function (inclusive bounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: usize,
}

impl Arity {
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Whether a call with `count` arguments is well-formed.
    pub fn accepts(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{} to {}", self.min, self.max)
        }
    }
}

/// Metadata for a program function.
#[derive(Debug, Clone, Copy)]
pub struct FunctionInfo {
    pub id: FunctionId,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    /// Go modules the generated call needs in the import block.
    pub utility_modules: &'static [&'static str],
    pub arity: Arity,
    /// The generated call returns `(value, error)` and must be checked.
    pub fallible: bool,
}

const fn info(
    id: FunctionId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
    utility_modules: &'static [&'static str],
    arity: Arity,
) -> FunctionInfo {
    FunctionInfo {
        id,
        canonical,
        aliases,
        description,
        utility_modules,
        arity,
        fallible: false,
    }
}

const fn fallible(mut item: FunctionInfo) -> FunctionInfo {
    item.fallible = true;
    item
}

/// Registry of all program functions.
pub const FUNCTIONS: &[FunctionInfo] = &[
    info(
        FunctionId::ToJson,
        "toJSON",
        &["jsonencode"],
        "Serialize a value to a JSON-encoded string.",
        &["encoding/json"],
        Arity::exactly(1),
    ),
    fallible(info(
        FunctionId::Invoke,
        "invoke",
        &[],
        "Call a provider data-source function identified by a type token.",
        &[],
        Arity::between(1, 2),
    )),
    info(
        FunctionId::FileAsset,
        "fileAsset",
        &[],
        "Create an asset from a file on disk.",
        &[],
        Arity::exactly(1),
    ),
    info(
        FunctionId::FileArchive,
        "fileArchive",
        &[],
        "Create an archive from a file or directory on disk.",
        &[],
        Arity::exactly(1),
    ),
    info(
        FunctionId::ToBase64,
        "toBase64",
        &["base64encode"],
        "Encode a string as standard base64.",
        &["encoding/base64"],
        Arity::exactly(1),
    ),
    info(
        FunctionId::Join,
        "join",
        &[],
        "Join a list of strings with a separator.",
        &["strings"],
        Arity::exactly(2),
    ),
    info(
        FunctionId::Split,
        "split",
        &[],
        "Split a string on a separator.",
        &["strings"],
        Arity::exactly(2),
    ),
    info(
        FunctionId::MimeType,
        "mimeType",
        &[],
        "Guess the MIME type of a path from its extension.",
        &["mime", "path"],
        Arity::exactly(1),
    ),
    info(
        FunctionId::Length,
        "length",
        &[],
        "Return the length of a list, map or string.",
        &[],
        Arity::exactly(1),
    ),
    info(
        FunctionId::Element,
        "element",
        &[],
        "Return the element of a list at an index.",
        &[],
        Arity::exactly(2),
    ),
];

/// Return the canonical spelling for a function.
pub fn as_str(id: FunctionId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a function.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: FunctionId) -> &'static FunctionInfo {
    FUNCTIONS
        .iter()
        .find(|f| f.id == id)
        .expect("function info missing")
}

/// Resolve a spelling (canonical or alias) to a function identifier.
pub fn from_str(name: &str) -> Option<FunctionId> {
    if let Some(f) = FUNCTIONS.iter().find(|f| f.canonical == name) {
        return Some(f.id);
    }
    FUNCTIONS
        .iter()
        .find(|f| {
            let aliases: &[&str] = f.aliases;
            aliases.contains(&name)
        })
        .map(|f| f.id)
}

/// Lookup seam between the generator and the function vocabulary.
///
/// The generator never matches on function-name strings directly; it asks a table. [`Builtins`] serves the
/// registry above, and embedders can provide a table with extra or restricted functions.
pub trait FunctionTable {
    /// Metadata for a function name, or `None` if the name is not recognized.
    fn lookup(&self, name: &str) -> Option<&FunctionInfo>;

    /// Go modules a call to `name` requires (empty for unknown functions).
    fn utility_modules(&self, name: &str) -> &[&'static str] {
        self.lookup(name).map(|f| f.utility_modules).unwrap_or(&[])
    }

    /// Whether a call to `name` produces a fallible `(value, error)` pair.
    fn is_fallible(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|f| f.fallible)
    }
}

/// The default [`FunctionTable`], backed by [`FUNCTIONS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Builtins;

impl FunctionTable for Builtins {
    fn lookup(&self, name: &str) -> Option<&FunctionInfo> {
        from_str(name).map(info_for)
    }
}
