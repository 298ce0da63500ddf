//! Naming helpers shared by the generator: Go identifiers, exported names and string literals.

use crate::lang::{go_keywords, runtime};

/// Upper-case the first character (`bucketName` -> `BucketName`).
pub fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turn an arbitrary program name into a valid, non-reserved Go identifier.
///
/// Characters that are not letters, digits or `_` become `_`; a leading digit gets a `_` prefix; Go keywords and
/// names the generated program uses itself get a `_` suffix.
///
/// ## Examples
/// ```rust
/// use infragen_core::naming::go_identifier;
///
/// assert_eq!(go_identifier("my-bucket"), "my_bucket");
/// assert_eq!(go_identifier("type"), "type_");
/// assert_eq!(go_identifier("2nd"), "_2nd");
/// ```
pub fn go_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() {
        return "_".to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if go_keywords::is_keyword(&ident) || runtime::is_reserved_identifier(&ident) {
        ident.push('_');
    }
    ident
}

/// Render a Go interpreted string literal (double-quoted, escaped).
pub fn go_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
