//! SDK runtime conventions (module paths and well-known identifiers in generated programs).

/// Import path of the SDK runtime package (always imported).
pub const RUNTIME_MODULE: &str = "github.com/pulumi/pulumi/sdk/v2/go/pulumi";

/// Module component of a type token that denotes the package root.
pub const INDEX_MODULE: &str = "index";

/// Default artifact name of the generated program.
pub const ENTRY_FILE: &str = "main.go";

/// Name of the `*pulumi.Context` parameter inside `pulumi.Run`.
pub const CONTEXT_IDENT: &str = "ctx";

/// Name bound to the error half of every fallible call.
pub const ERROR_IDENT: &str = "err";

/// Encoder used by serialization temporaries.
pub const JSON_MARSHAL: &str = "json.Marshal";

/// Identifiers the generated program introduces itself (parameters and package qualifiers).
///
/// Node names that collide with these are escaped, and temporaries never take them.
pub const GENERATED_IDENTIFIERS: &[&str] = &[
    CONTEXT_IDENT,
    ERROR_IDENT,
    "pulumi",
    "json",
    "base64",
    "strings",
    "mime",
    "path",
];

/// Go predeclared identifiers the generated program relies on.
pub const PREDECLARED_IDENTIFIERS: &[&str] = &["nil", "true", "false", "len", "string"];

/// Check whether a name is taken by the generated program's own scaffolding.
pub fn is_reserved_identifier(name: &str) -> bool {
    GENERATED_IDENTIFIERS.contains(&name) || PREDECLARED_IDENTIFIERS.contains(&name)
}

/// Build the Go import path of a provider package module.
///
/// The version segment is present only for major versions above 1; `module` of `None` denotes the package root.
///
/// ## Examples
/// ```rust
/// use infragen_core::lang::runtime::provider_module_path;
///
/// assert_eq!(provider_module_path("aws", 1, Some("s3")), "github.com/pulumi/pulumi-aws/sdk/go/aws/s3");
/// assert_eq!(provider_module_path("aws", 2, Some("s3")), "github.com/pulumi/pulumi-aws/sdk/v2/go/aws/s3");
/// assert_eq!(provider_module_path("random", 3, None), "github.com/pulumi/pulumi-random/sdk/v3/go/random");
/// ```
pub fn provider_module_path(package: &str, major: u64, module: Option<&str>) -> String {
    let version = if major > 1 { format!("/v{major}") } else { String::new() };
    let mut path = format!("github.com/pulumi/pulumi-{package}/sdk{version}/go/{package}");
    if let Some(module) = module {
        path.push('/');
        path.push_str(module);
    }
    path
}

/// Go accessor for a resource property (`id`/`urn` are methods, everything else an exported field).
pub fn resource_property_accessor(name: &str) -> String {
    match name {
        "id" => "ID()".to_string(),
        "urn" => "URN()".to_string(),
        _ => crate::naming::title_case(name),
    }
}
