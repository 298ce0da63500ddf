//! Go source formatter
//!
//! Normalizes the generator's raw statement buffer into `gofmt`-shaped source and rejects text that is structurally
//! invalid:
//! - tab indentation driven by delimiter nesting
//! - trailing whitespace trimmed, blank-line runs collapsed
//! - no blank lines directly inside an opening or before a closing line
//! - exactly one trailing newline
//!
//! Formatting is idempotent: formatting formatted source returns it unchanged.

mod config;
mod formatter;
mod writer;

pub use config::{FormatConfig, IndentStyle};
pub use formatter::{FormatError, Formatter};

/// Format Go source with default settings
pub fn format_go_source(source: &str) -> Result<String, FormatError> {
    format_go_source_with_config(source, &FormatConfig::default())
}

/// Format Go source with custom configuration
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn format_go_source_with_config(source: &str, config: &FormatConfig) -> Result<String, FormatError> {
    Formatter::new(config.clone()).format(source)
}

/// Check if Go source is already formatted
pub fn check_formatted(source: &str, config: &FormatConfig) -> Result<bool, FormatError> {
    let formatted = format_go_source_with_config(source, config)?;
    Ok(source == formatted)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROGRAM: &str = r#"package main
import (
"github.com/pulumi/pulumi/sdk/v2/go/pulumi"
)
func main() {
pulumi.Run(func(ctx *pulumi.Context) error {
ctx.Export("x", pulumi.String("y"))
return nil
})
}"#;

    #[test]
    fn test_format_go_source_program() {
        let formatted = format_go_source(PROGRAM).unwrap();
        assert_eq!(
            formatted,
            "package main\nimport (\n\t\"github.com/pulumi/pulumi/sdk/v2/go/pulumi\"\n)\nfunc main() {\n\tpulumi.Run(func(ctx *pulumi.Context) error {\n\t\tctx.Export(\"x\", pulumi.String(\"y\"))\n\t\treturn nil\n\t})\n}\n"
        );
    }

    #[test]
    fn test_format_with_spaces() {
        let config = FormatConfig::new().with_indent_spaces(4);
        let formatted = format_go_source_with_config("f(\nx,\n)\n", &config).unwrap();
        assert_eq!(formatted, "f(\n    x,\n)\n");
    }

    #[test]
    fn test_check_formatted() {
        let config = FormatConfig::default();
        let formatted = format_go_source(PROGRAM).unwrap();
        assert!(check_formatted(&formatted, &config).unwrap());
        assert!(!check_formatted(PROGRAM, &config).unwrap());
    }

    #[test]
    fn test_check_formatted_invalid_source() {
        assert!(check_formatted("f(\n", &FormatConfig::default()).is_err());
    }
}
