//! Formatting configuration for generated Go
//!
//! Defaults follow `gofmt`: tab indentation, at most one consecutive blank line.

/// Indentation unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    Tabs,
    Spaces(usize),
}

/// Formatting configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Indentation unit for one nesting level
    pub indent_style: IndentStyle,
    /// Maximum run of consecutive blank lines kept
    pub max_blank_lines: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_style: IndentStyle::Tabs,
            max_blank_lines: 1,
        }
    }
}

impl FormatConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation style
    pub fn with_indent_style(mut self, style: IndentStyle) -> Self {
        self.indent_style = style;
        self
    }

    /// Indent with `width` spaces instead of tabs
    pub fn with_indent_spaces(self, width: usize) -> Self {
        self.with_indent_style(IndentStyle::Spaces(width))
    }

    /// Set the maximum run of blank lines
    pub fn with_max_blank_lines(mut self, count: usize) -> Self {
        self.max_blank_lines = count;
        self
    }

    /// The text of one indentation level
    pub fn indent_unit(&self) -> String {
        match self.indent_style {
            IndentStyle::Tabs => "\t".to_string(),
            IndentStyle::Spaces(width) => " ".repeat(width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_tabs() {
        let config = FormatConfig::default();
        assert_eq!(config.indent_style, IndentStyle::Tabs);
        assert_eq!(config.indent_unit(), "\t");
    }

    #[test]
    fn test_default_config_max_blank_lines() {
        assert_eq!(FormatConfig::default().max_blank_lines, 1);
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(FormatConfig::new(), FormatConfig::default());
    }

    #[test]
    fn test_with_indent_spaces() {
        let config = FormatConfig::new().with_indent_spaces(2);
        assert_eq!(config.indent_style, IndentStyle::Spaces(2));
        assert_eq!(config.indent_unit(), "  ");
        // Other fields unchanged
        assert_eq!(config.max_blank_lines, 1);
    }

    #[test]
    fn test_with_indent_spaces_zero() {
        assert_eq!(FormatConfig::new().with_indent_spaces(0).indent_unit(), "");
    }

    #[test]
    fn test_builder_chain_all() {
        let config = FormatConfig::new()
            .with_indent_style(IndentStyle::Spaces(4))
            .with_max_blank_lines(2);
        assert_eq!(config.indent_unit(), "    ");
        assert_eq!(config.max_blank_lines, 2);
    }
}
