//! Generation options.

use std::fmt;
use std::str::FromStr;

use infragen_core::lang::runtime::ENTRY_FILE;

use crate::format::FormatConfig;

/// How much SDK input wrapping is stripped from a value before it is JSON-encoded.
///
/// Input conversions (`pulumi.String(..)`) are not meaningful to `json.Marshal`; the encoder needs the plain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputUnwrap {
    /// Strip every input conversion at any depth.
    #[default]
    Deep,
    /// Strip only a conversion wrapping the whole argument.
    Outermost,
    /// Encode the argument as lowered.
    Never,
}

impl InputUnwrap {
    pub fn as_str(self) -> &'static str {
        match self {
            InputUnwrap::Deep => "deep",
            InputUnwrap::Outermost => "outermost",
            InputUnwrap::Never => "never",
        }
    }
}

impl fmt::Display for InputUnwrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputUnwrap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deep" => Ok(InputUnwrap::Deep),
            "outermost" => Ok(InputUnwrap::Outermost),
            "never" => Ok(InputUnwrap::Never),
            other => Err(format!("unknown input unwrap policy `{other}` (expected deep, outermost or never)")),
        }
    }
}

/// Options for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Artifact name of the generated program.
    pub entry_file: String,
    pub input_unwrap: InputUnwrap,
    pub format: FormatConfig,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            entry_file: ENTRY_FILE.to_string(),
            input_unwrap: InputUnwrap::default(),
            format: FormatConfig::default(),
        }
    }
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry_file(mut self, name: impl Into<String>) -> Self {
        self.entry_file = name.into();
        self
    }

    pub fn with_input_unwrap(mut self, policy: InputUnwrap) -> Self {
        self.input_unwrap = policy;
        self
    }

    pub fn with_format(mut self, format: FormatConfig) -> Self {
        self.format = format;
        self
    }
}
