//! Output writer with indentation and blank-line tracking
//!
//! The formatter decides each line's nesting level; the writer renders the indentation and applies the blank-line
//! policy (collapse runs, no blank lines right after an opening line or right before a closing line).

use super::config::FormatConfig;

/// Shape of a written line, as far as blank-line placement is concerned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineShape {
    /// The line begins with a closing delimiter
    pub starts_with_closer: bool,
    /// The line's last code character is an opening delimiter
    pub ends_with_opener: bool,
}

/// Writer that tracks indentation and builds formatted output
pub struct FormatWriter {
    /// The output buffer
    output: String,
    /// Text of one indentation level
    indent_unit: String,
    /// Configuration
    config: FormatConfig,
    /// Blank lines seen since the last written line
    pending_blank_lines: usize,
    /// Whether the last written line opened a block
    after_opener: bool,
}

impl FormatWriter {
    /// Create a new format writer with the given config
    pub fn new(config: FormatConfig) -> Self {
        Self {
            output: String::new(),
            indent_unit: config.indent_unit(),
            config,
            pending_blank_lines: 0,
            after_opener: false,
        }
    }

    /// Get the formatted output; trailing blank lines are dropped
    pub fn finish(self) -> String {
        self.output
    }

    /// Record a blank line (emitted lazily, only if content follows)
    pub fn blank_line(&mut self) {
        if !self.output.is_empty() {
            self.pending_blank_lines += 1;
        }
    }

    /// Write a trimmed line at the given nesting level
    pub fn line(&mut self, level: usize, text: &str, shape: LineShape) {
        let keep_blanks = !self.after_opener && !shape.starts_with_closer;
        self.flush_blank_lines(keep_blanks);
        for _ in 0..level {
            self.output.push_str(&self.indent_unit);
        }
        self.output.push_str(text);
        self.output.push('\n');
        self.after_opener = shape.ends_with_opener;
    }

    /// Write a line exactly as given (continuation of a multi-line raw string)
    pub fn verbatim(&mut self, text: &str) {
        self.flush_blank_lines(true);
        self.output.push_str(text);
        self.output.push('\n');
        self.after_opener = false;
    }

    fn flush_blank_lines(&mut self, keep: bool) {
        if keep {
            let count = self.pending_blank_lines.min(self.config.max_blank_lines);
            for _ in 0..count {
                self.output.push('\n');
            }
        }
        self.pending_blank_lines = 0;
    }
}
