//! Core formatting logic for generated Go source
//!
//! Scans the source line by line, tracking literal and comment state plus a stack of open delimiters. The stack
//! decides each line's nesting level; the scan also rejects text that cannot be valid Go (mismatched delimiters,
//! unterminated literals).

use thiserror::Error;

use super::config::FormatConfig;
use super::writer::{FormatWriter, LineShape};

/// The source could not be formatted because it is structurally invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct FormatError {
    pub line: usize,
    pub message: String,
}

impl FormatError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    Str,
    RawStr,
    Rune,
    BlockComment,
}

/// An unclosed delimiter and the nesting level of the line that opened it.
#[derive(Debug, Clone, Copy)]
struct Opener {
    ch: char,
    line: usize,
    level: usize,
}

fn closer_for(opener: char) -> char {
    match opener {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// Formatter that re-indents and normalizes Go source
pub struct Formatter {
    writer: FormatWriter,
    state: ScanState,
    stack: Vec<Opener>,
    /// Line where the current multi-line literal or comment started
    literal_line: usize,
}

impl Formatter {
    /// Create a new formatter with the given config
    pub fn new(config: FormatConfig) -> Self {
        Self {
            writer: FormatWriter::new(config),
            state: ScanState::Code,
            stack: Vec::new(),
            literal_line: 0,
        }
    }

    /// Format a complete source file
    pub fn format(mut self, source: &str) -> Result<String, FormatError> {
        for (idx, raw_line) in source.lines().enumerate() {
            let line_no = idx + 1;
            if self.state == ScanState::RawStr {
                let level = self.current_level();
                self.scan_line(raw_line, line_no, level)?;
                self.writer.verbatim(raw_line);
                continue;
            }

            let trimmed = raw_line.trim();
            if trimmed.is_empty() {
                self.writer.blank_line();
                continue;
            }

            let starts_with_closer = self.state == ScanState::Code && trimmed.starts_with([')', ']', '}']);
            let level = match self.stack.last() {
                Some(top) if starts_with_closer => top.level,
                Some(top) => top.level + 1,
                None => 0,
            };
            let ends_with_opener = self.scan_line(trimmed, line_no, level)?;
            self.writer.line(
                level,
                trimmed,
                LineShape {
                    starts_with_closer,
                    ends_with_opener,
                },
            );
        }
        self.finish_scan()?;
        Ok(self.writer.finish())
    }

    fn current_level(&self) -> usize {
        self.stack.last().map(|top| top.level + 1).unwrap_or(0)
    }

    /// Scan one line, updating literal state and the delimiter stack.
    ///
    /// Returns whether the last code character on the line opened a delimiter.
    fn scan_line(&mut self, text: &str, line_no: usize, level: usize) -> Result<bool, FormatError> {
        let mut chars = text.chars().peekable();
        let mut last_code: Option<char> = None;
        while let Some(c) = chars.next() {
            match self.state {
                ScanState::Code => match c {
                    '"' => {
                        self.state = ScanState::Str;
                        last_code = Some(c);
                    }
                    '\'' => {
                        self.state = ScanState::Rune;
                        last_code = Some(c);
                    }
                    '`' => {
                        self.state = ScanState::RawStr;
                        self.literal_line = line_no;
                        last_code = Some(c);
                    }
                    '/' if chars.peek() == Some(&'/') => break,
                    '/' if chars.peek() == Some(&'*') => {
                        chars.next();
                        self.state = ScanState::BlockComment;
                        self.literal_line = line_no;
                    }
                    '(' | '[' | '{' => {
                        self.stack.push(Opener { ch: c, line: line_no, level });
                        last_code = Some(c);
                    }
                    ')' | ']' | '}' => {
                        self.close(c, line_no)?;
                        last_code = Some(c);
                    }
                    c if c.is_whitespace() => {}
                    _ => last_code = Some(c),
                },
                ScanState::Str | ScanState::Rune => {
                    let quote = if self.state == ScanState::Str { '"' } else { '\'' };
                    if c == '\\' {
                        chars.next();
                    } else if c == quote {
                        self.state = ScanState::Code;
                    }
                }
                ScanState::RawStr => {
                    if c == '`' {
                        self.state = ScanState::Code;
                    }
                }
                ScanState::BlockComment => {
                    if c == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        self.state = ScanState::Code;
                    }
                }
            }
        }
        match self.state {
            ScanState::Str => Err(FormatError::new(line_no, "unterminated string literal")),
            ScanState::Rune => Err(FormatError::new(line_no, "unterminated rune literal")),
            _ => Ok(matches!(last_code, Some('(' | '[' | '{'))),
        }
    }

    fn close(&mut self, closer: char, line_no: usize) -> Result<(), FormatError> {
        match self.stack.pop() {
            Some(open) if closer_for(open.ch) == closer => Ok(()),
            Some(open) => Err(FormatError::new(
                line_no,
                format!(
                    "mismatched `{closer}`: expected `{}` to close `{}` opened on line {}",
                    closer_for(open.ch),
                    open.ch,
                    open.line
                ),
            )),
            None => Err(FormatError::new(line_no, format!("unexpected `{closer}` with no open delimiter"))),
        }
    }

    fn finish_scan(&self) -> Result<(), FormatError> {
        match self.state {
            ScanState::RawStr => return Err(FormatError::new(self.literal_line, "unterminated raw string literal")),
            ScanState::BlockComment => return Err(FormatError::new(self.literal_line, "unterminated block comment")),
            ScanState::Code | ScanState::Str | ScanState::Rune => {}
        }
        match self.stack.last() {
            Some(open) => Err(FormatError::new(open.line, format!("unclosed `{}`", open.ch))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(source: &str) -> Result<String, FormatError> {
        Formatter::new(FormatConfig::default()).format(source)
    }

    #[test]
    fn test_reindents_nested_blocks() {
        let source = "func main() {\nif x {\ny()\n} else {\nz()\n}\n}\n";
        assert_eq!(
            format(source).unwrap(),
            "func main() {\n\tif x {\n\t\ty()\n\t} else {\n\t\tz()\n\t}\n}\n"
        );
    }

    #[test]
    fn test_multiple_openers_on_one_line_indent_once() {
        let source = "pulumi.Run(func(ctx *pulumi.Context) error {\nreturn nil\n})\n";
        assert_eq!(
            format(source).unwrap(),
            "pulumi.Run(func(ctx *pulumi.Context) error {\n\treturn nil\n})\n"
        );
    }

    #[test]
    fn test_delimiters_inside_literals_and_comments_ignored() {
        let source = "x := \"{(\" // }\ny := '}'\n/* {\n*/\n";
        assert_eq!(format(source).unwrap(), "x := \"{(\" // }\ny := '}'\n/* {\n*/\n");
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        assert_eq!(format("s := \"a\\\"{\"\n").unwrap(), "s := \"a\\\"{\"\n");
    }

    #[test]
    fn test_raw_string_lines_kept_verbatim() {
        let source = "x := `\n  keep {\n\n`\n";
        assert_eq!(format(source).unwrap(), "x := `\n  keep {\n\n`\n");
    }

    #[test]
    fn test_blank_line_normalization() {
        let source = "\n\nfunc f() {\n\n\ta()\n\n\n\tb()\n\n}\n\n\n";
        assert_eq!(format(source).unwrap(), "func f() {\n\ta()\n\n\tb()\n}\n");
    }

    #[test]
    fn test_trailing_whitespace_trimmed() {
        assert_eq!(format("a   \n  b\t\n").unwrap(), "a\nb\n");
    }

    #[test]
    fn test_mismatched_delimiter_reports_line() {
        let err = format("f(\n]\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("mismatched"));
    }

    #[test]
    fn test_unclosed_delimiter_reports_opening_line() {
        let err = format("a\nfunc f() {\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("unclosed"));
    }

    #[test]
    fn test_unexpected_closer() {
        assert!(format("}\n").is_err());
    }

    #[test]
    fn test_unterminated_literals() {
        assert_eq!(format("x := \"abc\n").unwrap_err().message, "unterminated string literal");
        assert_eq!(format("x := 'a\n").unwrap_err().message, "unterminated rune literal");
        assert_eq!(format("a\nx := `abc\n").unwrap_err().line, 2);
        assert!(format("/* open\n").is_err());
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(format("").unwrap(), "");
    }
}
