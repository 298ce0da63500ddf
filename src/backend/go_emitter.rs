//! Go code emitter - builds the raw statement buffer
//!
//! The buffer is indented as it is built, but the final layout comes from [`crate::format`]; multi-line expression
//! renderings are written as-is and re-indented there.

use infragen_core::lang::runtime::ERROR_IDENT;
use infragen_model::Type;

/// A buffer for building Go source code with indentation
#[derive(Debug)]
pub struct GoEmitter {
    buffer: String,
    indent_level: usize,
    indent_str: &'static str,
}

impl Default for GoEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl GoEmitter {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            indent_str: "\t",
        }
    }

    /// Get the generated code
    pub fn finish(self) -> String {
        self.buffer
    }

    /// Get current buffer as string slice
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Write a line with current indentation
    pub fn line(&mut self, s: &str) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent_str);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }

    /// Write a blank line
    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    /// Increase indent level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indent level
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Run `f` one indentation level deeper
    pub fn indented<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.indent();
        f(self);
        self.dedent();
    }

    /// Write a block with braces
    pub fn block<F>(&mut self, header: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.line(&format!("{header} {{"));
        self.indented(f);
        self.line("}");
    }

    /// Write the error check that follows every fallible call
    pub fn if_err_return(&mut self) {
        self.block(&format!("if {ERROR_IDENT} != nil"), |e| {
            e.line(&format!("return {ERROR_IDENT}"));
        });
    }
}

/// Go type for a plain (non-input) value of type `ty`
pub fn go_type_name(ty: &Type) -> String {
    match ty {
        Type::Bool => "bool".to_string(),
        Type::Int => "int".to_string(),
        Type::Number => "float64".to_string(),
        Type::String => "string".to_string(),
        Type::Dynamic => "interface{}".to_string(),
        Type::List(element) => format!("[]{}", go_type_name(element)),
        Type::Map(element) => format!("map[string]{}", go_type_name(element)),
        Type::Object(_) => "map[string]interface{}".to_string(),
        Type::Output(inner) => output_type_name(inner).to_string(),
    }
}

/// SDK output type holding a value of type `ty`
fn output_type_name(ty: &Type) -> &'static str {
    match ty {
        Type::Bool => "pulumi.BoolOutput",
        Type::Int => "pulumi.IntOutput",
        Type::Number => "pulumi.Float64Output",
        Type::String => "pulumi.StringOutput",
        Type::List(element) if **element == Type::String => "pulumi.StringArrayOutput",
        Type::Map(element) if **element == Type::String => "pulumi.StringMapOutput",
        Type::Output(inner) => output_type_name(inner),
        _ => "pulumi.AnyOutput",
    }
}
