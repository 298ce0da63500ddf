//! Node emission: the per-node state machine and the program frame around it.
//!
//! Each node is lowered, its temporaries are emitted, and then the node's own statement:
//! - resource: `name, err := module.NewType(ctx, "name", args)` and the error check,
//! - output: `ctx.Export("name", value)`,
//! - local: `name := value`, or `name, err := call` plus the check when the value is a fallible call.

use infragen_core::FunctionTable;
use infragen_core::lang::functions::FunctionId;
use infragen_core::lang::runtime::{CONTEXT_IDENT, ERROR_IDENT, RUNTIME_MODULE};
use infragen_core::naming::{go_string_literal, title_case};
use infragen_model::{Diagnostic, Diagnostics, Expression, Node, Resource, Type, TypeToken, Variable};

use super::GenerationError;
use super::context::TranslationContext;
use super::expressions::{ExprPrinter, PrintError};
use super::go_emitter::GoEmitter;
use super::imports::ImportSet;
use super::lower::{Lowered, ValueContext, lower_expression};
use super::options::GenerateOptions;
use super::temps::emit_temps;

/// Go program generator for one run.
pub struct GoGenerator<'a> {
    ctx: TranslationContext<'a>,
    emitter: GoEmitter,
}

impl<'a> GoGenerator<'a> {
    /// Fails when two nodes map to the same Go identifier.
    pub fn new(
        nodes: &[Node],
        imports: &ImportSet,
        functions: &'a dyn FunctionTable,
        options: &'a GenerateOptions,
    ) -> Result<Self, GenerationError> {
        Ok(Self {
            ctx: TranslationContext::new(nodes, imports, functions, options)?,
            emitter: GoEmitter::new(),
        })
    }

    /// Raw (unformatted) source and the diagnostics collected so far.
    pub fn finish(self) -> (String, Diagnostics) {
        (self.emitter.finish(), self.ctx.diagnostics)
    }

    /// Package clause, import block, and the opening of `main` and `pulumi.Run`.
    pub fn gen_preamble(&mut self, imports: &ImportSet) {
        self.emitter.line("package main");
        self.emitter.blank_line();
        self.emitter.line("import (");
        self.emitter.indented(|e| {
            for module in imports.utility_modules() {
                e.line(&go_string_literal(module));
            }
            e.blank_line();
            e.line(&go_string_literal(RUNTIME_MODULE));
            for module in imports.provider_modules() {
                e.line(&go_string_literal(module));
            }
        });
        self.emitter.line(")");
        self.emitter.blank_line();
        self.emitter.line("func main() {");
        self.emitter.indent();
        self.emitter
            .line(&format!("pulumi.Run(func({CONTEXT_IDENT} *pulumi.Context) error {{"));
        self.emitter.indent();
    }

    /// Close `pulumi.Run` and `main`.
    pub fn gen_postamble(&mut self) {
        self.emitter.line("return nil");
        self.emitter.dedent();
        self.emitter.line("})");
        self.emitter.dedent();
        self.emitter.line("}");
    }

    pub fn gen_node(&mut self, node: &Node) -> Result<(), GenerationError> {
        tracing::debug!(node = node.name(), "emitting node");
        self.check_fallible_calls(node);
        match node {
            Node::Resource(resource) => self.gen_resource(resource),
            Node::OutputVariable(var) => self.gen_output_assignment(var),
            Node::LocalVariable(var) => self.gen_local_variable(var),
        }
    }

    fn gen_resource(&mut self, resource: &Resource) -> Result<(), GenerationError> {
        let token = TypeToken::parse(&resource.token).map_err(|e| GenerationError::MalformedToken {
            node: resource.name.clone(),
            token: resource.token.clone(),
            reason: e.to_string(),
        })?;

        let mut fields = Vec::with_capacity(resource.inputs.len());
        for attr in &resource.inputs {
            let dest = match resource.input_type.traverse_attr(&attr.name) {
                Ok(ty) => ty,
                Err(e) => {
                    self.ctx.diagnostics.push(
                        Diagnostic::warning(format!("unknown input `{}`", attr.name))
                            .with_subject(&resource.name)
                            .with_detail(e.to_string()),
                    );
                    Type::Dynamic
                }
            };
            let lowered = lower_expression(&mut self.ctx, &resource.name, &attr.value, &dest, ValueContext::Input)?;
            let value = self.emit_lowered(&resource.name, &lowered)?;
            fields.push((title_case(&attr.name), value));
        }

        let qualifier = token.qualifier();
        let member = title_case(&token.member);
        let ident = self.ctx.names.ident(&resource.name);
        let head = format!(
            "{ident}, {ERROR_IDENT} := {qualifier}.New{member}({CONTEXT_IDENT}, {}, ",
            go_string_literal(&resource.name)
        );
        if fields.is_empty() {
            self.emitter.line(&format!("{head}nil)"));
        } else {
            self.emitter.line(&format!("{head}&{qualifier}.{member}Args{{"));
            self.emitter.indented(|e| {
                for (field, value) in &fields {
                    e.line(&format!("{field}: {value},"));
                }
            });
            self.emitter.line("})");
        }
        self.emitter.if_err_return();
        Ok(())
    }

    fn gen_output_assignment(&mut self, var: &Variable) -> Result<(), GenerationError> {
        let lowered = lower_expression(&mut self.ctx, &var.name, &var.value, &var.ty, ValueContext::Output)?;
        let value = self.emit_lowered(&var.name, &lowered)?;
        self.emitter.line(&format!(
            "{CONTEXT_IDENT}.Export({}, {value})",
            go_string_literal(&var.name)
        ));
        Ok(())
    }

    fn gen_local_variable(&mut self, var: &Variable) -> Result<(), GenerationError> {
        let lowered = lower_expression(&mut self.ctx, &var.name, &var.value, &var.ty, ValueContext::Output)?;
        let value = self.emit_lowered(&var.name, &lowered)?;
        let ident = self.ctx.names.ident(&var.name);
        let fallible = lowered
            .expr
            .call_name()
            .is_some_and(|name| self.ctx.functions.is_fallible(name));
        if fallible {
            self.emitter.line(&format!("{ident}, {ERROR_IDENT} := {value}"));
            self.emitter.if_err_return();
        } else {
            self.emitter.line(&format!("{ident} := {value}"));
        }
        Ok(())
    }

    /// Emit the temporaries of a lowered value, then render the value itself.
    fn emit_lowered(&mut self, subject: &str, lowered: &Lowered) -> Result<String, GenerationError> {
        let printer = ExprPrinter::new(self.ctx.functions, &self.ctx.names);
        let result = emit_temps(&mut self.emitter, &printer, &lowered.temps).and_then(|()| printer.render(&lowered.expr));
        result.map_err(|e| self.print_error(subject, e))
    }

    fn print_error(&self, subject: &str, error: PrintError) -> GenerationError {
        let node = subject.to_string();
        match error {
            PrintError::Unlowered(what) => GenerationError::Internal {
                message: format!("{what} in `{subject}` reached the printer without being lowered"),
                generated: self.emitter.as_str().to_string(),
            },
            PrintError::Arity {
                function,
                expected,
                found,
            } => GenerationError::Arity {
                node,
                function,
                expected,
                found,
            },
            PrintError::MalformedToken { token, reason } => GenerationError::MalformedToken { node, token, reason },
            PrintError::Unsupported(message) => GenerationError::Unsupported { node, message },
        }
    }

    /// Warn about invokes whose `(value, error)` result cannot be used where they appear.
    ///
    /// Only the whole value of a local binding may be an invoke.
    fn check_fallible_calls(&mut self, node: &Node) {
        let root: Option<&Expression> = match node {
            Node::LocalVariable(var) => Some(&var.value),
            _ => None,
        };
        let mut misplaced = 0usize;
        for expr in node.expressions() {
            expr.walk(&mut |e| {
                let is_root = root.is_some_and(|r| std::ptr::eq(r, e));
                let is_invoke = e
                    .call_name()
                    .and_then(|name| self.ctx.functions.lookup(name))
                    .is_some_and(|f| f.id == FunctionId::Invoke);
                if is_invoke && !is_root {
                    misplaced += 1;
                }
            });
        }
        for _ in 0..misplaced {
            self.ctx.warn(
                node.name(),
                "invoke used inside an expression",
                "only the whole value of a local binding may be an invoke; bind it to a local first",
            );
        }
    }
}
