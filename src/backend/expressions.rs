//! Render lowered expressions as Go expressions.
//!
//! The printer only sees lowered trees: conditionals and `toJSON` calls have been spilled into temporaries, and
//! input conversions are explicit [`ExprKind::Input`] nodes. Meeting either spilled shape here means lowering was
//! skipped, which is reported as [`PrintError::Unlowered`].
//!
//! Multi-line renderings (object literals, invoke arguments) put one item per line and leave indentation to the
//! formatter.

use infragen_core::lang::functions::FunctionId;
use infragen_core::lang::runtime::{CONTEXT_IDENT, resource_property_accessor};
use infragen_core::naming::{go_string_literal, title_case};
use infragen_core::FunctionTable;
use infragen_model::{ExprKind, Expression, Literal, ObjectItem, Traverser, Type, TypeToken};

use super::context::NodeNames;
use super::go_emitter::go_type_name;

/// Rendering failure; converted to a [`super::GenerationError`] naming the node being emitted.
#[derive(Debug, Clone, PartialEq)]
pub enum PrintError {
    /// A construct lowering should have removed reached the printer.
    Unlowered(&'static str),
    Arity {
        function: String,
        expected: String,
        found: usize,
    },
    MalformedToken {
        token: String,
        reason: String,
    },
    Unsupported(String),
}

/// Go expression printer for one program.
pub struct ExprPrinter<'a> {
    functions: &'a dyn FunctionTable,
    names: &'a NodeNames,
}

impl<'a> ExprPrinter<'a> {
    pub fn new(functions: &'a dyn FunctionTable, names: &'a NodeNames) -> Self {
        Self { functions, names }
    }

    /// Render a lowered expression.
    pub fn render(&self, expr: &Expression) -> Result<String, PrintError> {
        match &expr.kind {
            ExprKind::Literal { value } => render_literal(value),
            ExprKind::Reference { root, path } => Ok(self.render_reference(root, path)),
            ExprKind::Tuple { items } => {
                let element = match &expr.ty {
                    Type::List(element) => go_type_name(element),
                    _ => go_type_name(&Type::Dynamic),
                };
                Ok(format!("[]{element}{{{}}}", self.render_list(items)?))
            }
            ExprKind::Object { items } => {
                let header = match &expr.ty {
                    Type::Map(element) => format!("map[string]{}", go_type_name(element)),
                    _ => "map[string]interface{}".to_string(),
                };
                self.render_object(&header, items)
            }
            ExprKind::Call { name, args } => self.render_call(name, args),
            ExprKind::Conditional { .. } => Err(PrintError::Unlowered("conditional expression")),
            ExprKind::Binary { op, left, right } => Ok(format!(
                "{} {} {}",
                self.render_operand(left)?,
                op.as_str(),
                self.render_operand(right)?
            )),
            ExprKind::Input { value } => self.render_input(value),
        }
    }

    fn render_list(&self, items: &[Expression]) -> Result<String, PrintError> {
        let rendered = items.iter().map(|item| self.render(item)).collect::<Result<Vec<_>, _>>()?;
        Ok(rendered.join(", "))
    }

    fn render_object(&self, header: &str, items: &[ObjectItem]) -> Result<String, PrintError> {
        if items.is_empty() {
            return Ok(format!("{header}{{}}"));
        }
        let mut out = format!("{header}{{\n");
        for item in items {
            out.push_str(&format!("{}: {},\n", go_string_literal(&item.key), self.render(&item.value)?));
        }
        out.push('}');
        Ok(out)
    }

    fn render_operand(&self, operand: &Expression) -> Result<String, PrintError> {
        let rendered = self.render(operand)?;
        Ok(match operand.kind {
            ExprKind::Binary { .. } => format!("({rendered})"),
            _ => rendered,
        })
    }

    /// Resource attributes are SDK accessors, invoke results are structs, anything else is indexed as a map.
    fn render_reference(&self, root: &str, path: &[Traverser]) -> String {
        let mut out = self.names.ident(root);
        let is_resource = self.names.is_resource(root);
        let is_invoke_result = self.names.is_invoke_result(root);
        for step in path {
            match step {
                Traverser::Attr(name) if is_resource => {
                    out.push('.');
                    out.push_str(&resource_property_accessor(name));
                }
                Traverser::Attr(name) if is_invoke_result => {
                    out.push('.');
                    out.push_str(&title_case(name));
                }
                Traverser::Attr(name) => out.push_str(&format!("[{}]", go_string_literal(name))),
                Traverser::Index(index) => out.push_str(&format!("[{index}]")),
            }
        }
        out
    }

    /// Render a value converted to an SDK input.
    fn render_input(&self, value: &Expression) -> Result<String, PrintError> {
        match &value.kind {
            ExprKind::Tuple { items } => {
                let container = match value.ty.resolved() {
                    Type::List(element) => input_array_type(element),
                    _ => "pulumi.Array",
                };
                Ok(format!("{container}{{{}}}", self.render_list(items)?))
            }
            ExprKind::Object { items } => {
                let container = match value.ty.resolved() {
                    Type::Map(element) if **element == Type::String => "pulumi.StringMap",
                    _ => "pulumi.Map",
                };
                self.render_object(container, items)
            }
            _ => {
                let rendered = self.render(value)?;
                let conversion = match value.ty.resolved() {
                    Type::Bool => "pulumi.Bool",
                    Type::Int => "pulumi.Int",
                    Type::Number => "pulumi.Float64",
                    Type::String => "pulumi.String",
                    Type::List(element) if **element == Type::String => "pulumi.ToStringArray",
                    Type::Map(element) if **element == Type::String => "pulumi.ToStringMap",
                    _ => "pulumi.Any",
                };
                Ok(format!("{conversion}({rendered})"))
            }
        }
    }

    fn render_call(&self, name: &str, args: &[Expression]) -> Result<String, PrintError> {
        let Some(info) = self.functions.lookup(name) else {
            return Ok(format!("{name}({})", self.render_list(args)?));
        };
        if !info.arity.accepts(args.len()) {
            return Err(PrintError::Arity {
                function: name.to_string(),
                expected: info.arity.to_string(),
                found: args.len(),
            });
        }
        let arg = |i: usize| self.render(&args[i]);
        Ok(match info.id {
            FunctionId::ToJson => return Err(PrintError::Unlowered("toJSON call")),
            FunctionId::Invoke => return self.render_invoke(args),
            FunctionId::FileAsset => format!("pulumi.NewFileAsset({})", arg(0)?),
            FunctionId::FileArchive => format!("pulumi.NewFileArchive({})", arg(0)?),
            FunctionId::ToBase64 => format!("base64.StdEncoding.EncodeToString([]byte({}))", arg(0)?),
            FunctionId::Join => format!("strings.Join({}, {})", arg(1)?, arg(0)?),
            FunctionId::Split => format!("strings.Split({}, {})", arg(1)?, arg(0)?),
            FunctionId::MimeType => format!("mime.TypeByExtension(path.Ext({}))", arg(0)?),
            FunctionId::Length => format!("len({})", arg(0)?),
            FunctionId::Element => format!("{}[{}]", arg(0)?, arg(1)?),
        })
    }

    /// `invoke("pkg:module:getThing", {..})` -> `module.GetThing(ctx, &module.GetThingArgs{..}, nil)`.
    fn render_invoke(&self, args: &[Expression]) -> Result<String, PrintError> {
        let token = match args.first().map(|a| &a.kind) {
            Some(ExprKind::Literal {
                value: Literal::String(token),
            }) => token,
            _ => return Err(PrintError::Unsupported("invoke requires a literal type token".to_string())),
        };
        let parsed = TypeToken::parse(token).map_err(|e| PrintError::MalformedToken {
            token: token.clone(),
            reason: e.to_string(),
        })?;
        let qualifier = parsed.qualifier();
        let member = title_case(&parsed.member);
        let call_args = match args.get(1) {
            None => "nil".to_string(),
            Some(Expression {
                kind: ExprKind::Object { items },
                ..
            }) => {
                let mut out = format!("&{qualifier}.{member}Args{{");
                if !items.is_empty() {
                    out.push('\n');
                    for item in items {
                        out.push_str(&format!("{}: {},\n", title_case(&item.key), self.render(&item.value)?));
                    }
                }
                out.push('}');
                out
            }
            Some(_) => {
                return Err(PrintError::Unsupported(
                    "invoke arguments must be an object literal".to_string(),
                ));
            }
        };
        Ok(format!("{qualifier}.{member}({CONTEXT_IDENT}, {call_args}, nil)"))
    }
}

fn render_literal(value: &Literal) -> Result<String, PrintError> {
    Ok(match value {
        Literal::Null => "nil".to_string(),
        Literal::Bool(b) => b.to_string(),
        Literal::Int(i) => i.to_string(),
        Literal::Number(n) if !n.is_finite() => {
            return Err(PrintError::Unsupported(format!("non-finite number literal `{n}`")));
        }
        Literal::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{n:.1}"),
        Literal::Number(n) => n.to_string(),
        Literal::String(s) => go_string_literal(s),
    })
}

fn input_array_type(element: &Type) -> &'static str {
    match element {
        Type::Bool => "pulumi.BoolArray",
        Type::Int => "pulumi.IntArray",
        Type::Number => "pulumi.Float64Array",
        Type::String => "pulumi.StringArray",
        _ => "pulumi.Array",
    }
}
