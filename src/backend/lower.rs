//! Expression lowering: rewrite a typed expression into inline-representable Go form.
//!
//! Go has no conditional expression, and `json.Marshal` returns an error that must be checked before its result is
//! used. Lowering therefore *spills* those constructs into temporaries:
//!
//! 1. A conditional is always spilled into a [`ConditionalTemp`]; its condition and branches are lowered first (in
//!    output context), so temporaries they need come earlier in the list.
//! 2. A `toJSON` call is always spilled into a [`SerializationTemp`]; its argument is lowered in the current context
//!    and then stripped of input conversions according to [`InputUnwrap`].
//! 3. Every other shape is rebuilt structurally; temporaries are collected left to right, depth first.
//!
//! In input context (values feeding resource arguments), every lowered value whose type is not an `output` and which
//! is not `null` is wrapped in the input intrinsic, which the printer renders as `pulumi.String(..)` and friends.
//! Elements of list and object literals keep the input context; call arguments, binary operands and conditional
//! branches are lowered in output context.
//!
//! ## Notes
//!
//! - Lowering never mutates its input; it returns a new tree.
//! - Temp names come from the run's [`super::context::TempNames`], so they are unique across the whole program.

use infragen_core::lang::functions::FunctionId;
use infragen_model::{ExprKind, Expression, ObjectItem, Type};

use super::GenerationError;
use super::context::TranslationContext;
use super::options::InputUnwrap;
use super::temps::{ConditionalTemp, SerializationTemp, TempDescriptor};

/// Whether a value feeds a resource input or is used as a plain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueContext {
    Input,
    Output,
}

/// A lowered expression and the temporaries that must be emitted, in order, before it is used.
#[derive(Debug, Clone, PartialEq)]
pub struct Lowered {
    pub expr: Expression,
    pub temps: Vec<TempDescriptor>,
}

/// Lower `expr`, the value of node `subject`, whose destination type is `expected`.
pub fn lower_expression(
    ctx: &mut TranslationContext<'_>,
    subject: &str,
    expr: &Expression,
    expected: &Type,
    value_ctx: ValueContext,
) -> Result<Lowered, GenerationError> {
    let mut lowerer = Lowerer {
        ctx,
        subject,
        temps: Vec::new(),
    };
    let expr = lowerer.lower(expr, Some(expected), value_ctx)?;
    Ok(Lowered {
        expr,
        temps: lowerer.temps,
    })
}

/// Remove input conversions from a lowered expression according to `policy`.
pub fn strip_inputs(expr: Expression, policy: InputUnwrap) -> Expression {
    match policy {
        InputUnwrap::Never => expr,
        InputUnwrap::Outermost => match expr.kind {
            ExprKind::Input { value } => *value,
            kind => Expression::new(kind, expr.ty),
        },
        InputUnwrap::Deep => strip_deep(expr),
    }
}

fn strip_deep(expr: Expression) -> Expression {
    let Expression { kind, ty } = expr;
    let kind = match kind {
        ExprKind::Input { value } => return strip_deep(*value),
        ExprKind::Literal { .. } | ExprKind::Reference { .. } => kind,
        ExprKind::Tuple { items } => ExprKind::Tuple {
            items: items.into_iter().map(strip_deep).collect(),
        },
        ExprKind::Object { items } => ExprKind::Object {
            items: items
                .into_iter()
                .map(|item| ObjectItem {
                    key: item.key,
                    value: strip_deep(item.value),
                })
                .collect(),
        },
        ExprKind::Call { name, args } => ExprKind::Call {
            name,
            args: args.into_iter().map(strip_deep).collect(),
        },
        ExprKind::Conditional {
            condition,
            true_result,
            false_result,
        } => ExprKind::Conditional {
            condition: Box::new(strip_deep(*condition)),
            true_result: Box::new(strip_deep(*true_result)),
            false_result: Box::new(strip_deep(*false_result)),
        },
        ExprKind::Binary { op, left, right } => ExprKind::Binary {
            op,
            left: Box::new(strip_deep(*left)),
            right: Box::new(strip_deep(*right)),
        },
    };
    Expression::new(kind, ty)
}

/// Type of a spilled conditional when no usable destination type is known.
fn conditional_result_type(expr: &Expression) -> Type {
    if !expr.ty.is_dynamic() {
        return expr.ty.clone();
    }
    match &expr.kind {
        ExprKind::Conditional { true_result, .. } => conditional_result_type(true_result),
        _ => Type::Dynamic,
    }
}

struct Lowerer<'c, 'a> {
    ctx: &'c mut TranslationContext<'a>,
    subject: &'c str,
    temps: Vec<TempDescriptor>,
}

impl Lowerer<'_, '_> {
    /// Lower one expression; `expected` is only known for the root of the tree.
    fn lower(
        &mut self,
        expr: &Expression,
        expected: Option<&Type>,
        value_ctx: ValueContext,
    ) -> Result<Expression, GenerationError> {
        let lowered = match &expr.kind {
            ExprKind::Literal { .. } | ExprKind::Reference { .. } => expr.clone(),
            ExprKind::Tuple { items } => {
                let items = self.lower_all(items, value_ctx)?;
                Expression::new(ExprKind::Tuple { items }, expr.ty.clone())
            }
            ExprKind::Object { items } => {
                let mut lowered_items = Vec::with_capacity(items.len());
                for item in items {
                    lowered_items.push(ObjectItem {
                        key: item.key.clone(),
                        value: self.lower(&item.value, None, value_ctx)?,
                    });
                }
                Expression::new(ExprKind::Object { items: lowered_items }, expr.ty.clone())
            }
            ExprKind::Call { name, args } => return self.lower_call(expr, name, args, value_ctx),
            ExprKind::Conditional {
                condition,
                true_result,
                false_result,
            } => {
                let condition = self.lower(condition, None, ValueContext::Output)?;
                let true_result = self.lower(true_result, None, ValueContext::Output)?;
                let false_result = self.lower(false_result, None, ValueContext::Output)?;
                let ty = match expected {
                    Some(expected) if !expected.is_dynamic() => expected.clone(),
                    _ => conditional_result_type(expr),
                };
                let name = self.ctx.temps.conditional();
                tracing::debug!(node = self.subject, temp = %name, "spilling conditional");
                self.temps.push(TempDescriptor::Conditional(ConditionalTemp {
                    name: name.clone(),
                    condition,
                    true_result,
                    false_result,
                    ty: ty.clone(),
                }));
                Expression::reference(name, ty)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.lower(left, None, ValueContext::Output)?;
                let right = self.lower(right, None, ValueContext::Output)?;
                Expression::binary(*op, left, right, expr.ty.clone())
            }
            ExprKind::Input { value } => {
                let value = self.lower(value, None, ValueContext::Output)?;
                Expression::input(value)
            }
        };
        Ok(self.finish(lowered, value_ctx))
    }

    fn lower_all(&mut self, exprs: &[Expression], value_ctx: ValueContext) -> Result<Vec<Expression>, GenerationError> {
        exprs.iter().map(|e| self.lower(e, None, value_ctx)).collect()
    }

    fn lower_call(
        &mut self,
        expr: &Expression,
        name: &str,
        args: &[Expression],
        value_ctx: ValueContext,
    ) -> Result<Expression, GenerationError> {
        let known = self.ctx.functions.lookup(name).map(|info| (info.id, info.arity));
        let Some((id, arity)) = known else {
            self.ctx.warn(
                self.subject,
                format!("unknown function `{name}`"),
                "the call is emitted as written",
            );
            let args = self.lower_all(args, ValueContext::Output)?;
            let call = Expression::call(name, args, expr.ty.clone());
            return Ok(self.finish(call, value_ctx));
        };

        if id == FunctionId::ToJson {
            if !arity.accepts(args.len()) {
                return Err(GenerationError::Arity {
                    node: self.subject.to_string(),
                    function: name.to_string(),
                    expected: arity.to_string(),
                    found: args.len(),
                });
            }
            let value = self.lower(&args[0], None, value_ctx)?;
            let value = strip_inputs(value, self.ctx.options.input_unwrap);
            let names = self.ctx.temps.serialization();
            tracing::debug!(node = self.subject, temp = %names.value, "spilling toJSON call");
            self.temps.push(TempDescriptor::Serialization(SerializationTemp {
                name: names.value.clone(),
                bytes_name: names.bytes,
                value,
            }));
            return Ok(self.finish(Expression::reference(names.value, Type::String), value_ctx));
        }

        let args = self.lower_all(args, ValueContext::Output)?;
        let call = Expression::call(name, args, expr.ty.clone());
        // Asset constructors already produce SDK inputs.
        if matches!(id, FunctionId::FileAsset | FunctionId::FileArchive) {
            return Ok(call);
        }
        Ok(self.finish(call, value_ctx))
    }

    /// Apply input wrapping to a lowered value.
    fn finish(&self, expr: Expression, value_ctx: ValueContext) -> Expression {
        let already_input = matches!(expr.kind, ExprKind::Input { .. });
        if value_ctx == ValueContext::Output || already_input || expr.ty.is_output() || expr.is_null() {
            expr
        } else {
            Expression::input(expr)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::GenerateOptions;
    use crate::backend::imports::ImportSet;
    use infragen_core::Builtins;
    use infragen_model::{BinaryOp, Literal, Severity};

    fn lower(expr: &Expression, expected: &Type, value_ctx: ValueContext) -> (Lowered, usize) {
        let options = GenerateOptions::default();
        let mut ctx = TranslationContext::new(&[], &ImportSet::default(), &Builtins, &options).unwrap();
        let lowered = lower_expression(&mut ctx, "subject", expr, expected, value_ctx).unwrap();
        (lowered, ctx.diagnostics.len())
    }

    fn cond(c: &str, t: Expression, f: Expression, ty: Type) -> Expression {
        Expression::conditional(Expression::reference(c, Type::Bool), t, f, ty)
    }

    #[test]
    fn test_conditional_is_spilled_with_expected_type() {
        let expr = cond("c", Expression::string("a"), Expression::string("b"), Type::Dynamic);
        let (lowered, _) = lower(&expr, &Type::String, ValueContext::Output);
        assert_eq!(lowered.expr, Expression::reference("tmp0", Type::String));
        assert_eq!(lowered.temps.len(), 1);
        match &lowered.temps[0] {
            TempDescriptor::Conditional(temp) => {
                assert_eq!(temp.name, "tmp0");
                assert_eq!(temp.ty, Type::String);
            }
            other => panic!("expected a conditional temp, got {other:?}"),
        }
    }

    #[test]
    fn test_dynamic_expected_falls_back_to_true_branch_type() {
        let inner = cond("d", Expression::int(1), Expression::int(2), Type::Dynamic);
        let expr = cond("c", inner, Expression::int(3), Type::Dynamic);
        let (lowered, _) = lower(&expr, &Type::Dynamic, ValueContext::Output);
        // The inner conditional is spilled first, the outer one references it.
        let names: Vec<_> = lowered.temps.iter().map(TempDescriptor::name).collect();
        assert_eq!(names, vec!["tmp0", "tmp1"]);
        match &lowered.temps[1] {
            TempDescriptor::Conditional(temp) => {
                assert_eq!(temp.true_result, Expression::reference("tmp0", Type::Int));
                assert_eq!(temp.ty, Type::Int);
            }
            other => panic!("expected a conditional temp, got {other:?}"),
        }
        assert_eq!(lowered.expr.ty, Type::Int);
    }

    #[test]
    fn test_temps_in_condition_and_both_branches_come_first() {
        let encoded = Expression::call("toJSON", vec![Expression::int(1)], Type::String);
        let condition = Expression::binary(BinaryOp::Eq, encoded, Expression::string("1"), Type::Bool);
        let false_branch = cond("d", Expression::string("b"), Expression::string("c"), Type::String);
        let expr = Expression::conditional(condition, Expression::string("a"), false_branch, Type::String);
        let (lowered, _) = lower(&expr, &Type::String, ValueContext::Output);

        let names: Vec<_> = lowered.temps.iter().map(TempDescriptor::name).collect();
        assert_eq!(names, vec!["json0", "tmp0", "tmp1"]);
        match &lowered.temps[2] {
            TempDescriptor::Conditional(temp) => {
                assert_eq!(
                    temp.condition,
                    Expression::binary(
                        BinaryOp::Eq,
                        Expression::reference("json0", Type::String),
                        Expression::string("1"),
                        Type::Bool,
                    )
                );
                assert_eq!(temp.false_result, Expression::reference("tmp0", Type::String));
            }
            other => panic!("expected a conditional temp, got {other:?}"),
        }
        assert_eq!(lowered.expr, Expression::reference("tmp1", Type::String));
    }

    #[test]
    fn test_nested_conditional_types_own_type_when_not_root() {
        let inner = cond("d", Expression::int(1), Expression::int(2), Type::Int);
        let expr = Expression::tuple(vec![inner], Type::list(Type::Int));
        let (lowered, _) = lower(&expr, &Type::list(Type::Int), ValueContext::Output);
        match &lowered.temps[0] {
            TempDescriptor::Conditional(temp) => assert_eq!(temp.ty, Type::Int),
            other => panic!("expected a conditional temp, got {other:?}"),
        }
    }

    #[test]
    fn test_to_json_is_spilled_and_unwrapped() {
        let arg = Expression::object(vec![("a", Expression::string("x"))], Type::Dynamic);
        let expr = Expression::call("toJSON", vec![arg.clone()], Type::String);
        let (lowered, _) = lower(&expr, &Type::String, ValueContext::Input);
        assert_eq!(lowered.expr, Expression::input(Expression::reference("json0", Type::String)));
        match &lowered.temps[0] {
            TempDescriptor::Serialization(temp) => {
                assert_eq!(temp.bytes_name, "tmpJSON0");
                assert_eq!(temp.value, arg);
            }
            other => panic!("expected a serialization temp, got {other:?}"),
        }
    }

    #[test]
    fn test_input_context_wraps_leaves_and_containers() {
        let expr = Expression::tuple(
            vec![Expression::string("a"), Expression::null()],
            Type::list(Type::String),
        );
        let (lowered, _) = lower(&expr, &Type::list(Type::String), ValueContext::Input);
        let ExprKind::Input { value } = &lowered.expr.kind else {
            panic!("expected the list to be wrapped");
        };
        let ExprKind::Tuple { items } = &value.kind else {
            panic!("expected a tuple");
        };
        assert_eq!(items[0], Expression::input(Expression::string("a")));
        assert!(matches!(items[1].kind, ExprKind::Literal { value: Literal::Null }));
    }

    #[test]
    fn test_outputs_are_not_wrapped() {
        let expr = Expression::reference("bucket", Type::output(Type::String));
        let (lowered, _) = lower(&expr, &Type::String, ValueContext::Input);
        assert_eq!(lowered.expr, expr);
    }

    #[test]
    fn test_unknown_function_warns() {
        let options = GenerateOptions::default();
        let mut ctx = TranslationContext::new(&[], &ImportSet::default(), &Builtins, &options).unwrap();
        let expr = Expression::call("frob", vec![], Type::Dynamic);
        lower_expression(&mut ctx, "site", &expr, &Type::Dynamic, ValueContext::Output).unwrap();
        let diag = ctx.diagnostics.iter().next().unwrap();
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.subject.as_deref(), Some("site"));
    }

    #[test]
    fn test_to_json_arity_is_fatal() {
        let options = GenerateOptions::default();
        let mut ctx = TranslationContext::new(&[], &ImportSet::default(), &Builtins, &options).unwrap();
        let expr = Expression::call("toJSON", vec![], Type::String);
        let err = lower_expression(&mut ctx, "site", &expr, &Type::String, ValueContext::Output).unwrap_err();
        assert!(matches!(err, GenerationError::Arity { ref node, .. } if node == "site"));
    }

    #[test]
    fn test_strip_policies() {
        let wrapped = Expression::input(Expression::tuple(
            vec![Expression::input(Expression::string("a"))],
            Type::list(Type::String),
        ));
        let outer = strip_inputs(wrapped.clone(), InputUnwrap::Outermost);
        assert!(matches!(outer.kind, ExprKind::Tuple { .. }));
        assert_eq!(
            strip_inputs(wrapped.clone(), InputUnwrap::Deep),
            Expression::tuple(vec![Expression::string("a")], Type::list(Type::String))
        );
        assert_eq!(strip_inputs(wrapped.clone(), InputUnwrap::Never), wrapped);
    }
}
