//! Typed expression trees.
//!
//! [`ExprKind`] is a closed set of shapes. Every consumer (walker, lowerer, printer) matches it exhaustively, so
//! adding a shape is a compile error at each site that has to handle it.

use serde::{Deserialize, Serialize};

use crate::types::Type;

/// An expression with its resolved type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    #[serde(flatten)]
    pub kind: ExprKind,
    #[serde(rename = "type", default)]
    pub ty: Type,
}

/// Expression shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "expr", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ExprKind {
    Literal {
        value: Literal,
    },
    /// A variable reference: a root name followed by attribute and index traversals.
    Reference {
        root: String,
        #[serde(default)]
        path: Vec<Traverser>,
    },
    Tuple {
        items: Vec<Expression>,
    },
    Object {
        items: Vec<ObjectItem>,
    },
    Call {
        name: String,
        #[serde(default)]
        args: Vec<Expression>,
    },
    Conditional {
        condition: Box<Expression>,
        true_result: Box<Expression>,
        false_result: Box<Expression>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// Conversion of a plain value into an SDK input; only introduced by lowering.
    #[serde(skip_deserializing)]
    Input {
        value: Box<Expression>,
    },
}

/// Literal values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Number(f64),
    String(String),
}

/// One step of a reference's traversal path: `.attr` or `[index]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Traverser {
    Attr(String),
    Index(i64),
}

/// One `key = value` item of an object construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectItem {
    pub key: String,
    pub value: Expression,
}

/// Binary operators, spelled as in the generated Go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

impl Expression {
    pub fn new(kind: ExprKind, ty: Type) -> Self {
        Self { kind, ty }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ExprKind::Literal { value: Literal::String(value.into()) }, Type::String)
    }

    pub fn bool(value: bool) -> Self {
        Self::new(ExprKind::Literal { value: Literal::Bool(value) }, Type::Bool)
    }

    pub fn int(value: i64) -> Self {
        Self::new(ExprKind::Literal { value: Literal::Int(value) }, Type::Int)
    }

    pub fn number(value: f64) -> Self {
        Self::new(ExprKind::Literal { value: Literal::Number(value) }, Type::Number)
    }

    pub fn null() -> Self {
        Self::new(ExprKind::Literal { value: Literal::Null }, Type::Dynamic)
    }

    /// A bare variable reference.
    pub fn reference(root: impl Into<String>, ty: Type) -> Self {
        Self::traversal(root, Vec::new(), ty)
    }

    /// A reference with a traversal path (`root.attr[0]`).
    pub fn traversal(root: impl Into<String>, path: Vec<Traverser>, ty: Type) -> Self {
        Self::new(ExprKind::Reference { root: root.into(), path }, ty)
    }

    pub fn call(name: impl Into<String>, args: Vec<Expression>, ty: Type) -> Self {
        Self::new(ExprKind::Call { name: name.into(), args }, ty)
    }

    pub fn conditional(condition: Expression, true_result: Expression, false_result: Expression, ty: Type) -> Self {
        Self::new(
            ExprKind::Conditional {
                condition: Box::new(condition),
                true_result: Box::new(true_result),
                false_result: Box::new(false_result),
            },
            ty,
        )
    }

    /// An object construction; keys keep the given order.
    pub fn object<K: Into<String>>(items: Vec<(K, Expression)>, ty: Type) -> Self {
        let items = items
            .into_iter()
            .map(|(key, value)| ObjectItem { key: key.into(), value })
            .collect();
        Self::new(ExprKind::Object { items }, ty)
    }

    pub fn tuple(items: Vec<Expression>, ty: Type) -> Self {
        Self::new(ExprKind::Tuple { items }, ty)
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression, ty: Type) -> Self {
        Self::new(ExprKind::Binary { op, left: Box::new(left), right: Box::new(right) }, ty)
    }

    /// Wrap a value in the input-conversion intrinsic (keeps the value's type).
    pub fn input(value: Expression) -> Self {
        let ty = value.ty.clone();
        Self::new(ExprKind::Input { value: Box::new(value) }, ty)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.kind, ExprKind::Literal { value: Literal::Null })
    }

    /// Name of the called function, if this is a call.
    pub fn call_name(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Call { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Visit this expression and every sub-expression, parents before children, left to right.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Expression)) {
        visit(self);
        match &self.kind {
            ExprKind::Literal { .. } | ExprKind::Reference { .. } => {}
            ExprKind::Tuple { items } => items.iter().for_each(|item| item.walk(visit)),
            ExprKind::Object { items } => items.iter().for_each(|item| item.value.walk(visit)),
            ExprKind::Call { args, .. } => args.iter().for_each(|arg| arg.walk(visit)),
            ExprKind::Conditional { condition, true_result, false_result } => {
                condition.walk(visit);
                true_result.walk(visit);
                false_result.walk(visit);
            }
            ExprKind::Binary { left, right, .. } => {
                left.walk(visit);
                right.walk(visit);
            }
            ExprKind::Input { value } => value.walk(visit),
        }
    }
}
