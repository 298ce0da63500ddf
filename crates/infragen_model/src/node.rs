//! Program nodes: resources, outputs and local bindings.

use serde::{Deserialize, Serialize};

use crate::errors::TokenError;
use crate::expr::Expression;
use crate::token::TypeToken;
use crate::types::Type;

/// One program statement, in the order the upstream linearizer chose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Node {
    Resource(Resource),
    OutputVariable(Variable),
    LocalVariable(Variable),
}

/// A resource declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub name: String,
    /// Type token, `package:module:Type`.
    pub token: String,
    /// Type of the resource value (its output properties).
    #[serde(rename = "type", default)]
    pub ty: Type,
    /// Declared input properties; attribute destination types are looked up here.
    #[serde(default)]
    pub input_type: Type,
    #[serde(default)]
    pub inputs: Vec<Attribute>,
}

/// One `name = value` input of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: Expression,
}

/// An output or local binding of a single expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: Type,
    pub value: Expression,
}

impl Resource {
    /// Split the type token into package, module and member.
    pub fn decompose_token(&self) -> Result<TypeToken, TokenError> {
        TypeToken::parse(&self.token)
    }
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Resource(resource) => &resource.name,
            Node::OutputVariable(var) | Node::LocalVariable(var) => &var.name,
        }
    }

    pub fn ty(&self) -> &Type {
        match self {
            Node::Resource(resource) => &resource.ty,
            Node::OutputVariable(var) | Node::LocalVariable(var) => &var.ty,
        }
    }

    /// The node's top-level expressions, in declaration order.
    pub fn expressions(&self) -> Vec<&Expression> {
        match self {
            Node::Resource(resource) => resource.inputs.iter().map(|attr| &attr.value).collect(),
            Node::OutputVariable(var) | Node::LocalVariable(var) => vec![&var.value],
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Node::Resource(resource) => Some(resource),
            _ => None,
        }
    }
}
