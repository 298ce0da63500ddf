//! Structural types attached to every expression and node.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::TraversalError;

/// Object type: named properties with their types.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectType {
    pub properties: BTreeMap<String, Type>,
}

impl ObjectType {
    pub fn new<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Type)>,
        K: Into<String>,
    {
        Self {
            properties: properties.into_iter().map(|(k, t)| (k.into(), t)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.properties.get(name)
    }
}

/// A resolved structural type.
///
/// In JSON, primitives are plain strings (`"string"`) and constructors are single-key objects
/// (`{"list": "string"}`, `{"object": {"acl": "string"}}`, `{"output": "string"}`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Type {
    Bool,
    Int,
    Number,
    String,
    /// Statically unknown; rendered as `interface{}`.
    #[default]
    Dynamic,
    List(Box<Type>),
    Map(Box<Type>),
    Object(ObjectType),
    /// An eventual value produced by the SDK (e.g. a resource property).
    Output(Box<Type>),
}

impl Type {
    pub fn list(element: Type) -> Self {
        Type::List(Box::new(element))
    }

    pub fn map(element: Type) -> Self {
        Type::Map(Box::new(element))
    }

    pub fn output(inner: Type) -> Self {
        Type::Output(Box::new(inner))
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Type::Dynamic)
    }

    pub fn is_output(&self) -> bool {
        matches!(self, Type::Output(_))
    }

    /// The type with any `output<..>` layer removed.
    pub fn resolved(&self) -> &Type {
        match self {
            Type::Output(inner) => inner.resolved(),
            other => other,
        }
    }

    /// Type of the attribute `name` of a value of this type.
    ///
    /// Traversing an `output<T>` yields an `output` of the traversed type.
    pub fn traverse_attr(&self, name: &str) -> Result<Type, TraversalError> {
        match self {
            Type::Object(object) => object.get(name).cloned().ok_or_else(|| TraversalError::NoSuchAttribute {
                attr: name.to_string(),
                ty: self.to_string(),
            }),
            Type::Map(element) => Ok((**element).clone()),
            Type::Dynamic => Ok(Type::Dynamic),
            Type::Output(inner) => inner.traverse_attr(name).map(wrap_output),
            Type::Bool | Type::Int | Type::Number | Type::String | Type::List(_) => {
                Err(TraversalError::NotTraversable { ty: self.to_string() })
            }
        }
    }

    /// Type of the element at an integer index of a value of this type.
    pub fn traverse_index(&self) -> Result<Type, TraversalError> {
        match self {
            Type::List(element) | Type::Map(element) => Ok((**element).clone()),
            Type::Dynamic => Ok(Type::Dynamic),
            Type::Output(inner) => inner.traverse_index().map(wrap_output),
            Type::Bool | Type::Int | Type::Number | Type::String | Type::Object(_) => {
                Err(TraversalError::NotTraversable { ty: self.to_string() })
            }
        }
    }
}

fn wrap_output(ty: Type) -> Type {
    if ty.is_output() { ty } else { Type::output(ty) }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::Number => write!(f, "number"),
            Type::String => write!(f, "string"),
            Type::Dynamic => write!(f, "dynamic"),
            Type::List(element) => write!(f, "list<{element}>"),
            Type::Map(element) => write!(f, "map<{element}>"),
            Type::Object(object) => {
                write!(f, "object{{")?;
                for (i, (name, ty)) in object.properties.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {ty}")?;
                }
                write!(f, "}}")
            }
            Type::Output(inner) => write!(f, "output<{inner}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket_args() -> Type {
        Type::Object(ObjectType::new([("acl", Type::String), ("tags", Type::map(Type::String))]))
    }

    #[test]
    fn test_traverse_object_attribute() {
        assert_eq!(bucket_args().traverse_attr("acl"), Ok(Type::String));
        assert!(matches!(
            bucket_args().traverse_attr("nope"),
            Err(TraversalError::NoSuchAttribute { .. })
        ));
    }

    #[test]
    fn test_traverse_through_output_stays_output() {
        let ty = Type::output(bucket_args());
        assert_eq!(ty.traverse_attr("acl"), Ok(Type::output(Type::String)));
        assert_eq!(
            Type::output(Type::list(Type::Int)).traverse_index(),
            Ok(Type::output(Type::Int))
        );
    }

    #[test]
    fn test_primitive_is_not_traversable() {
        assert!(Type::String.traverse_attr("x").is_err());
        assert!(Type::Bool.traverse_index().is_err());
        assert_eq!(Type::Dynamic.traverse_attr("x"), Ok(Type::Dynamic));
    }

    #[test]
    fn test_display_and_json_shape() {
        assert_eq!(Type::list(Type::String).to_string(), "list<string>");
        assert_eq!(bucket_args().to_string(), "object{acl: string, tags: map<string>}");
        let parsed: Type = serde_json::from_str(r#"{"output": {"list": "number"}}"#).unwrap();
        assert_eq!(parsed, Type::output(Type::list(Type::Number)));
    }
}
