//! Type references

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a value, field, parameter or return slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeRef {
    Void,
    Bool,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    /// Reference type by fully qualified name (`java.lang.String`)
    Class(String),
    Array(Box<TypeRef>),
}

pub const STRING_CLASS: &str = "java.lang.String";
pub const CLASS_CLASS: &str = "java.lang.Class";
pub const METHOD_CLASS: &str = "java.lang.reflect.Method";
pub const OBJECT_CLASS: &str = "java.lang.Object";

impl TypeRef {
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    pub fn array(element: TypeRef) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn string() -> Self {
        Self::class(STRING_CLASS)
    }

    pub fn object() -> Self {
        Self::class(OBJECT_CLASS)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, Self::Void | Self::Class(_) | Self::Array(_))
    }

    /// Whether `self` is the given class or its boxed counterpart
    ///
    /// `Int` matches `Int` and `java.lang.Integer`.
    pub fn is_kind_of(&self, primitive: &TypeRef) -> bool {
        if self == primitive {
            return true;
        }
        match (self, primitive.boxed_name()) {
            (Self::Class(name), Some(boxed)) => name == boxed,
            _ => false,
        }
    }

    /// Name of the boxed class for primitive types
    pub fn boxed_name(&self) -> Option<&'static str> {
        match self {
            Self::Bool => Some("java.lang.Boolean"),
            Self::Byte => Some("java.lang.Byte"),
            Self::Char => Some("java.lang.Character"),
            Self::Short => Some("java.lang.Short"),
            Self::Int => Some("java.lang.Integer"),
            Self::Long => Some("java.lang.Long"),
            Self::Float => Some("java.lang.Float"),
            Self::Double => Some("java.lang.Double"),
            _ => None,
        }
    }

    pub fn is_class_named(&self, name: &str) -> bool {
        matches!(self, Self::Class(n) if n == name)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => write!(f, "void"),
            Self::Bool => write!(f, "bool"),
            Self::Byte => write!(f, "byte"),
            Self::Char => write!(f, "char"),
            Self::Short => write!(f, "short"),
            Self::Int => write!(f, "int"),
            Self::Long => write!(f, "long"),
            Self::Float => write!(f, "float"),
            Self::Double => write!(f, "double"),
            Self::Class(name) => write!(f, "{}", name),
            Self::Array(element) => write!(f, "{}[]", element),
        }
    }
}
