//! Simulated runtime values

use crate::shared::models::{Method, TypeRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Arena handle of a simulated value within one execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ValueId(pub u32);

impl ValueId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Constant value
///
/// Floating point constants compare and hash by bit pattern so that
/// structurally identical constants are interchangeable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Constant {
    Null,
    Bool(bool),
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Class(TypeRef),
    Method(Method),
}

impl Constant {
    pub fn ty(&self) -> TypeRef {
        match self {
            Self::Null => TypeRef::object(),
            Self::Bool(_) => TypeRef::Bool,
            Self::Byte(_) => TypeRef::Byte,
            Self::Char(_) => TypeRef::Char,
            Self::Short(_) => TypeRef::Short,
            Self::Int(_) => TypeRef::Int,
            Self::Long(_) => TypeRef::Long,
            Self::Float(_) => TypeRef::Float,
            Self::Double(_) => TypeRef::Double,
            Self::String(_) => TypeRef::string(),
            Self::Class(_) => TypeRef::class(crate::shared::models::types::CLASS_CLASS),
            Self::Method(_) => TypeRef::class(crate::shared::models::types::METHOD_CLASS),
        }
    }
}

impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Byte(a), Self::Byte(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Short(a), Self::Short(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Class(a), Self::Class(b)) => a == b,
            (Self::Method(a), Self::Method(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Constant {}

impl Hash for Constant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(v) => v.hash(state),
            Self::Byte(v) => v.hash(state),
            Self::Char(v) => v.hash(state),
            Self::Short(v) => v.hash(state),
            Self::Int(v) => v.hash(state),
            Self::Long(v) => v.hash(state),
            Self::Float(v) => v.to_bits().hash(state),
            Self::Double(v) => v.to_bits().hash(state),
            Self::String(v) => v.hash(state),
            Self::Class(v) => v.hash(state),
            Self::Method(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Byte(v) => write!(f, "{}b", v),
            Self::Char(v) => write!(f, "'{}'", v),
            Self::Short(v) => write!(f, "{}s", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Long(v) => write!(f, "{}L", v),
            Self::Float(v) => write!(f, "{}f", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "\"{}\"", v),
            Self::Class(ty) => write!(f, "{}.class", ty),
            Self::Method(m) => write!(f, "{}", m),
        }
    }
}

/// Runtime value consistent with a reference's declared type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimulatedValue {
    /// Literal or constant
    Constant(Constant),
    /// Placeholder for a result produced by an instruction
    Named { name: String, ty: TypeRef },
}

impl SimulatedValue {
    pub fn named(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::Named {
            name: name.into(),
            ty,
        }
    }

    pub fn ty(&self) -> TypeRef {
        match self {
            Self::Constant(c) => c.ty(),
            Self::Named { ty, .. } => ty.clone(),
        }
    }

    /// Base name for fresh symbolic terms
    pub fn name(&self) -> String {
        match self {
            Self::Constant(c) => c.to_string(),
            Self::Named { name, .. } => name.clone(),
        }
    }
}

impl fmt::Display for SimulatedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(c) => write!(f, "{}", c),
            Self::Named { name, .. } => write!(f, "%{}", name),
        }
    }
}
