//! Class, method and field handles
//!
//! `*Spec` types are what a test action names (declaring type + name +
//! signature). The resolved `Class`/`Method`/`Field` handles come back from
//! the descriptor service and carry the modifiers the translator dispatches on.

use super::types::TypeRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name the host uses for constructors
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Resolved class handle
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Class {
    pub name: String,
    pub is_interface: bool,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_interface: false,
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_interface: true,
        }
    }

    pub fn as_type(&self) -> TypeRef {
        TypeRef::Class(self.name.clone())
    }
}

/// Method signature: parameter types and return type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodDesc {
    pub params: Vec<TypeRef>,
    pub ret: TypeRef,
}

impl MethodDesc {
    pub fn new(params: Vec<TypeRef>, ret: TypeRef) -> Self {
        Self { params, ret }
    }
}

impl fmt::Display for MethodDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(|p| p.to_string()).collect();
        write!(f, "({}): {}", params.join(", "), self.ret)
    }
}

/// Resolved method handle
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Method {
    pub class: Class,
    pub name: String,
    pub desc: MethodDesc,
    pub is_static: bool,
}

impl Method {
    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    pub fn is_void(&self) -> bool {
        self.desc.ret.is_void()
    }

    pub fn spec(&self) -> MethodSpec {
        MethodSpec {
            owner: self.class.name.clone(),
            name: self.name.clone(),
            desc: self.desc.clone(),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}{}", self.class.name, self.name, self.desc)
    }
}

/// Resolved field handle
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Field {
    pub class: Class,
    pub name: String,
    pub ty: TypeRef,
    pub is_static: bool,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.class.name, self.name, self.ty)
    }
}

/// Method as named by a test action
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSpec {
    pub owner: String,
    pub name: String,
    pub desc: MethodDesc,
}

impl MethodSpec {
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        params: Vec<TypeRef>,
        ret: TypeRef,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            desc: MethodDesc::new(params, ret),
        }
    }

    pub fn constructor(owner: impl Into<String>, params: Vec<TypeRef>) -> Self {
        Self::new(owner, CONSTRUCTOR_NAME, params, TypeRef::Void)
    }
}

impl fmt::Display for MethodSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}{}", self.owner, self.name, self.desc)
    }
}

/// Field as named by a test action
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSpec {
    pub owner: String,
    pub name: String,
    pub ty: TypeRef,
    pub is_static: bool,
}

impl FieldSpec {
    pub fn instance(owner: impl Into<String>, name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            ty,
            is_static: false,
        }
    }

    pub fn static_field(owner: impl Into<String>, name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            ty,
            is_static: true,
        }
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.name)
    }
}
