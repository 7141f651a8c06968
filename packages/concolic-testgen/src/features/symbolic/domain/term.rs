//! Symbolic terms

use super::instruction::{BinaryOpcode, CmpOpcode};
use super::value::Constant;
use crate::shared::models::{Class, Method, TypeRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbolic counterpart of a simulated value, or an expression over terms
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// Literal term for a constant value
    Const(Constant),
    /// Freshly named symbolic variable
    Value { ty: TypeRef, name: String },
    /// Placeholder owner for static members of a class
    StaticRef(Class),
    /// `owner.field(ty, name)`
    Field {
        owner: Box<Term>,
        ty: TypeRef,
        name: String,
    },
    /// `field.load()`
    Load(Box<Term>),
    /// `lhv op rhv`
    Binary {
        opcode: BinaryOpcode,
        lhv: Box<Term>,
        rhv: Box<Term>,
    },
    /// `lhv cmp rhv`
    Cmp {
        opcode: CmpOpcode,
        lhv: Box<Term>,
        rhv: Box<Term>,
    },
    /// `owner.call(method, args)`
    Call {
        owner: Box<Term>,
        method: Method,
        args: Vec<Term>,
    },
}

impl Term {
    pub fn constant(value: Constant) -> Self {
        Self::Const(value)
    }

    pub fn value(ty: TypeRef, name: impl Into<String>) -> Self {
        Self::Value {
            ty,
            name: name.into(),
        }
    }

    pub fn static_ref(class: Class) -> Self {
        Self::StaticRef(class)
    }

    pub fn field(self, ty: TypeRef, name: impl Into<String>) -> Self {
        Self::Field {
            owner: Box::new(self),
            ty,
            name: name.into(),
        }
    }

    pub fn load(self) -> Self {
        Self::Load(Box::new(self))
    }

    pub fn apply_binary(self, opcode: BinaryOpcode, rhv: Term) -> Self {
        Self::Binary {
            opcode,
            lhv: Box::new(self),
            rhv: Box::new(rhv),
        }
    }

    pub fn apply_cmp(self, opcode: CmpOpcode, rhv: Term) -> Self {
        Self::Cmp {
            opcode,
            lhv: Box::new(self),
            rhv: Box::new(rhv),
        }
    }

    pub fn call(self, method: Method, args: Vec<Term>) -> Self {
        Self::Call {
            owner: Box::new(self),
            method,
            args,
        }
    }

    /// Name of a symbolic variable term
    pub fn var_name(&self) -> Option<&str> {
        match self {
            Self::Value { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(c) => write!(f, "{}", c),
            Self::Value { name, .. } => write!(f, "{}", name),
            Self::StaticRef(class) => write!(f, "static({})", class.name),
            Self::Field { owner, ty, name } => write!(f, "{}.field({}, \"{}\")", owner, ty, name),
            Self::Load(field) => write!(f, "{}.load()", field),
            Self::Binary { opcode, lhv, rhv } => write!(f, "{} {} {}", lhv, opcode, rhv),
            Self::Cmp { opcode, lhv, rhv } => write!(f, "{} {} {}", lhv, opcode, rhv),
            Self::Call {
                owner,
                method,
                args,
            } => {
                let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{}.call({}, [{}])", owner, method.name, args.join(", "))
            }
        }
    }
}

/// Per-execution generator of unique term names
///
/// The counter only grows, so every name handed out within one execution is
/// distinct even when two values share a base name.
#[derive(Debug, Clone, Default)]
pub struct NameGenerator {
    counter: u64,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_name(&mut self, base: &str) -> String {
        let name = format!("{}!{}", base, self.counter);
        self.counter += 1;
        name
    }

    /// Number of names handed out so far
    pub fn issued(&self) -> u64 {
        self.counter
    }
}
