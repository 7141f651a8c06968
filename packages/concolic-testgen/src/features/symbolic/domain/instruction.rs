//! Instructions mirroring the host's low-level operation set

use super::value::ValueId;
use crate::errors::{ConcolicError, Result};
use crate::shared::models::{Field, Method, TypeRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic and bitwise opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOpcode {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    Ushr,
    And,
    Or,
    Xor,
}

impl fmt::Display for BinaryOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Ushr => ">>>",
            Self::And => "&",
            Self::Or => "|",
            Self::Xor => "^",
        };
        write!(f, "{}", symbol)
    }
}

/// Relational opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOpcode {
    Eq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,
}

impl fmt::Display for CmpOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
        };
        write!(f, "{}", symbol)
    }
}

/// Dispatch kind of a call instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallKind {
    Static,
    Special,
    Interface,
    Virtual,
}

impl CallKind {
    /// Whether the call needs a receiver value
    pub fn needs_callee(&self) -> bool {
        !matches!(self, Self::Static)
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => write!(f, "static"),
            Self::Special => write!(f, "special"),
            Self::Interface => write!(f, "interface"),
            Self::Virtual => write!(f, "virtual"),
        }
    }
}

/// Selected call form: dispatch kind plus void/non-void variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallDispatch {
    pub kind: CallKind,
    pub is_void: bool,
}

impl CallDispatch {
    /// Select the call form from the target's modifiers
    ///
    /// Checked in order: static, constructor, interface, virtual. A
    /// constructor declared on an interface cannot exist.
    pub fn select(
        is_static: bool,
        is_constructor: bool,
        is_interface: bool,
        is_void: bool,
    ) -> Result<Self> {
        let kind = match (is_static, is_constructor, is_interface) {
            (_, true, true) => {
                return Err(ConcolicError::unreachable(
                    "constructor declared on an interface",
                ))
            }
            (true, _, _) => CallKind::Static,
            (false, true, false) => CallKind::Special,
            (false, false, true) => CallKind::Interface,
            (false, false, false) => CallKind::Virtual,
        };
        Ok(Self { kind, is_void })
    }
}

/// One recorded operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// `name = owner.field` (owner is None for static fields)
    FieldLoad {
        name: String,
        field: Field,
        owner: Option<ValueId>,
    },
    /// `owner.field = value`
    FieldStore {
        field: Field,
        owner: Option<ValueId>,
        value: ValueId,
    },
    /// `name = lhv op rhv`
    Binary {
        name: String,
        opcode: BinaryOpcode,
        lhv: ValueId,
        rhv: ValueId,
    },
    /// `name: ty = lhv cmp rhv`
    Cmp {
        name: String,
        ty: TypeRef,
        opcode: CmpOpcode,
        lhv: ValueId,
        rhv: ValueId,
    },
    /// `[name =] callee.method(args)`; name is None for void calls
    Call {
        kind: CallKind,
        method: Method,
        name: Option<String>,
        callee: Option<ValueId>,
        args: Vec<ValueId>,
    },
    /// Branch taken inside instrumented code
    Branch { label: String },
}

impl Instruction {
    /// Name of the value this instruction defines, if any
    pub fn defined_name(&self) -> Option<&str> {
        match self {
            Self::FieldLoad { name, .. } | Self::Binary { name, .. } | Self::Cmp { name, .. } => {
                Some(name)
            }
            Self::Call { name, .. } => name.as_deref(),
            Self::FieldStore { .. } | Self::Branch { .. } => None,
        }
    }

    pub fn call_kind(&self) -> Option<CallKind> {
        match self {
            Self::Call { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

fn fmt_owner(owner: &Option<ValueId>, field: &Field) -> String {
    match owner {
        Some(id) => format!("#{}.{}", id.0, field.name),
        None => format!("{}.{}", field.class.name, field.name),
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldLoad { name, field, owner } => {
                write!(f, "{} = load {}", name, fmt_owner(owner, field))
            }
            Self::FieldStore {
                field,
                owner,
                value,
            } => write!(f, "store {} = #{}", fmt_owner(owner, field), value.0),
            Self::Binary {
                name,
                opcode,
                lhv,
                rhv,
            } => write!(f, "{} = #{} {} #{}", name, lhv.0, opcode, rhv.0),
            Self::Cmp {
                name,
                ty,
                opcode,
                lhv,
                rhv,
            } => write!(f, "{}: {} = #{} {} #{}", name, ty, lhv.0, opcode, rhv.0),
            Self::Call {
                kind,
                method,
                name,
                callee,
                args,
            } => {
                if let Some(name) = name {
                    write!(f, "{} = ", name)?;
                }
                let args: Vec<String> = args.iter().map(|a| format!("#{}", a.0)).collect();
                match callee {
                    Some(callee) => write!(
                        f,
                        "call{} #{}.{}({})",
                        kind,
                        callee.0,
                        method.name,
                        args.join(", ")
                    ),
                    None => write!(
                        f,
                        "call{} {}.{}({})",
                        kind,
                        method.class.name,
                        method.name,
                        args.join(", ")
                    ),
                }
            }
            Self::Branch { label } => write!(f, "branch {}", label),
        }
    }
}
