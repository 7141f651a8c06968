//! Concrete tests and their elementary actions

use super::descriptors::{FieldSpec, MethodSpec};
use super::reference::{RefId, Reference, ReferenceKind};
use super::types::TypeRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal payload carried by a literal action or an inline constant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Bool(bool),
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    /// Class literal (`Foo.class`)
    Class(TypeRef),
    /// Reflective method reference
    Method(MethodSpec),
    /// Host object the literal table has no entry for
    Other(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
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
            Self::Other(desc) => write!(f, "<{}>", desc),
        }
    }
}

/// Operators of a primitive expression action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Times,
    Divide,
    Remainder,
    Plus,
    Minus,
    LeftShift,
    RightShiftSigned,
    RightShiftUnsigned,
    Xor,
    And,
    ConditionalAnd,
    Or,
    ConditionalOr,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    Equals,
    NotEquals,
}

impl Operator {
    pub const ALL: [Operator; 19] = [
        Operator::Times,
        Operator::Divide,
        Operator::Remainder,
        Operator::Plus,
        Operator::Minus,
        Operator::LeftShift,
        Operator::RightShiftSigned,
        Operator::RightShiftUnsigned,
        Operator::Xor,
        Operator::And,
        Operator::ConditionalAnd,
        Operator::Or,
        Operator::ConditionalOr,
        Operator::Less,
        Operator::Greater,
        Operator::LessEquals,
        Operator::GreaterEquals,
        Operator::Equals,
        Operator::NotEquals,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Times => "*",
            Self::Divide => "/",
            Self::Remainder => "%",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::LeftShift => "<<",
            Self::RightShiftSigned => ">>",
            Self::RightShiftUnsigned => ">>>",
            Self::Xor => "^",
            Self::And => "&",
            Self::ConditionalAnd => "&&",
            Self::Or => "|",
            Self::ConditionalOr => "||",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEquals => "<=",
            Self::GreaterEquals => ">=",
            Self::Equals => "==",
            Self::NotEquals => "!=",
        }
    }
}

/// Exception raised while the host executed an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionFailure {
    pub exception: String,
    pub message: String,
}

impl ActionFailure {
    pub fn new(exception: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            exception: exception.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ActionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.exception, self.message)
    }
}

/// One elementary action of a test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TestAction {
    /// `result = source.field` (or a static field when `source` is None)
    FieldRead {
        result: Reference,
        source: Option<Reference>,
        field: FieldSpec,
    },
    /// `target = value` where target is a field or array element reference
    Assignment { target: Reference, value: Reference },
    /// `result = lhv op rhv`
    Expression {
        result: Reference,
        lhv: Reference,
        op: Operator,
        rhv: Reference,
    },
    /// `result = <literal>`
    Literal { result: Reference, value: Literal },
    /// `result = callee.method(args)`; callee is None for static methods
    Call {
        result: Reference,
        callee: Option<Reference>,
        method: MethodSpec,
        args: Vec<Reference>,
    },
    /// `result = new Owner(args)`
    Constructor {
        result: Reference,
        constructor: MethodSpec,
        args: Vec<Reference>,
    },
    /// `result = new T[length]`
    ArrayAccess { result: Reference, length: usize },
    /// `result = mock(T)`
    Mock { result: Reference, target: TypeRef },
}

impl TestAction {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::FieldRead { .. } => "field read",
            Self::Assignment { .. } => "assignment",
            Self::Expression { .. } => "expression",
            Self::Literal { .. } => "literal",
            Self::Call { .. } => "call",
            Self::Constructor { .. } => "constructor",
            Self::ArrayAccess { .. } => "array",
            Self::Mock { .. } => "mock",
        }
    }

    /// Reference the action defines
    pub fn result(&self) -> &Reference {
        match self {
            Self::FieldRead { result, .. }
            | Self::Expression { result, .. }
            | Self::Literal { result, .. }
            | Self::Call { result, .. }
            | Self::Constructor { result, .. }
            | Self::ArrayAccess { result, .. }
            | Self::Mock { result, .. } => result,
            Self::Assignment { target, .. } => target,
        }
    }
}

impl fmt::Display for TestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldRead {
                result,
                source: Some(source),
                field,
            } => write!(f, "{} = {}.{}", result, source, field.name),
            Self::FieldRead {
                result,
                source: None,
                field,
            } => write!(f, "{} = {}", result, field),
            Self::Assignment { target, value } => write!(f, "{} = {}", target, value),
            Self::Expression {
                result,
                lhv,
                op,
                rhv,
            } => write!(f, "{} = {} {} {}", result, lhv, op.symbol(), rhv),
            Self::Literal { result, value } => write!(f, "{} = {}", result, value),
            Self::Call {
                result,
                callee,
                method,
                args,
            } => {
                let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                let owner = callee
                    .as_ref()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| method.owner.clone());
                if method.desc.ret.is_void() {
                    write!(f, "{}.{}({})", owner, method.name, args.join(", "))
                } else {
                    write!(
                        f,
                        "{} = {}.{}({})",
                        result,
                        owner,
                        method.name,
                        args.join(", ")
                    )
                }
            }
            Self::Constructor {
                result,
                constructor,
                args,
            } => {
                let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{} = new {}({})", result, constructor.owner, args.join(", "))
            }
            Self::ArrayAccess { result, length } => {
                write!(f, "{} = new {}[{}]", result, result.ty, length)
            }
            Self::Mock { result, target } => write!(f, "{} = mock({})", result, target),
        }
    }
}

/// Concrete test: an ordered list of actions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    actions: Vec<TestAction>,
    next_ref: u32,
}

impl TestCase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh reference id unique within this test
    pub fn new_reference(&mut self, ty: TypeRef, kind: ReferenceKind) -> Reference {
        let id = RefId(self.next_ref);
        self.next_ref += 1;
        Reference { id, ty, kind }
    }

    pub fn new_variable(&mut self, ty: TypeRef) -> Reference {
        self.new_reference(ty, ReferenceKind::Variable)
    }

    /// Append an action; references it names must come from this test
    pub fn push(&mut self, action: TestAction) {
        let id = action.result().id.0;
        if id >= self.next_ref {
            self.next_ref = id + 1;
        }
        self.actions.push(action);
    }

    pub fn actions(&self) -> &[TestAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for action in &self.actions {
            writeln!(f, "{};", action)?;
        }
        Ok(())
    }
}
