//! Predicates: symbolic effect of one instruction

use super::term::Term;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Predicate {
    /// `lhv == rhv`
    Equality { lhv: Term, rhv: Term },
    /// `field.store(value)`
    FieldStore { field: Term, value: Term },
    /// `lhv == call` for non-void calls, bare `call` otherwise
    Call { lhv: Option<Term>, call: Term },
    /// Branch condition observed with the given outcome
    Path { cond: Term, holds: bool },
}

impl Predicate {
    pub fn equality(lhv: Term, rhv: Term) -> Self {
        Self::Equality { lhv, rhv }
    }

    pub fn store(field: Term, value: Term) -> Self {
        Self::FieldStore { field, value }
    }

    pub fn call(lhv: Option<Term>, call: Term) -> Self {
        Self::Call { lhv, call }
    }

    pub fn path(cond: Term, holds: bool) -> Self {
        Self::Path { cond, holds }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equality { lhv, rhv } => write!(f, "{} == {}", lhv, rhv),
            Self::FieldStore { field, value } => write!(f, "{}.store({})", field, value),
            Self::Call { lhv: Some(lhv), call } => write!(f, "{} == {}", lhv, call),
            Self::Call { lhv: None, call } => write!(f, "{}", call),
            Self::Path { cond, holds } => write!(f, "@P {} == {}", cond, holds),
        }
    }
}
