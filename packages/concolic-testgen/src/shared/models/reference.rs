//! References: names a test action uses for values produced earlier

use super::descriptors::FieldSpec;
use super::test_case::Literal;
use super::types::TypeRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Small integer handle identifying a reference within one test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RefId(pub u32);

impl fmt::Display for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// What a reference points at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReferenceKind {
    /// Result of an earlier action
    Variable,
    /// The `null` literal
    Null,
    /// Inline constant that was never declared by its own action
    Constant(Literal),
    /// Field of another reference (or a static field when `source` is None)
    Field {
        source: Option<Box<Reference>>,
        field: FieldSpec,
    },
    /// Array-typed variable
    Array,
    /// Element of an array reference
    ArrayIndex { array: Box<Reference>, index: usize },
}

/// Immutable reference to a value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub id: RefId,
    pub ty: TypeRef,
    pub kind: ReferenceKind,
}

impl Reference {
    pub fn variable(id: u32, ty: TypeRef) -> Self {
        Self {
            id: RefId(id),
            ty,
            kind: ReferenceKind::Variable,
        }
    }

    pub fn null(id: u32, ty: TypeRef) -> Self {
        Self {
            id: RefId(id),
            ty,
            kind: ReferenceKind::Null,
        }
    }

    pub fn constant(id: u32, ty: TypeRef, value: Literal) -> Self {
        Self {
            id: RefId(id),
            ty,
            kind: ReferenceKind::Constant(value),
        }
    }

    pub fn field(id: u32, source: Option<Reference>, field: FieldSpec) -> Self {
        Self {
            id: RefId(id),
            ty: field.ty.clone(),
            kind: ReferenceKind::Field {
                source: source.map(Box::new),
                field,
            },
        }
    }

    pub fn array_index(id: u32, array: Reference, index: usize, element: TypeRef) -> Self {
        Self {
            id: RefId(id),
            ty: element,
            kind: ReferenceKind::ArrayIndex {
                array: Box::new(array),
                index,
            },
        }
    }

    /// Name used for the instruction producing this reference's value
    pub fn name(&self) -> String {
        self.id.to_string()
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ReferenceKind::Null => write!(f, "null"),
            ReferenceKind::Constant(value) => write!(f, "{}", value),
            ReferenceKind::Field {
                source: Some(source),
                field,
            } => write!(f, "{}.{}", source, field.name),
            ReferenceKind::Field { source: None, field } => write!(f, "{}", field),
            ReferenceKind::ArrayIndex { array, index } => write!(f, "{}[{}]", array, index),
            ReferenceKind::Variable | ReferenceKind::Array => write!(f, "{}", self.id),
        }
    }
}
