//! Construction plans for solved descriptors

use crate::shared::models::{FieldSpec, Literal, MethodSpec, TypeRef};
use serde::{Deserialize, Serialize};

/// Ordered steps that rebuild one descriptor as a concrete value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionSequence {
    /// `null` of the given type; needs no statement
    Null { ty: TypeRef },
    /// Single literal statement
    Primitive { ty: TypeRef, value: Literal },
    /// Constructor call followed by one assignment per field
    Object {
        ty: TypeRef,
        constructor: MethodSpec,
        fields: Vec<(FieldSpec, ActionSequence)>,
    },
    /// Build `value`, then assign it to a static field
    StaticField {
        field: FieldSpec,
        value: Box<ActionSequence>,
    },
}

impl ActionSequence {
    pub fn ty(&self) -> &TypeRef {
        match self {
            Self::Null { ty } | Self::Primitive { ty, .. } | Self::Object { ty, .. } => ty,
            Self::StaticField { field, .. } => &field.ty,
        }
    }

    /// Number of statements materializing this sequence produces
    pub fn statement_count(&self) -> usize {
        match self {
            Self::Null { .. } => 0,
            Self::Primitive { .. } => 1,
            Self::Object { fields, .. } => {
                1 + fields
                    .iter()
                    .map(|(_, value)| value.statement_count() + 1)
                    .sum::<usize>()
            }
            Self::StaticField { value, .. } => value.statement_count() + 1,
        }
    }
}
