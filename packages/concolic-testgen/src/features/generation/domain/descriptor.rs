//! Solved value descriptors

use crate::features::symbolic::Constant;
use crate::shared::models::{Class, FieldSpec, TypeRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbolic value the solver produced for one parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Descriptor {
    Null { ty: TypeRef },
    Constant(Constant),
    /// Object of `class` with the listed field values
    Object {
        class: Class,
        fields: Vec<(FieldSpec, Descriptor)>,
    },
    Array {
        element: TypeRef,
        elements: Vec<Descriptor>,
    },
    /// Value of a static field the path depends on
    StaticField {
        field: FieldSpec,
        value: Box<Descriptor>,
    },
}

impl Descriptor {
    pub fn object(class: Class) -> Self {
        Self::Object {
            class,
            fields: Vec::new(),
        }
    }

    pub fn with_field(self, field: FieldSpec, value: Descriptor) -> Self {
        match self {
            Self::Object { class, mut fields } => {
                fields.push((field, value));
                Self::Object { class, fields }
            }
            other => other,
        }
    }

    pub fn static_field(field: FieldSpec, value: Descriptor) -> Self {
        Self::StaticField {
            field,
            value: Box::new(value),
        }
    }

    pub fn ty(&self) -> TypeRef {
        match self {
            Self::Null { ty } => ty.clone(),
            Self::Constant(c) => c.ty(),
            Self::Object { class, .. } => class.as_type(),
            Self::Array { element, .. } => TypeRef::array(element.clone()),
            Self::StaticField { field, .. } => field.ty.clone(),
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null { .. } => write!(f, "null"),
            Self::Constant(c) => write!(f, "{}", c),
            Self::Object { class, fields } => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|(field, value)| format!("{} = {}", field.name, value))
                    .collect();
                write!(f, "{} {{{}}}", class.name, fields.join(", "))
            }
            Self::Array { element, elements } => {
                let elements: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "{}[] [{}]", element, elements.join(", "))
            }
            Self::StaticField { field, value } => write!(f, "{} = {}", field, value),
        }
    }
}
