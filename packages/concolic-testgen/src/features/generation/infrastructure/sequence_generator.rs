//! Default descriptor → action sequence translation

use crate::errors::{ConcolicError, Result};
use crate::features::generation::domain::{ActionSequence, Descriptor};
use crate::features::generation::ports::ActionSequenceGenerator;
use crate::features::symbolic::Constant;
use crate::shared::models::{Literal, MethodSpec, TypeRef};

/// Builds objects through their no-argument constructor and field setters
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorSequenceGenerator;

impl DescriptorSequenceGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ActionSequenceGenerator for DescriptorSequenceGenerator {
    fn generate(&self, descriptor: &Descriptor) -> Result<ActionSequence> {
        match descriptor {
            Descriptor::Null { ty } => Ok(ActionSequence::Null { ty: ty.clone() }),
            Descriptor::Constant(Constant::Null) => Ok(ActionSequence::Null {
                ty: TypeRef::object(),
            }),
            Descriptor::Constant(constant) => Ok(ActionSequence::Primitive {
                ty: constant.ty(),
                value: literal_of(constant)?,
            }),
            Descriptor::Object { class, fields } => {
                let fields = fields
                    .iter()
                    .map(|(field, value)| Ok((field.clone(), self.generate(value)?)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(ActionSequence::Object {
                    ty: class.as_type(),
                    constructor: MethodSpec::constructor(class.name.clone(), vec![]),
                    fields,
                })
            }
            Descriptor::StaticField { field, value } => {
                if !field.is_static {
                    return Err(ConcolicError::SequenceGeneration(format!(
                        "{} is not a static field",
                        field
                    )));
                }
                Ok(ActionSequence::StaticField {
                    field: field.clone(),
                    value: Box::new(self.generate(value)?),
                })
            }
            Descriptor::Array { element, .. } => Err(ConcolicError::SequenceGeneration(format!(
                "array descriptor of {} has no construction plan",
                element
            ))),
        }
    }
}

fn literal_of(constant: &Constant) -> Result<Literal> {
    let literal = match constant {
        Constant::Bool(v) => Literal::Bool(*v),
        Constant::Byte(v) => Literal::Byte(*v),
        Constant::Char(v) => Literal::Char(*v),
        Constant::Short(v) => Literal::Short(*v),
        Constant::Int(v) => Literal::Int(*v),
        Constant::Long(v) => Literal::Long(*v),
        Constant::Float(v) => Literal::Float(*v),
        Constant::Double(v) => Literal::Double(*v),
        Constant::String(v) => Literal::String(v.clone()),
        Constant::Class(ty) => Literal::Class(ty.clone()),
        Constant::Method(m) => Literal::Method(m.spec()),
        Constant::Null => {
            return Err(ConcolicError::SequenceGeneration(
                "null has no literal form".to_string(),
            ))
        }
    };
    Ok(literal)
}
