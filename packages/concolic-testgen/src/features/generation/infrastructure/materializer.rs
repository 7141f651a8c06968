//! Default statement materializer
//!
//! Literals become literal statements, objects a constructor statement plus
//! one field assignment per field. `null` is referenced inline. Static field
//! values are assigned before the call under test, which only takes the
//! receiver and arguments.

use crate::errors::{ConcolicError, Result};
use crate::features::generation::domain::ActionSequence;
use crate::features::generation::ports::StatementMaterializer;
use crate::shared::models::{
    Method, Parameters, Reference, ReferenceKind, TestAction, TestCase,
};
use tracing::trace;

#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceMaterializer;

impl SequenceMaterializer {
    pub fn new() -> Self {
        Self
    }
}

impl StatementMaterializer for SequenceMaterializer {
    fn generate_statements(
        &self,
        test: &mut TestCase,
        sequence: &ActionSequence,
    ) -> Result<Reference> {
        match sequence {
            ActionSequence::Null { ty } => Ok(test.new_reference(ty.clone(), ReferenceKind::Null)),
            ActionSequence::Primitive { ty, value } => {
                let result = test.new_variable(ty.clone());
                test.push(TestAction::Literal {
                    result: result.clone(),
                    value: value.clone(),
                });
                Ok(result)
            }
            ActionSequence::Object {
                ty,
                constructor,
                fields,
            } => {
                let object = test.new_variable(ty.clone());
                test.push(TestAction::Constructor {
                    result: object.clone(),
                    constructor: constructor.clone(),
                    args: vec![],
                });

                for (field, value) in fields {
                    let value = self.generate_statements(test, value)?;
                    let source = (!field.is_static).then(|| Box::new(object.clone()));
                    let target = test.new_reference(
                        field.ty.clone(),
                        ReferenceKind::Field {
                            source,
                            field: field.clone(),
                        },
                    );
                    test.push(TestAction::Assignment { target, value });
                }
                trace!(ty = %ty, fields = fields.len(), "materialized object");
                Ok(object)
            }
            ActionSequence::StaticField { field, value } => {
                let value = self.generate_statements(test, value)?;
                let target = test.new_reference(
                    field.ty.clone(),
                    ReferenceKind::Field {
                        source: None,
                        field: field.clone(),
                    },
                );
                test.push(TestAction::Assignment {
                    target: target.clone(),
                    value,
                });
                Ok(target)
            }
        }
    }

    fn generate_test_call(
        &self,
        test: &mut TestCase,
        method: &Method,
        parameters: &Parameters<Reference>,
    ) -> Result<()> {
        if parameters.arguments.len() != method.desc.params.len() {
            return Err(ConcolicError::Materialization(format!(
                "{} takes {} arguments, got {}",
                method,
                method.desc.params.len(),
                parameters.arguments.len()
            )));
        }

        if method.is_constructor() {
            let result = test.new_variable(method.class.as_type());
            test.push(TestAction::Constructor {
                result,
                constructor: method.spec(),
                args: parameters.arguments.clone(),
            });
            return Ok(());
        }

        let callee = if method.is_static {
            None
        } else {
            let instance = parameters.instance.clone().ok_or_else(|| {
                ConcolicError::Materialization(format!("no receiver for instance method {}", method))
            })?;
            Some(instance)
        };
        let result = test.new_variable(method.desc.ret.clone());
        test.push(TestAction::Call {
            result,
            callee,
            method: method.spec(),
            args: parameters.arguments.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{Class, FieldSpec, Literal, MethodDesc, MethodSpec, TypeRef};
    use pretty_assertions::assert_eq;

    fn method(is_static: bool) -> Method {
        Method {
            class: Class::new("Foo"),
            name: "m".into(),
            desc: MethodDesc::new(vec![TypeRef::Int], TypeRef::Int),
            is_static,
        }
    }

    #[test]
    fn test_object_materialization() {
        let sequence = ActionSequence::Object {
            ty: TypeRef::class("Foo"),
            constructor: MethodSpec::constructor("Foo", vec![]),
            fields: vec![(
                FieldSpec::instance("Foo", "x", TypeRef::Int),
                ActionSequence::Primitive {
                    ty: TypeRef::Int,
                    value: Literal::Int(7),
                },
            )],
        };

        let mut test = TestCase::new();
        let object = SequenceMaterializer::new()
            .generate_statements(&mut test, &sequence)
            .unwrap();
        assert_eq!(object.ty, TypeRef::class("Foo"));
        assert_eq!(test.to_string(), "v0 = new Foo();\nv1 = 7;\nv0.x = v1;\n");
    }

    #[test]
    fn test_static_field_assignment() {
        let sequence = ActionSequence::StaticField {
            field: FieldSpec::static_field("Foo", "F", TypeRef::Int),
            value: Box::new(ActionSequence::Primitive {
                ty: TypeRef::Int,
                value: Literal::Int(42),
            }),
        };

        let mut test = TestCase::new();
        let target = SequenceMaterializer::new()
            .generate_statements(&mut test, &sequence)
            .unwrap();
        assert!(matches!(target.kind, ReferenceKind::Field { source: None, .. }));
        assert_eq!(test.to_string(), "v0 = 42;\nFoo.F = v0;\n");
    }

    #[test]
    fn test_call_appended_last() {
        let materializer = SequenceMaterializer::new();
        let mut test = TestCase::new();
        let receiver = materializer
            .generate_statements(
                &mut test,
                &ActionSequence::Object {
                    ty: TypeRef::class("Foo"),
                    constructor: MethodSpec::constructor("Foo", vec![]),
                    fields: vec![],
                },
            )
            .unwrap();
        let arg = materializer
            .generate_statements(
                &mut test,
                &ActionSequence::Primitive {
                    ty: TypeRef::Int,
                    value: Literal::Int(1),
                },
            )
            .unwrap();

        materializer
            .generate_test_call(&mut test, &method(false), &Parameters::new(Some(receiver), vec![arg]))
            .unwrap();
        assert_eq!(
            test.to_string(),
            "v0 = new Foo();\nv1 = 1;\nv2 = v0.m(v1);\n"
        );
    }

    #[test]
    fn test_instance_call_needs_receiver() {
        let mut test = TestCase::new();
        let arg = Reference::constant(0, TypeRef::Int, Literal::Int(1));
        let err = SequenceMaterializer::new()
            .generate_test_call(&mut test, &method(false), &Parameters::new(None, vec![arg]))
            .unwrap_err();
        assert!(matches!(err, ConcolicError::Materialization(_)));
        assert!(test.is_empty());
    }
}
