//! Ports of the trace builder

use crate::errors::Result;
use crate::shared::models::{Class, Field, FieldSpec, Method, MethodDesc, MethodSpec, TypeRef};

/// Descriptor service: resolves classes, methods and fields by name
///
/// Lookups are by declaring-type name plus member name and signature.
pub trait ClassManager: Send + Sync {
    fn class(&self, name: &str) -> Result<Class>;

    fn method(&self, owner: &str, name: &str, desc: &MethodDesc) -> Result<Method>;

    fn field(&self, owner: &str, name: &str, ty: &TypeRef) -> Result<Field>;

    fn resolve_method(&self, spec: &MethodSpec) -> Result<Method> {
        self.method(&spec.owner, &spec.name, &spec.desc)
    }

    fn resolve_field(&self, spec: &FieldSpec) -> Result<Field> {
        self.field(&spec.owner, &spec.name, &spec.ty)
    }
}
