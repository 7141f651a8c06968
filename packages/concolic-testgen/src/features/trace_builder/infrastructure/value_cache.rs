//! Value/Term cache
//!
//! Arena of simulated values for one execution. References map to value
//! handles, value handles map to symbolic terms. Both mappings are
//! create-once; nothing is evicted until the owning execution is cleared.

use crate::errors::{ConcolicError, Result};
use crate::features::symbolic::{Constant, NameGenerator, SimulatedValue, Term, ValueId};
use crate::features::trace_builder::ports::ClassManager;
use crate::shared::models::types::{CLASS_CLASS, METHOD_CLASS, STRING_CLASS};
use crate::shared::models::{Literal, RefId, Reference, ReferenceKind, TypeRef};
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct ValueTermCache {
    values: Vec<SimulatedValue>,
    terms: Vec<Option<Term>>,
    by_ref: FxHashMap<RefId, ValueId>,
    names: NameGenerator,
}

impl ValueTermCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value of `reference`, building it on first use
    pub fn value_of(&mut self, reference: &Reference, classes: &dyn ClassManager) -> Result<ValueId> {
        if let Some(id) = self.by_ref.get(&reference.id) {
            return Ok(*id);
        }
        let value = Self::new_value(reference, classes)?;
        let id = self.alloc(value);
        self.by_ref.insert(reference.id, id);
        Ok(id)
    }

    /// Bind the value an action produced to its result reference and give it
    /// a fresh term
    pub fn register(&mut self, reference: &Reference, value: SimulatedValue) -> Result<(ValueId, Term)> {
        if self.by_ref.contains_key(&reference.id) {
            return Err(ConcolicError::invariant(format!(
                "reference {} already has a value",
                reference.id
            )));
        }
        let id = self.alloc(value);
        self.by_ref.insert(reference.id, id);
        let term = self.new_term(id);
        Ok((id, term))
    }

    /// Cached term of `id`, building it on first use
    pub fn term_of(&mut self, id: ValueId) -> Term {
        if let Some(term) = &self.terms[id.index()] {
            return term.clone();
        }
        self.new_term(id)
    }

    pub fn value(&self, id: ValueId) -> &SimulatedValue {
        &self.values[id.index()]
    }

    pub fn lookup(&self, reference: &Reference) -> Option<ValueId> {
        self.by_ref.get(&reference.id).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.terms.clear();
        self.by_ref.clear();
        self.names = NameGenerator::new();
    }

    fn alloc(&mut self, value: SimulatedValue) -> ValueId {
        let id = ValueId(self.values.len() as u32);
        self.values.push(value);
        self.terms.push(None);
        id
    }

    fn new_term(&mut self, id: ValueId) -> Term {
        let term = match &self.values[id.index()] {
            SimulatedValue::Constant(c) => Term::constant(c.clone()),
            value @ SimulatedValue::Named { .. } => {
                let name = self.names.next_name(&value.name());
                Term::value(value.ty(), name)
            }
        };
        self.terms[id.index()] = Some(term.clone());
        term
    }

    fn new_value(reference: &Reference, classes: &dyn ClassManager) -> Result<SimulatedValue> {
        match &reference.kind {
            ReferenceKind::Null => Ok(SimulatedValue::Constant(Constant::Null)),
            ReferenceKind::Constant(literal) => build_value(literal, &reference.ty, classes),
            ReferenceKind::Variable => Err(ConcolicError::invariant(format!(
                "reference {} is used before any action defined it",
                reference.id
            ))),
            ReferenceKind::Array | ReferenceKind::ArrayIndex { .. } => Err(
                ConcolicError::unsupported(format!("array reference {} as an operand", reference)),
            ),
            ReferenceKind::Field { .. } => Err(ConcolicError::unsupported(format!(
                "field reference {} as an operand",
                reference
            ))),
        }
    }
}

/// Constant value of a literal declared with type `declared`
///
/// Accepts primitive and boxed kinds, strings, class literals and method
/// references. Anything else is outside the constant table.
pub fn build_value(
    literal: &Literal,
    declared: &TypeRef,
    classes: &dyn ClassManager,
) -> Result<SimulatedValue> {
    let constant = match literal {
        Literal::Bool(v) if declared.is_kind_of(&TypeRef::Bool) => Constant::Bool(*v),
        Literal::Byte(v) if declared.is_kind_of(&TypeRef::Byte) => Constant::Byte(*v),
        Literal::Char(v) if declared.is_kind_of(&TypeRef::Char) => Constant::Char(*v),
        Literal::Short(v) if declared.is_kind_of(&TypeRef::Short) => Constant::Short(*v),
        Literal::Int(v) if declared.is_kind_of(&TypeRef::Int) => Constant::Int(*v),
        Literal::Long(v) if declared.is_kind_of(&TypeRef::Long) => Constant::Long(*v),
        Literal::Float(v) if declared.is_kind_of(&TypeRef::Float) => Constant::Float(*v),
        Literal::Double(v) if declared.is_kind_of(&TypeRef::Double) => Constant::Double(*v),
        Literal::String(v) if declared.is_class_named(STRING_CLASS) => Constant::String(v.clone()),
        Literal::Class(ty) if declared.is_class_named(CLASS_CLASS) => Constant::Class(ty.clone()),
        Literal::Method(spec) if declared.is_class_named(METHOD_CLASS) => {
            Constant::Method(classes.resolve_method(spec)?)
        }
        _ => {
            return Err(ConcolicError::UnsupportedLiteral {
                payload: literal.to_string(),
                declared: declared.to_string(),
            })
        }
    };
    Ok(SimulatedValue::Constant(constant))
}
