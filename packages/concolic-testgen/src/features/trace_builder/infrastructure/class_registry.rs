//! In-memory descriptor service
//!
//! Holds class, method and field descriptors registered up front. Used when
//! the host hands over its class hierarchy eagerly, and by tests.

use crate::errors::{ConcolicError, Result};
use crate::features::trace_builder::ports::ClassManager;
use crate::shared::models::{
    Class, Field, Method, MethodDesc, TypeRef, CONSTRUCTOR_NAME,
};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
struct ClassEntry {
    class: Class,
    methods: Vec<Method>,
    fields: Vec<Field>,
}

#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: FxHashMap<String, ClassEntry>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class (replacing any previous entry) and return a builder
    /// for its members
    pub fn add_class(&mut self, class: Class) -> ClassBuilder<'_> {
        let name = class.name.clone();
        let entry = ClassEntry {
            class,
            methods: Vec::new(),
            fields: Vec::new(),
        };
        self.classes.insert(name.clone(), entry);
        ClassBuilder {
            registry: self,
            name,
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn entry(&self, name: &str) -> Result<&ClassEntry> {
        self.classes
            .get(name)
            .ok_or_else(|| ConcolicError::unknown("class", name))
    }
}

impl ClassManager for ClassRegistry {
    fn class(&self, name: &str) -> Result<Class> {
        Ok(self.entry(name)?.class.clone())
    }

    fn method(&self, owner: &str, name: &str, desc: &MethodDesc) -> Result<Method> {
        self.entry(owner)?
            .methods
            .iter()
            .find(|m| m.name == name && &m.desc == desc)
            .cloned()
            .ok_or_else(|| ConcolicError::unknown("method", format!("{}::{}{}", owner, name, desc)))
    }

    fn field(&self, owner: &str, name: &str, ty: &TypeRef) -> Result<Field> {
        self.entry(owner)?
            .fields
            .iter()
            .find(|f| f.name == name && &f.ty == ty)
            .cloned()
            .ok_or_else(|| ConcolicError::unknown("field", format!("{}.{}: {}", owner, name, ty)))
    }
}

/// Adds members to a registered class
pub struct ClassBuilder<'a> {
    registry: &'a mut ClassRegistry,
    name: String,
}

impl ClassBuilder<'_> {
    fn entry_mut(&mut self) -> &mut ClassEntry {
        // Inserted by add_class
        self.registry
            .classes
            .entry(self.name.clone())
            .or_insert_with(|| ClassEntry {
                class: Class::new(self.name.clone()),
                methods: Vec::new(),
                fields: Vec::new(),
            })
    }

    fn add_method(mut self, name: &str, params: Vec<TypeRef>, ret: TypeRef, is_static: bool) -> Self {
        let entry = self.entry_mut();
        let method = Method {
            class: entry.class.clone(),
            name: name.to_string(),
            desc: MethodDesc::new(params, ret),
            is_static,
        };
        entry.methods.push(method);
        self
    }

    fn add_field(mut self, name: &str, ty: TypeRef, is_static: bool) -> Self {
        let entry = self.entry_mut();
        let field = Field {
            class: entry.class.clone(),
            name: name.to_string(),
            ty,
            is_static,
        };
        entry.fields.push(field);
        self
    }

    pub fn method(self, name: &str, params: Vec<TypeRef>, ret: TypeRef) -> Self {
        self.add_method(name, params, ret, false)
    }

    pub fn static_method(self, name: &str, params: Vec<TypeRef>, ret: TypeRef) -> Self {
        self.add_method(name, params, ret, true)
    }

    pub fn constructor(self, params: Vec<TypeRef>) -> Self {
        self.add_method(CONSTRUCTOR_NAME, params, TypeRef::Void, false)
    }

    pub fn field(self, name: &str, ty: TypeRef) -> Self {
        self.add_field(name, ty, false)
    }

    pub fn static_field(self, name: &str, ty: TypeRef) -> Self {
        self.add_field(name, ty, true)
    }
}
