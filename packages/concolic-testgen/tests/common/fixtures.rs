//! Class fixtures and a small test-case builder

use std::sync::Arc;

use concolic_testgen::features::trace_builder::{ClassManager, ClassRegistry};
use concolic_testgen::shared::models::{
    Class, FieldSpec, Literal, Method, MethodSpec, Operator, Reference, TestAction, TestCase,
    TypeRef,
};

pub fn foo() -> TypeRef {
    TypeRef::class("Foo")
}

/// `Foo { static int F, G; int x; static Foo make(); int m(int); void touch() }`
pub fn registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    registry
        .add_class(Class::new("Foo"))
        .constructor(vec![])
        .static_field("F", TypeRef::Int)
        .static_field("G", TypeRef::Int)
        .field("x", TypeRef::Int)
        .static_method("make", vec![], foo())
        .method("m", vec![TypeRef::Int], TypeRef::Int)
        .method("touch", vec![], TypeRef::Void);
    registry
}

pub fn classes() -> Arc<dyn ClassManager> {
    Arc::new(registry())
}

pub fn make_spec() -> MethodSpec {
    MethodSpec::new("Foo", "make", vec![], foo())
}

pub fn m_spec() -> MethodSpec {
    MethodSpec::new("Foo", "m", vec![TypeRef::Int], TypeRef::Int)
}

pub fn m_method() -> Method {
    registry()
        .resolve_method(&m_spec())
        .expect("Foo::m is registered")
}

/// Builds test cases action by action
#[derive(Debug, Default)]
pub struct TestCaseBuilder {
    test: TestCase,
}

impl TestCaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn int(&mut self, value: i32) -> Reference {
        let result = self.test.new_variable(TypeRef::Int);
        self.test.push(TestAction::Literal {
            result: result.clone(),
            value: Literal::Int(value),
        });
        result
    }

    pub fn static_read(&mut self, name: &str) -> Reference {
        let result = self.test.new_variable(TypeRef::Int);
        self.test.push(TestAction::FieldRead {
            result: result.clone(),
            source: None,
            field: FieldSpec::static_field("Foo", name, TypeRef::Int),
        });
        result
    }

    pub fn binary(&mut self, lhv: &Reference, op: Operator, rhv: &Reference) -> Reference {
        let result = self.test.new_variable(TypeRef::Int);
        self.test.push(TestAction::Expression {
            result: result.clone(),
            lhv: lhv.clone(),
            op,
            rhv: rhv.clone(),
        });
        result
    }

    pub fn make(&mut self) -> Reference {
        let result = self.test.new_variable(foo());
        self.test.push(TestAction::Call {
            result: result.clone(),
            callee: None,
            method: make_spec(),
            args: vec![],
        });
        result
    }

    pub fn call_m(&mut self, callee: &Reference, arg: &Reference) -> Reference {
        let result = self.test.new_variable(TypeRef::Int);
        self.test.push(TestAction::Call {
            result: result.clone(),
            callee: Some(callee.clone()),
            method: m_spec(),
            args: vec![arg.clone()],
        });
        result
    }

    pub fn push(&mut self, action: TestAction) {
        self.test.push(action);
    }

    pub fn build(self) -> TestCase {
        self.test
    }
}

/// `o = Foo.make(); x = <arg>; r = o.m(x)`
pub fn call_m_test(arg: i32) -> TestCase {
    let mut builder = TestCaseBuilder::new();
    let o = builder.make();
    let x = builder.int(arg);
    builder.call_m(&o, &x);
    builder.build()
}
