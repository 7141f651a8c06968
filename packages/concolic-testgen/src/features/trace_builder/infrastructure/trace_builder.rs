//! Symbolic trace builder
//!
//! One instance per concrete execution. The host fires `before_action` and
//! `after_action` around every elementary action of a test; the builder
//! translates the action into a `StateClause` and appends it to the
//! execution trace.
//!
//! Field reads, assignments and expressions are committed immediately. Calls
//! are returned as a [`PendingCall`] inside the [`ActionTicket`] and committed
//! by `after_action`, after the call itself has run. Each committed call also
//! records the trace length under its call site; the prefix up to that length
//! is the per-method trace handed to the path-selection oracle.

use crate::errors::{ConcolicError, Result};
use crate::features::symbolic::{
    CallDispatch, Instruction, Predicate, SimulatedValue, StateClause, SymbolicTrace,
    Term, TraceKey, ValueId,
};
use crate::features::trace_builder::domain::{ActionTicket, OperatorKind, PendingCall};
use crate::features::trace_builder::infrastructure::value_cache::{build_value, ValueTermCache};
use crate::features::trace_builder::ports::ClassManager;
use crate::shared::models::{
    ActionFailure, FieldSpec, Literal, MethodSpec, Operator, Parameters, Reference,
    ReferenceKind, TestAction,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Recorder lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    /// Ready to record
    Armed,
    /// Inside an action; this builder is the active recorder
    Recording,
    /// Between actions; the active recorder is the no-op one
    Suspended,
    /// Execution finished or translation failed
    Disabled,
}

/// Recorder instrumented code writes into while an action runs
///
/// Only a `Recording` builder hands out a live recorder, and the mutable
/// borrow guarantees there is at most one at a time.
pub enum ActiveRecorder<'a> {
    Live(&'a mut SymbolicTraceBuilder),
    Disabled,
}

impl ActiveRecorder<'_> {
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    /// Append a clause produced by instrumented code; no-op when disabled
    pub fn record(&mut self, clause: StateClause) -> bool {
        match self {
            Self::Live(builder) => {
                builder.trace.push(clause);
                true
            }
            Self::Disabled => false,
        }
    }

    /// Term of a reference's value, for clauses built by instrumentation
    pub fn term_of(&mut self, reference: &Reference) -> Result<Option<Term>> {
        match self {
            Self::Live(builder) => {
                let id = builder.cache.value_of(reference, builder.classes.as_ref())?;
                Ok(Some(builder.cache.term_of(id)))
            }
            Self::Disabled => Ok(None),
        }
    }
}

pub struct SymbolicTraceBuilder {
    classes: Arc<dyn ClassManager>,
    cache: ValueTermCache,
    trace: SymbolicTrace,
    /// Call site -> trace prefix length at commit
    method_traces: BTreeMap<TraceKey, usize>,
    state: RecorderState,
    position: usize,
    committed_calls: usize,
}

impl SymbolicTraceBuilder {
    pub fn new(classes: Arc<dyn ClassManager>) -> Self {
        Self {
            classes,
            cache: ValueTermCache::new(),
            trace: SymbolicTrace::new(),
            method_traces: BTreeMap::new(),
            state: RecorderState::Armed,
            position: 0,
            committed_calls: 0,
        }
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// Full execution trace in action order
    pub fn trace(&self) -> &SymbolicTrace {
        &self.trace
    }

    /// Per-call-site traces, ordered by position
    ///
    /// Each one borrows the execution trace up to and including its call.
    pub fn method_traces(&self) -> impl Iterator<Item = (&TraceKey, &[StateClause])> {
        let clauses = self.trace.clauses();
        self.method_traces
            .iter()
            .map(move |(key, &len)| (key, &clauses[..len]))
    }

    pub fn into_method_traces(self) -> BTreeMap<TraceKey, SymbolicTrace> {
        self.method_traces()
            .map(|(key, clauses)| (key.clone(), clauses.iter().cloned().collect()))
            .collect()
    }

    pub fn cache(&self) -> &ValueTermCache {
        &self.cache
    }

    /// Number of pending calls committed so far
    pub fn committed_calls(&self) -> usize {
        self.committed_calls
    }

    pub fn active_recorder(&mut self) -> ActiveRecorder<'_> {
        if self.state == RecorderState::Recording {
            ActiveRecorder::Live(self)
        } else {
            ActiveRecorder::Disabled
        }
    }

    // ------------------------------------------------------------------
    // Host hooks
    // ------------------------------------------------------------------

    /// Translate `action` and become the active recorder
    ///
    /// A translation failure disables the builder: its trace can no longer
    /// be trusted and the host must abandon the execution.
    pub fn before_action(&mut self, action: &TestAction) -> Result<ActionTicket> {
        match self.state {
            RecorderState::Armed | RecorderState::Suspended => {}
            RecorderState::Recording => {
                return Err(ConcolicError::invariant(
                    "before_action called while the previous action is still recording",
                ))
            }
            RecorderState::Disabled => {
                return Err(ConcolicError::invariant("trace builder is disabled"))
            }
        }

        let position = self.position;
        self.position += 1;
        self.state = RecorderState::Recording;
        trace!(position, action = %action, "recording action");

        match self.dispatch(action) {
            Ok(pending) => Ok(ActionTicket { position, pending }),
            Err(e) => {
                warn!(
                    position,
                    kind = action.kind_name(),
                    error = %e,
                    "action translation failed, disabling trace builder"
                );
                self.state = RecorderState::Disabled;
                Err(e)
            }
        }
    }

    /// Leave the action and commit its pending call, if any
    ///
    /// The commit happens whether or not the action raised.
    pub fn after_action(&mut self, ticket: ActionTicket, failure: Option<&ActionFailure>) -> Result<()> {
        if self.state != RecorderState::Recording {
            return Err(ConcolicError::invariant(format!(
                "after_action called in state {:?}",
                self.state
            )));
        }
        self.state = RecorderState::Suspended;

        if let Some(failure) = failure {
            trace!(position = ticket.position, exception = %failure, "action raised");
        }
        if let Some(call) = ticket.pending {
            self.commit_call(ticket.position, call);
        }
        Ok(())
    }

    /// Run `body` as one action between the before/after hooks
    ///
    /// Returns the action's own outcome; the pending call is committed in
    /// both cases.
    pub fn record_action<T, F>(
        &mut self,
        action: &TestAction,
        body: F,
    ) -> Result<std::result::Result<T, ActionFailure>>
    where
        F: FnOnce(&mut ActiveRecorder<'_>) -> std::result::Result<T, ActionFailure>,
    {
        let ticket = self.before_action(action)?;
        let outcome = {
            let mut recorder = self.active_recorder();
            body(&mut recorder)
        };
        self.after_action(ticket, outcome.as_ref().err())?;
        Ok(outcome)
    }

    /// Host console output; not part of the symbolic model
    pub fn output(&mut self, _position: usize, _output: &str) {}

    pub fn execution_finished(&mut self) {
        if self.state == RecorderState::Recording {
            warn!("execution finished while an action was still recording");
        }
        self.state = RecorderState::Disabled;
        debug!(
            clauses = self.trace.len(),
            calls = self.committed_calls,
            "execution finished"
        );
    }

    /// Drop caches and traces and re-arm for a new execution
    pub fn clear(&mut self) {
        self.cache.clear();
        self.trace = SymbolicTrace::new();
        self.method_traces.clear();
        self.position = 0;
        self.committed_calls = 0;
        self.state = RecorderState::Armed;
    }

    // ------------------------------------------------------------------
    // Translation
    // ------------------------------------------------------------------

    fn dispatch(&mut self, action: &TestAction) -> Result<Option<PendingCall>> {
        match action {
            TestAction::FieldRead {
                result,
                source,
                field,
            } => self.handle_field_read(result, source.as_ref(), field).map(|_| None),
            TestAction::Assignment { target, value } => {
                self.handle_assignment(target, value).map(|_| None)
            }
            TestAction::Expression {
                result,
                lhv,
                op,
                rhv,
            } => self.handle_expression(result, lhv, *op, rhv).map(|_| None),
            TestAction::Literal { result, value } => {
                self.handle_literal(result, value).map(|_| None)
            }
            TestAction::Call {
                result,
                callee,
                method,
                args,
            } => self
                .handle_call(result, callee.as_ref(), method, args)
                .map(Some),
            TestAction::ArrayAccess { .. } => {
                Err(ConcolicError::unsupported("array statement translation"))
            }
            TestAction::Constructor { .. } => {
                Err(ConcolicError::unsupported("constructor statement translation"))
            }
            TestAction::Mock { .. } => Err(ConcolicError::unsupported("mocked call translation")),
        }
    }

    fn value_of(&mut self, reference: &Reference) -> Result<ValueId> {
        self.cache.value_of(reference, self.classes.as_ref())
    }

    fn handle_field_read(
        &mut self,
        result: &Reference,
        source: Option<&Reference>,
        spec: &FieldSpec,
    ) -> Result<()> {
        let field = self.classes.resolve_field(spec)?;
        let owner = source.map(|s| self.value_of(s)).transpose()?;

        let name = result.name();
        let instruction = if field.is_static {
            Instruction::FieldLoad {
                name: name.clone(),
                field: field.clone(),
                owner: None,
            }
        } else {
            let owner = owner.ok_or_else(|| {
                ConcolicError::invariant(format!("instance field {} read without an owner", field))
            })?;
            Instruction::FieldLoad {
                name: name.clone(),
                field: field.clone(),
                owner: Some(owner),
            }
        };

        let (_, value_term) = self
            .cache
            .register(result, SimulatedValue::named(name, field.ty.clone()))?;
        let owner_term = match owner {
            Some(owner) if !field.is_static => self.cache.term_of(owner),
            _ => Term::static_ref(field.class.clone()),
        };

        let predicate = Predicate::equality(
            value_term,
            owner_term.field(field.ty.clone(), field.name.clone()).load(),
        );
        self.commit(StateClause::new(instruction, predicate));
        Ok(())
    }

    fn handle_assignment(&mut self, target: &Reference, value: &Reference) -> Result<()> {
        let value = self.value_of(value)?;
        let value_term = self.cache.term_of(value);

        let clause = match &target.kind {
            ReferenceKind::ArrayIndex { .. } => {
                return Err(ConcolicError::unsupported("array element assignment"))
            }
            ReferenceKind::Field { source, field } => {
                let field = self.classes.resolve_field(field)?;
                let owner = source.as_deref().map(|s| self.value_of(s)).transpose()?;

                let instruction = if field.is_static {
                    Instruction::FieldStore {
                        field: field.clone(),
                        owner: None,
                        value,
                    }
                } else {
                    let owner = owner.ok_or_else(|| {
                        ConcolicError::invariant(format!(
                            "instance field {} assigned without an owner",
                            field
                        ))
                    })?;
                    Instruction::FieldStore {
                        field: field.clone(),
                        owner: Some(owner),
                        value,
                    }
                };

                let owner_term = match owner {
                    Some(owner) if !field.is_static => self.cache.term_of(owner),
                    _ => Term::static_ref(field.class.clone()),
                };
                let predicate = Predicate::store(
                    owner_term.field(field.ty.clone(), field.name.clone()),
                    value_term,
                );
                StateClause::new(instruction, predicate)
            }
            _ => {
                return Err(ConcolicError::unreachable(format!(
                    "assignment to {} which is neither a field nor an array element",
                    target
                )))
            }
        };

        self.commit(clause);
        Ok(())
    }

    fn handle_expression(
        &mut self,
        result: &Reference,
        lhv: &Reference,
        op: Operator,
        rhv: &Reference,
    ) -> Result<()> {
        let lhv = self.value_of(lhv)?;
        let rhv = self.value_of(rhv)?;
        let kind = OperatorKind::classify(op)?;

        let name = result.name();
        let (instruction, ty) = match kind {
            OperatorKind::Arithmetic(opcode) => (
                Instruction::Binary {
                    name: name.clone(),
                    opcode,
                    lhv,
                    rhv,
                },
                self.cache.value(lhv).ty(),
            ),
            OperatorKind::Relational(opcode) => (
                Instruction::Cmp {
                    name: name.clone(),
                    ty: result.ty.clone(),
                    opcode,
                    lhv,
                    rhv,
                },
                result.ty.clone(),
            ),
        };

        let (_, value_term) = self.cache.register(result, SimulatedValue::named(name, ty))?;
        let lhv_term = self.cache.term_of(lhv);
        let rhv_term = self.cache.term_of(rhv);

        let rhs = match kind {
            OperatorKind::Arithmetic(opcode) => lhv_term.apply_binary(opcode, rhv_term),
            OperatorKind::Relational(opcode) => lhv_term.apply_cmp(opcode, rhv_term),
        };
        self.commit(StateClause::new(instruction, Predicate::equality(value_term, rhs)));
        Ok(())
    }

    fn handle_literal(&mut self, result: &Reference, literal: &Literal) -> Result<()> {
        let value = build_value(literal, &result.ty, self.classes.as_ref())?;
        self.cache.register(result, value)?;
        Ok(())
    }

    fn handle_call(
        &mut self,
        result: &Reference,
        callee: Option<&Reference>,
        spec: &MethodSpec,
        args: &[Reference],
    ) -> Result<PendingCall> {
        let method = self.classes.resolve_method(spec)?;
        let callee = callee.map(|c| self.value_of(c)).transpose()?;
        let args = args
            .iter()
            .map(|a| self.value_of(a))
            .collect::<Result<Vec<_>>>()?;

        let dispatch = CallDispatch::select(
            method.is_static,
            method.is_constructor(),
            method.class.is_interface,
            method.is_void(),
        )?;
        let callee = if dispatch.kind.needs_callee() {
            let callee = callee.ok_or_else(|| {
                ConcolicError::invariant(format!(
                    "{} call to {} without a callee",
                    dispatch.kind, method
                ))
            })?;
            Some(callee)
        } else {
            None
        };

        let name = (!dispatch.is_void).then(|| result.name());
        let instruction = Instruction::Call {
            kind: dispatch.kind,
            method: method.clone(),
            name: name.clone(),
            callee,
            args: args.clone(),
        };

        let value_term = match name {
            Some(name) => Some(
                self.cache
                    .register(result, SimulatedValue::named(name, method.desc.ret.clone()))?
                    .1,
            ),
            None => None,
        };
        let callee_term = callee.map(|c| self.cache.term_of(c));
        let arg_terms: Vec<Term> = args.iter().map(|a| self.cache.term_of(*a)).collect();

        let owner = callee_term
            .clone()
            .unwrap_or_else(|| Term::static_ref(method.class.clone()));
        let call = owner.call(method.clone(), arg_terms.clone());
        let predicate = Predicate::call(value_term.clone(), call);

        Ok(PendingCall {
            instruction,
            method,
            result: value_term,
            parameters: Parameters::new(callee_term, arg_terms),
            predicate,
        })
    }

    fn commit(&mut self, clause: StateClause) {
        trace!(clause = %clause, "commit");
        self.trace.push(clause);
    }

    fn commit_call(&mut self, position: usize, call: PendingCall) {
        let key = TraceKey {
            position,
            method: call.method.clone(),
        };
        self.commit(call.into_clause());
        self.committed_calls += 1;
        self.method_traces.insert(key, self.trace.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::symbolic::{BinaryOpcode, CallKind, CmpOpcode, Constant};
    use crate::features::trace_builder::infrastructure::ClassRegistry;
    use crate::shared::models::{Class, TypeRef};
    use pretty_assertions::assert_eq;

    fn classes() -> Arc<dyn ClassManager> {
        let mut registry = ClassRegistry::new();
        registry
            .add_class(Class::new("Foo"))
            .constructor(vec![])
            .static_field("F", TypeRef::Int)
            .field("x", TypeRef::Int)
            .method("m", vec![TypeRef::Int], TypeRef::Int)
            .method("touch", vec![], TypeRef::Void)
            .static_method("make", vec![], TypeRef::Int);
        registry
            .add_class(Class::interface("Runner"))
            .method("run", vec![TypeRef::Int], TypeRef::Bool);
        Arc::new(registry)
    }

    fn int_literal(builder: &mut SymbolicTraceBuilder, id: u32, value: i32) -> Reference {
        let r = Reference::variable(id, TypeRef::Int);
        let action = TestAction::Literal {
            result: r.clone(),
            value: Literal::Int(value),
        };
        builder.record_action(&action, |_| Ok(())).unwrap().unwrap();
        r
    }

    #[test]
    fn test_static_field_read() {
        let mut builder = SymbolicTraceBuilder::new(classes());
        let result = Reference::variable(0, TypeRef::Int);
        let action = TestAction::FieldRead {
            result,
            source: None,
            field: FieldSpec::static_field("Foo", "F", TypeRef::Int),
        };
        builder.record_action(&action, |_| Ok(())).unwrap().unwrap();

        assert_eq!(builder.trace().len(), 1);
        let clause = &builder.trace().clauses()[0];
        assert!(matches!(
            &clause.instruction,
            Instruction::FieldLoad { owner: None, field, .. } if field.is_static
        ));
        assert_eq!(
            clause.predicate.to_string(),
            "v0!0 == static(Foo).field(int, \"F\").load()"
        );
    }

    #[test]
    fn test_literal_records_no_clause() {
        let mut builder = SymbolicTraceBuilder::new(classes());
        let r = int_literal(&mut builder, 0, 5);
        assert!(builder.trace().is_empty());

        let id = builder.cache().lookup(&r).unwrap();
        assert_eq!(
            builder.cache().value(id),
            &SimulatedValue::Constant(Constant::Int(5))
        );
    }

    #[test]
    fn test_expression_with_inline_constants() {
        let mut builder = SymbolicTraceBuilder::new(classes());
        let a = int_literal(&mut builder, 0, 2);
        let three = Reference::constant(1, TypeRef::Int, Literal::Int(3));
        let sum = Reference::variable(2, TypeRef::Int);
        let action = TestAction::Expression {
            result: sum,
            lhv: a,
            op: Operator::Times,
            rhv: three,
        };
        builder.record_action(&action, |_| Ok(())).unwrap().unwrap();

        let clause = &builder.trace().clauses()[0];
        assert!(matches!(
            clause.instruction,
            Instruction::Binary { opcode: BinaryOpcode::Mul, .. }
        ));
        assert_eq!(clause.predicate.to_string(), "v2!0 == 2 * 3");
    }

    #[test]
    fn test_comparison_uses_declared_result_type() {
        let mut builder = SymbolicTraceBuilder::new(classes());
        let a = int_literal(&mut builder, 0, 2);
        let b = int_literal(&mut builder, 1, 3);
        let action = TestAction::Expression {
            result: Reference::variable(2, TypeRef::Bool),
            lhv: a,
            op: Operator::LessEquals,
            rhv: b,
        };
        builder.record_action(&action, |_| Ok(())).unwrap().unwrap();

        match &builder.trace().clauses()[0].instruction {
            Instruction::Cmp { ty, opcode, .. } => {
                assert_eq!(ty, &TypeRef::Bool);
                assert_eq!(*opcode, CmpOpcode::Le);
            }
            other => panic!("unexpected instruction {:?}", other),
        }
    }

    #[test]
    fn test_instance_field_assignment() {
        let mut builder = SymbolicTraceBuilder::new(classes());
        let owner = Reference::variable(0, TypeRef::class("Foo"));
        let make = TestAction::Call {
            result: owner.clone(),
            callee: None,
            method: MethodSpec::new("Foo", "make", vec![], TypeRef::Int),
            args: vec![],
        };
        builder.record_action(&make, |_| Ok(())).unwrap().unwrap();
        let value = int_literal(&mut builder, 1, 9);

        let target = Reference::field(
            2,
            Some(owner),
            FieldSpec::instance("Foo", "x", TypeRef::Int),
        );
        let assign = TestAction::Assignment { target, value };
        builder.record_action(&assign, |_| Ok(())).unwrap().unwrap();

        let clause = builder.trace().last().unwrap();
        assert!(matches!(
            clause.instruction,
            Instruction::FieldStore { owner: Some(_), .. }
        ));
        assert_eq!(
            clause.predicate.to_string(),
            "v0!0.field(int, \"x\").store(9)"
        );
    }

    #[test]
    fn test_array_element_assignment_is_unsupported() {
        let mut builder = SymbolicTraceBuilder::new(classes());
        let value = int_literal(&mut builder, 0, 1);
        let array = Reference {
            id: crate::shared::models::RefId(1),
            ty: TypeRef::array(TypeRef::Int),
            kind: ReferenceKind::Array,
        };
        let target = Reference::array_index(2, array, 0, TypeRef::Int);
        let err = builder
            .before_action(&TestAction::Assignment { target, value })
            .unwrap_err();

        assert!(matches!(err, ConcolicError::Unsupported(_)));
        assert_eq!(builder.state(), RecorderState::Disabled);
    }

    #[test]
    fn test_unsupported_actions_fail_fast() {
        let actions = [
            TestAction::ArrayAccess {
                result: Reference::variable(0, TypeRef::array(TypeRef::Int)),
                length: 3,
            },
            TestAction::Constructor {
                result: Reference::variable(0, TypeRef::class("Foo")),
                constructor: MethodSpec::constructor("Foo", vec![]),
                args: vec![],
            },
            TestAction::Mock {
                result: Reference::variable(0, TypeRef::class("Runner")),
                target: TypeRef::class("Runner"),
            },
        ];

        for action in actions {
            let mut builder = SymbolicTraceBuilder::new(classes());
            let err = builder.before_action(&action).unwrap_err();
            assert!(err.is_internal(), "{}", action.kind_name());
            assert!(builder.trace().is_empty());
        }
    }

    #[test]
    fn test_interface_call_dispatch() {
        let mut builder = SymbolicTraceBuilder::new(classes());
        let runner = Reference::variable(0, TypeRef::class("Runner"));
        // Runner values normally come from a call; seed one through a static factory
        let seed = TestAction::Call {
            result: runner.clone(),
            callee: None,
            method: MethodSpec::new("Foo", "make", vec![], TypeRef::Int),
            args: vec![],
        };
        builder.record_action(&seed, |_| Ok(())).unwrap().unwrap();

        let arg = int_literal(&mut builder, 1, 4);
        let call = TestAction::Call {
            result: Reference::variable(2, TypeRef::Bool),
            callee: Some(runner),
            method: MethodSpec::new("Runner", "run", vec![TypeRef::Int], TypeRef::Bool),
            args: vec![arg],
        };
        let ticket = builder.before_action(&call).unwrap();
        let pending = ticket.pending_call().unwrap();
        assert_eq!(pending.instruction.call_kind(), Some(CallKind::Interface));
        builder.after_action(ticket, None).unwrap();
    }

    #[test]
    fn test_void_call_has_no_result_binding() {
        let mut builder = SymbolicTraceBuilder::new(classes());
        let foo = Reference::variable(0, TypeRef::class("Foo"));
        let seed = TestAction::Call {
            result: foo.clone(),
            callee: None,
            method: MethodSpec::new("Foo", "make", vec![], TypeRef::Int),
            args: vec![],
        };
        builder.record_action(&seed, |_| Ok(())).unwrap().unwrap();

        let touch = TestAction::Call {
            result: Reference::variable(1, TypeRef::Void),
            callee: Some(foo),
            method: MethodSpec::new("Foo", "touch", vec![], TypeRef::Void),
            args: vec![],
        };
        let ticket = builder.before_action(&touch).unwrap();
        let pending = ticket.pending_call().unwrap();
        assert!(pending.result.is_none());
        assert_eq!(pending.instruction.defined_name(), None);
        assert_eq!(pending.predicate.to_string(), "v0!0.call(touch, [])");
        builder.after_action(ticket, None).unwrap();
    }

    #[test]
    fn test_instance_call_without_callee_is_rejected() {
        let mut builder = SymbolicTraceBuilder::new(classes());
        let call = TestAction::Call {
            result: Reference::variable(0, TypeRef::Int),
            callee: None,
            method: MethodSpec::new("Foo", "m", vec![TypeRef::Int], TypeRef::Int),
            args: vec![Reference::constant(1, TypeRef::Int, Literal::Int(1))],
        };
        assert!(builder.before_action(&call).is_err());
    }

    #[test]
    fn test_call_site_traces_are_trace_prefixes() {
        let mut builder = SymbolicTraceBuilder::new(classes());
        let make = |id| TestAction::Call {
            result: Reference::variable(id, TypeRef::class("Foo")),
            callee: None,
            method: MethodSpec::new("Foo", "make", vec![], TypeRef::Int),
            args: vec![],
        };
        builder.record_action(&make(0), |_| Ok(())).unwrap().unwrap();
        let read = TestAction::FieldRead {
            result: Reference::variable(1, TypeRef::Int),
            source: None,
            field: FieldSpec::static_field("Foo", "F", TypeRef::Int),
        };
        builder.record_action(&read, |_| Ok(())).unwrap().unwrap();
        builder.record_action(&make(2), |_| Ok(())).unwrap().unwrap();
        builder.record_action(&make(3), |_| Ok(())).unwrap().unwrap();

        let full = builder.trace().clauses();
        let sites: Vec<(usize, usize)> = builder
            .method_traces()
            .map(|(key, clauses)| {
                assert_eq!(clauses, &full[..clauses.len()]);
                assert!(matches!(
                    clauses.last().map(|c| &c.predicate),
                    Some(Predicate::Call { .. })
                ));
                (key.position, clauses.len())
            })
            .collect();
        assert_eq!(sites, vec![(0, 1), (2, 3), (3, 4)]);

        let owned = builder.into_method_traces();
        assert_eq!(owned.values().map(SymbolicTrace::len).collect::<Vec<_>>(), vec![1, 3, 4]);
    }

    #[test]
    fn test_state_machine() {
        let mut builder = SymbolicTraceBuilder::new(classes());
        assert_eq!(builder.state(), RecorderState::Armed);
        assert!(!builder.active_recorder().is_live());

        let action = TestAction::Literal {
            result: Reference::variable(0, TypeRef::Int),
            value: Literal::Int(1),
        };
        let ticket = builder.before_action(&action).unwrap();
        assert_eq!(builder.state(), RecorderState::Recording);
        assert!(builder.active_recorder().is_live());

        // No nesting
        assert!(builder.before_action(&action).is_err());

        builder.after_action(ticket, None).unwrap();
        assert_eq!(builder.state(), RecorderState::Suspended);
        assert!(!builder.active_recorder().is_live());

        builder.execution_finished();
        assert_eq!(builder.state(), RecorderState::Disabled);
        assert!(builder.before_action(&action).is_err());

        builder.clear();
        assert_eq!(builder.state(), RecorderState::Armed);
        assert!(builder.cache().is_empty());
    }

    #[test]
    fn test_disabled_recorder_drops_clauses() {
        let mut builder = SymbolicTraceBuilder::new(classes());
        let clause = StateClause::new(
            Instruction::Branch {
                label: "outside".into(),
            },
            Predicate::path(Term::constant(Constant::Bool(true)), true),
        );
        assert!(!builder.active_recorder().record(clause));
        assert!(builder.trace().is_empty());
    }
}
