//! Scripted collaborators for the generation loop

use std::collections::{BTreeSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use concolic_testgen::features::generation::{
    CandidatePath, ConstraintSolver, Descriptor, PathSelector, TestRunner,
};
use concolic_testgen::features::symbolic::{
    Instruction, Predicate, StateClause, SymbolicTrace, Term,
};
use concolic_testgen::features::trace_builder::SymbolicTraceBuilder;
use concolic_testgen::shared::models::{
    ActionFailure, Method, Parameters, TestAction, TestCase, TypeRef,
};
use concolic_testgen::{ConcolicError, Result};

// ============================================================================
// Runner
// ============================================================================

/// Host engine fake: replays every action through the builder's hooks
///
/// Each execution pops one branch outcome (if scripted) and records it as a
/// path clause from inside every non-static call, the way instrumented
/// callee code would.
#[derive(Default)]
pub struct ScriptedRunner {
    branches: Mutex<VecDeque<bool>>,
    crashes: Mutex<BTreeSet<usize>>,
    raise_at: Option<usize>,
    executions: AtomicUsize,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_branches(self, outcomes: impl IntoIterator<Item = bool>) -> Self {
        *self.branches.lock().unwrap() = outcomes.into_iter().collect();
        self
    }

    /// Fail the n-th execution (0-based) before any action runs
    pub fn crash_on(self, execution: usize) -> Self {
        self.crashes.lock().unwrap().insert(execution);
        self
    }

    /// Raise from the action at `position` in every execution
    pub fn raise_at(mut self, position: usize) -> Self {
        self.raise_at = Some(position);
        self
    }

    pub fn executions(&self) -> usize {
        self.executions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TestRunner for ScriptedRunner {
    async fn execute(&self, test: &TestCase, builder: &mut SymbolicTraceBuilder) -> Result<()> {
        let execution = self.executions.fetch_add(1, Ordering::SeqCst);
        if self.crashes.lock().unwrap().contains(&execution) {
            return Err(ConcolicError::execution(format!("execution {} crashed", execution)));
        }
        let branch = self.branches.lock().unwrap().pop_front();

        for (position, action) in test.actions().iter().enumerate() {
            let instrumented = matches!(action, TestAction::Call { callee: Some(_), .. });
            let raises = self.raise_at == Some(position);

            let outcome = builder.record_action(action, |recorder| {
                if let (true, Some(holds)) = (instrumented, branch) {
                    recorder.record(StateClause::new(
                        Instruction::Branch {
                            label: format!("branch@{}", position),
                        },
                        Predicate::path(Term::value(TypeRef::Bool, "cond"), holds),
                    ));
                }
                if raises {
                    Err(ActionFailure::new("java.lang.RuntimeException", "scripted"))
                } else {
                    Ok(())
                }
            })?;

            if outcome.is_err() {
                break;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Oracle
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SelectorEvent {
    Added { method: String, clauses: usize },
    Next,
}

/// FIFO oracle: every registered trace becomes a candidate, after any
/// explicitly queued ones
#[derive(Default)]
pub struct QueueSelector {
    candidates: VecDeque<CandidatePath>,
    events: Arc<Mutex<Vec<SelectorEvent>>>,
    fail_next: usize,
}

impl QueueSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidates(mut self, candidates: impl IntoIterator<Item = CandidatePath>) -> Self {
        self.candidates.extend(candidates);
        self
    }

    /// Fail the first `count` calls to `next`, consuming a candidate each time
    pub fn failing_next(mut self, count: usize) -> Self {
        self.fail_next = count;
        self
    }

    pub fn events(&self) -> Arc<Mutex<Vec<SelectorEvent>>> {
        Arc::clone(&self.events)
    }
}

#[async_trait]
impl PathSelector for QueueSelector {
    async fn add_trace(&mut self, method: &Method, trace: SymbolicTrace) -> Result<()> {
        self.events.lock().unwrap().push(SelectorEvent::Added {
            method: method.name.clone(),
            clauses: trace.len(),
        });
        self.candidates
            .push_back(CandidatePath::new(method.clone(), trace));
        Ok(())
    }

    async fn has_next(&mut self) -> Result<bool> {
        Ok(!self.candidates.is_empty())
    }

    async fn next(&mut self) -> Result<CandidatePath> {
        self.events.lock().unwrap().push(SelectorEvent::Next);
        let candidate = self
            .candidates
            .pop_front()
            .ok_or_else(|| ConcolicError::oracle("no candidates left"))?;
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(ConcolicError::oracle(format!(
                "ranking failed for {}",
                candidate.method
            )));
        }
        Ok(candidate)
    }
}

// ============================================================================
// Solver
// ============================================================================

pub enum SolverStep {
    Solve(Parameters<Descriptor>),
    /// Answer only after the delay
    Slow(Duration, Parameters<Descriptor>),
    Unsat,
    Fail,
}

/// Solver fake answering from a script; an empty script means unsat
#[derive(Default)]
pub struct ScriptedSolver {
    steps: Mutex<VecDeque<SolverStep>>,
    calls: AtomicUsize,
}

impl ScriptedSolver {
    pub fn new(steps: impl IntoIterator<Item = SolverStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConstraintSolver for ScriptedSolver {
    async fn check_and_get_parameters(
        &self,
        _method: &Method,
        _path: &SymbolicTrace,
    ) -> Result<Option<Parameters<Descriptor>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(SolverStep::Solve(parameters)) => Ok(Some(parameters)),
            Some(SolverStep::Slow(delay, parameters)) => {
                tokio::time::sleep(delay).await;
                Ok(Some(parameters))
            }
            Some(SolverStep::Unsat) | None => Ok(None),
            Some(SolverStep::Fail) => Err(ConcolicError::solver("scripted failure")),
        }
    }
}
