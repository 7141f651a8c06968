/*
 * Generation Ports
 *
 * ```
 *   tests ──▶ TestRunner ──▶ traces ──▶ PathSelector ──▶ candidate
 *                                                          │
 *   TestCase ◀── StatementMaterializer ◀── ActionSequenceGenerator ◀── ConstraintSolver
 * ```
 *
 * The solver is the only collaborator the loop waits on under a time bound.
 */

use async_trait::async_trait;

use super::domain::{ActionSequence, CandidatePath, Descriptor};
use crate::errors::Result;
use crate::features::symbolic::SymbolicTrace;
use crate::features::trace_builder::SymbolicTraceBuilder;
use crate::shared::models::{Method, Parameters, Reference, TestCase};

/// Host engine: runs a concrete test, firing the builder's hooks per action
#[async_trait]
pub trait TestRunner: Send + Sync {
    async fn execute(&self, test: &TestCase, builder: &mut SymbolicTraceBuilder) -> Result<()>;
}

/// Path-selection oracle
#[async_trait]
pub trait PathSelector: Send {
    /// Register a finished trace for `method`
    async fn add_trace(&mut self, method: &Method, trace: SymbolicTrace) -> Result<()>;

    async fn has_next(&mut self) -> Result<bool>;

    /// Next unexplored path
    async fn next(&mut self) -> Result<CandidatePath>;
}

/// Constraint solver
#[async_trait]
pub trait ConstraintSolver: Send + Sync {
    /// Parameters realizing `path`, or None when it is unsatisfiable
    async fn check_and_get_parameters(
        &self,
        method: &Method,
        path: &SymbolicTrace,
    ) -> Result<Option<Parameters<Descriptor>>>;
}

/// Turns a solved descriptor into construction steps
pub trait ActionSequenceGenerator: Send + Sync {
    fn generate(&self, descriptor: &Descriptor) -> Result<ActionSequence>;
}

/// Appends concrete statements to a test
pub trait StatementMaterializer: Send + Sync {
    /// Emit the statements of `sequence`; returns the reference holding its value
    fn generate_statements(&self, test: &mut TestCase, sequence: &ActionSequence)
        -> Result<Reference>;

    /// Emit the call to `method` with materialized parameters
    fn generate_test_call(
        &self,
        test: &mut TestCase,
        method: &Method,
        parameters: &Parameters<Reference>,
    ) -> Result<()>;
}
