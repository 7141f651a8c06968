//! Generation loop
//!
//! Harvests per-call-site traces from executed tests into the oracle, then
//! walks the oracle's candidates until one can be solved and rebuilt as a
//! concrete test. The solver call is the only await that is time-bounded;
//! any per-candidate failure is logged and the loop moves on.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::config::{GenerationConfig, Validatable};
use crate::errors::{ConcolicError, Result};
use crate::features::generation::domain::{
    CandidatePath, Descriptor, GenerationStats, HarvestStats,
};
use crate::features::generation::ports::{
    ActionSequenceGenerator, ConstraintSolver, PathSelector, StatementMaterializer, TestRunner,
};
use crate::features::symbolic::SymbolicTrace;
use crate::features::trace_builder::{ClassManager, SymbolicTraceBuilder};
use crate::shared::models::{Method, Parameters, TestCase};

pub struct TestGenerator {
    config: GenerationConfig,
    selector: Box<dyn PathSelector>,
    solver: Arc<dyn ConstraintSolver>,
    sequences: Arc<dyn ActionSequenceGenerator>,
    materializer: Arc<dyn StatementMaterializer>,
    stats: GenerationStats,
}

impl TestGenerator {
    pub fn new(
        config: GenerationConfig,
        selector: Box<dyn PathSelector>,
        solver: Arc<dyn ConstraintSolver>,
        sequences: Arc<dyn ActionSequenceGenerator>,
        materializer: Arc<dyn StatementMaterializer>,
    ) -> Result<Self> {
        config.validate()?;
        debug!(
            config = config.config_name(),
            solver_timeout_ms = config.solver_timeout().as_millis() as u64,
            "test generator configured"
        );
        Ok(Self {
            config,
            selector,
            solver,
            sequences,
            materializer,
            stats: GenerationStats::default(),
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Run every test on a fresh builder and register its non-empty traces
    ///
    /// A test that fails to run or to harvest is logged and skipped.
    pub async fn collect_traces(
        &mut self,
        runner: &dyn TestRunner,
        classes: Arc<dyn ClassManager>,
        tests: &[TestCase],
    ) -> HarvestStats {
        info!(tests = tests.len(), "trace collection");
        let mut stats = HarvestStats::default();

        for (index, test) in tests.iter().enumerate() {
            stats.executions += 1;
            let mut builder = SymbolicTraceBuilder::new(Arc::clone(&classes));

            if let Err(e) = self.harvest(runner, &mut builder, test, &mut stats).await {
                stats.failures += 1;
                error!(test = index, error = %e, "error while running test:\n{}", test);
            }
        }

        info!(
            executions = stats.executions,
            failures = stats.failures,
            traces = stats.traces_registered,
            "trace collection finished"
        );
        stats
    }

    async fn harvest(
        &mut self,
        runner: &dyn TestRunner,
        builder: &mut SymbolicTraceBuilder,
        test: &TestCase,
        stats: &mut HarvestStats,
    ) -> Result<()> {
        runner.execute(test, builder).await?;
        builder.execution_finished();

        for (key, clauses) in builder.method_traces() {
            if clauses.is_empty() {
                stats.empty_traces += 1;
                continue;
            }
            let trace: SymbolicTrace = clauses.iter().cloned().collect();
            self.selector.add_trace(&key.method, trace).await?;
            stats.traces_registered += 1;
        }
        Ok(())
    }

    /// Produce one new test, or None once the oracle runs dry
    pub async fn generate_test(&mut self) -> Option<TestCase> {
        debug!("generating test");
        let timeout = self.config.solver_timeout();
        let mut tried = 0usize;

        loop {
            if self.config.max_candidates.is_some_and(|max| tried >= max) {
                debug!(tried, "candidate limit reached");
                break;
            }
            match self.selector.has_next().await {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    error!(error = %e, "path selector failed");
                    self.stats.oracle_errors += 1;
                    break;
                }
            }
            tried += 1;
            self.stats.candidates += 1;

            let candidate = match self.selector.next().await {
                Ok(candidate) => candidate,
                Err(e) => {
                    error!(error = %e, "path selector failed to produce a candidate");
                    self.stats.oracle_errors += 1;
                    continue;
                }
            };

            let Some(parameters) = self.solve(&candidate, timeout).await else {
                continue;
            };

            match self.build_test(&candidate.method, &parameters) {
                Ok(test) => {
                    self.stats.generated += 1;
                    debug!(method = %candidate.method, "produced new test:\n{}", test);
                    return Some(test);
                }
                Err(e) => {
                    self.stats.build_errors += 1;
                    error!(
                        method = %candidate.method,
                        error = %e,
                        "error while generating test for state:\n{}",
                        candidate.state
                    );
                }
            }
        }

        debug!(tried, "no new test produced");
        None
    }

    async fn solve(
        &mut self,
        candidate: &CandidatePath,
        timeout: std::time::Duration,
    ) -> Option<Parameters<Descriptor>> {
        let solving = self
            .solver
            .check_and_get_parameters(&candidate.method, &candidate.state);

        let outcome = tokio::time::timeout(timeout, solving).await;
        match outcome {
            Ok(Ok(Some(parameters))) => Some(parameters),
            Ok(Ok(None)) => {
                self.stats.unsatisfiable += 1;
                debug!(method = %candidate.method, "candidate path is unsatisfiable");
                None
            }
            Ok(Err(e)) => {
                self.stats.solver_errors += 1;
                error!(
                    method = %candidate.method,
                    error = %e,
                    "error while solving state:\n{}",
                    candidate.state
                );
                None
            }
            Err(_) => {
                self.stats.timeouts += 1;
                let err = ConcolicError::SolverTimeout {
                    timeout_ms: timeout.as_millis() as u64,
                };
                warn!(method = %candidate.method, error = %err, "skipping candidate");
                None
            }
        }
    }

    fn build_test(&self, method: &Method, parameters: &Parameters<Descriptor>) -> Result<TestCase> {
        debug!(method = %method, "start test generation");
        let sequences = parameters.try_map(|d| self.sequences.generate(d))?;
        let statements: usize = sequences.as_list().iter().map(|s| s.statement_count()).sum();
        debug!(method = %method, statements, statics = sequences.statics.len(), "materializing");

        let mut test = TestCase::new();
        let references = sequences.try_map(|s| self.materializer.generate_statements(&mut test, s))?;
        self.materializer
            .generate_test_call(&mut test, method, &references)?;
        Ok(test)
    }

    /// [`Self::collect_traces`] on a current-thread runtime
    pub fn collect_traces_blocking(
        &mut self,
        runner: &dyn TestRunner,
        classes: Arc<dyn ClassManager>,
        tests: &[TestCase],
    ) -> Result<HarvestStats> {
        let runtime = current_thread_runtime()?;
        Ok(runtime.block_on(self.collect_traces(runner, classes, tests)))
    }

    /// [`Self::generate_test`] on a current-thread runtime
    pub fn generate_test_blocking(&mut self) -> Result<Option<TestCase>> {
        let runtime = current_thread_runtime()?;
        Ok(runtime.block_on(self.generate_test()))
    }
}

fn current_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?)
}
