//! Oracle candidates and loop statistics

use crate::features::symbolic::SymbolicTrace;
use crate::shared::models::Method;
use serde::{Deserialize, Serialize};

/// Unexplored path the oracle proposes, for the method it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePath {
    pub method: Method,
    pub state: SymbolicTrace,
}

impl CandidatePath {
    pub fn new(method: Method, state: SymbolicTrace) -> Self {
        Self { method, state }
    }
}

/// Outcome counters of one trace collection batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestStats {
    /// Tests executed
    pub executions: usize,
    /// Executions abandoned because running or harvesting them failed
    pub failures: usize,
    /// Traces handed to the oracle
    pub traces_registered: usize,
    /// Empty traces skipped
    pub empty_traces: usize,
}

/// Running counters of the generation loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub candidates: usize,
    pub timeouts: usize,
    pub solver_errors: usize,
    pub oracle_errors: usize,
    pub unsatisfiable: usize,
    pub build_errors: usize,
    pub generated: usize,
}
