//! Error types for concolic-testgen
//!
//! Two disjoint classes of failure exist:
//!
//! - **Internal invariant violations** abort the translation of the current
//!   action. A wrong symbolic model poisons everything the solver derives from
//!   it, so these are never recovered from inside the trace builder.
//! - **External failures** come from collaborators (host engine, descriptor
//!   service, oracle, solver, materializer). The generation loop logs them and
//!   moves on to the next execution or candidate.

use crate::config::ConfigError;
use thiserror::Error;

/// Which side of the fence an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Translation invariant violated (fatal for the current action)
    InternalInvariant,
    /// Expected failure of an external collaborator (recoverable)
    ExternalFailure,
}

/// Main error type for concolic-testgen operations
#[derive(Debug, Error)]
pub enum ConcolicError {
    /// Test construct the translator deliberately does not model
    #[error("Unsupported construct: {0}")]
    Unsupported(String),

    /// Literal whose kind is outside the constant table
    #[error("Unsupported literal kind: {payload} declared as {declared}")]
    UnsupportedLiteral { payload: String, declared: String },

    /// Combination that the dispatch tables declare impossible
    #[error("Unreachable dispatch: {0}")]
    Unreachable(String),

    /// Any other broken translation invariant
    #[error("Invariant violated: {0}")]
    InvariantViolated(String),

    /// Descriptor service has no entry for the requested class/method/field
    #[error("Unknown {kind} '{name}'")]
    UnknownDescriptor { kind: &'static str, name: String },

    /// Host engine failed to run a test
    #[error("Execution failed: {0}")]
    Execution(String),

    /// Path-selection oracle failure
    #[error("Oracle error: {0}")]
    Oracle(String),

    /// Constraint solver failure
    #[error("Solver error: {0}")]
    Solver(String),

    /// Solving exceeded its time bound
    #[error("Solver timeout exceeded after {timeout_ms}ms")]
    SolverTimeout { timeout_ms: u64 },

    /// Descriptor could not be turned into an action sequence
    #[error("Action sequence generation failed: {0}")]
    SequenceGeneration(String),

    /// Action sequence could not be turned into statements
    #[error("Materialization failed: {0}")]
    Materialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tokio runtime could not be created
    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

impl ConcolicError {
    /// Create an unsupported-construct error
    pub fn unsupported(what: impl Into<String>) -> Self {
        Self::Unsupported(what.into())
    }

    /// Create an unreachable-dispatch error
    pub fn unreachable(what: impl Into<String>) -> Self {
        Self::Unreachable(what.into())
    }

    /// Create an invariant-violation error
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolated(msg.into())
    }

    /// Create an unknown-descriptor error
    pub fn unknown(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownDescriptor {
            kind,
            name: name.into(),
        }
    }

    /// Create an execution error
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Create an oracle error
    pub fn oracle(msg: impl Into<String>) -> Self {
        Self::Oracle(msg.into())
    }

    /// Create a solver error
    pub fn solver(msg: impl Into<String>) -> Self {
        Self::Solver(msg.into())
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unsupported(_)
            | Self::UnsupportedLiteral { .. }
            | Self::Unreachable(_)
            | Self::InvariantViolated(_) => ErrorKind::InternalInvariant,
            Self::UnknownDescriptor { .. }
            | Self::Execution(_)
            | Self::Oracle(_)
            | Self::Solver(_)
            | Self::SolverTimeout { .. }
            | Self::SequenceGeneration(_)
            | Self::Materialization(_)
            | Self::Config(_)
            | Self::Runtime(_) => ErrorKind::ExternalFailure,
        }
    }

    /// True for internal invariant violations
    pub fn is_internal(&self) -> bool {
        self.kind() == ErrorKind::InternalInvariant
    }
}

/// Result type alias for concolic-testgen operations
pub type Result<T> = std::result::Result<T, ConcolicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(ConcolicError::unsupported("array access").is_internal());
        assert!(ConcolicError::unreachable("constructor on interface").is_internal());
        assert!(ConcolicError::invariant("double registration").is_internal());

        assert_eq!(
            ConcolicError::SolverTimeout { timeout_ms: 12_000 }.kind(),
            ErrorKind::ExternalFailure
        );
        assert_eq!(
            ConcolicError::unknown("class", "Foo").kind(),
            ErrorKind::ExternalFailure
        );
    }

    #[test]
    fn test_error_display() {
        let err = ConcolicError::unknown("field", "Foo.bar");
        assert_eq!(err.to_string(), "Unknown field 'Foo.bar'");

        let err = ConcolicError::SolverTimeout { timeout_ms: 500 };
        assert!(err.to_string().contains("500ms"));
    }
}
