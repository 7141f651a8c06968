//! Symbolic vocabulary
//!
//! Simulated values, symbolic terms, instructions and predicates, and the
//! ordered traces built from them.
//!
//! ```text
//! StateClause = Instruction × Predicate
//! SymbolicTrace = [StateClause]   (append-only, execution order)
//! ```

pub mod domain;

pub use domain::{
    BinaryOpcode, CallDispatch, CallKind, CmpOpcode, Constant, Instruction, NameGenerator,
    Predicate, SimulatedValue, StateClause, SymbolicTrace, Term, TraceKey, ValueId,
};
