//! Symbolic domain models

pub mod instruction;
pub mod predicate;
pub mod term;
pub mod trace;
pub mod value;

pub use instruction::{BinaryOpcode, CallDispatch, CallKind, CmpOpcode, Instruction};
pub use predicate::Predicate;
pub use term::{NameGenerator, Term};
pub use trace::{StateClause, SymbolicTrace, TraceKey};
pub use value::{Constant, SimulatedValue, ValueId};
