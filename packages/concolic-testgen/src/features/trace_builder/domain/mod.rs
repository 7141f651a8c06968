//! Trace builder domain

pub mod operators;
pub mod pending_call;

pub use operators::{binary_opcode, cmp_opcode, OperatorKind};
pub use pending_call::{ActionTicket, PendingCall};
