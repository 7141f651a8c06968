//! Deferred call commitment

use crate::features::symbolic::{Instruction, Predicate, StateClause, Term};
use crate::shared::models::{Method, Parameters};

/// A call recorded by `before_action` but not yet part of the trace
///
/// Argument evaluation and exceptions inside the call must be allowed to
/// finish first; the call is committed once its action concludes.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCall {
    pub instruction: Instruction,
    pub method: Method,
    /// Result term for non-void calls
    pub result: Option<Term>,
    /// Callee and argument terms
    pub parameters: Parameters<Term>,
    pub predicate: Predicate,
}

impl PendingCall {
    pub fn into_clause(self) -> StateClause {
        StateClause::new(self.instruction, self.predicate)
    }
}

/// Handed out by `before_action`, consumed by `after_action`
#[must_use = "an action ticket must be passed to after_action"]
#[derive(Debug)]
pub struct ActionTicket {
    pub(crate) position: usize,
    pub(crate) pending: Option<PendingCall>,
}

impl ActionTicket {
    /// Position of the action within its execution
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn pending_call(&self) -> Option<&PendingCall> {
        self.pending.as_ref()
    }
}
