//! Ordered symbolic traces

use super::instruction::Instruction;
use super::predicate::Predicate;
use crate::shared::models::Method;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One trace entry: an instruction and its predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateClause {
    pub instruction: Instruction,
    pub predicate: Predicate,
}

impl StateClause {
    pub fn new(instruction: Instruction, predicate: Predicate) -> Self {
        Self {
            instruction,
            predicate,
        }
    }
}

impl fmt::Display for StateClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.instruction, self.predicate)
    }
}

/// Append-only sequence of clauses in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolicTrace {
    clauses: Vec<StateClause>,
}

impl SymbolicTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, clause: StateClause) {
        self.clauses.push(clause);
    }

    pub fn clauses(&self) -> &[StateClause] {
        &self.clauses
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateClause> {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn last(&self) -> Option<&StateClause> {
        self.clauses.last()
    }

    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.clauses.iter().map(|c| &c.predicate)
    }
}

impl FromIterator<StateClause> for SymbolicTrace {
    fn from_iter<I: IntoIterator<Item = StateClause>>(iter: I) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SymbolicTrace {
    type Item = &'a StateClause;
    type IntoIter = std::slice::Iter<'a, StateClause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl fmt::Display for SymbolicTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            writeln!(f, "{:>3}: {}", i, clause)?;
        }
        Ok(())
    }
}

/// Key of a per-method trace: the call site's action position and callee
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TraceKey {
    pub position: usize,
    pub method: Method,
}
