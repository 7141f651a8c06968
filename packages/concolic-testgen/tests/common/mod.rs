//! Common test utilities for concolic-testgen
//!
//! Class fixtures, a test-case builder and scripted fakes for the host
//! engine, the oracle and the solver.

#![allow(dead_code)]

mod fakes;
mod fixtures;

pub use fakes::*;
pub use fixtures::*;
