//! Feature modules - each follows Hexagonal Architecture
//!
//! - domain/          - Pure models
//! - ports/           - Interface definitions (traits)
//! - application/     - Use cases
//! - infrastructure/  - Default implementations

pub mod generation;
pub mod symbolic;
pub mod trace_builder;
