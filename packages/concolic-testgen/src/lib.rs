/*
 * Concolic Testgen - trace translation and test generation
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Host data model (types, descriptors, references, tests)
 * - features/    : Vertical slices (symbolic → trace_builder → generation)
 * - config/      : Generation settings
 *
 * Flow:
 *   host engine ─hooks─▶ SymbolicTraceBuilder ─traces─▶ TestGenerator
 *     ─▶ oracle ─▶ solver ─▶ sequence generator ─▶ materializer ─▶ new test
 */

#![allow(clippy::new_without_default)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod errors;
pub mod features;
pub mod shared;

pub use config::{ConfigError, GenerationConfig, Validatable};
pub use errors::{ConcolicError, ErrorKind, Result};
pub use features::generation::TestGenerator;
pub use features::trace_builder::{ActiveRecorder, RecorderState, SymbolicTraceBuilder};
