//! Trace builder infrastructure

pub mod class_registry;
pub mod trace_builder;
pub mod value_cache;

pub use class_registry::{ClassBuilder, ClassRegistry};
pub use trace_builder::{ActiveRecorder, RecorderState, SymbolicTraceBuilder};
pub use value_cache::{build_value, ValueTermCache};
