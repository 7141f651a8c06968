//! Test Generation
//!
//! Feeds harvested traces to the path-selection oracle and turns solved
//! candidates into new concrete tests.
//!
//! ## Architecture
//!
//! ```text
//! generation
//! ├── domain/            # Descriptors, action sequences, candidates, stats
//! ├── ports/             # Runner, oracle, solver, sequence generator, materializer
//! ├── application/       # TestGenerator (harvest + generation loop)
//! └── infrastructure/    # Default sequence generator and materializer
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::TestGenerator;
pub use domain::{ActionSequence, CandidatePath, Descriptor, GenerationStats, HarvestStats};
pub use infrastructure::{DescriptorSequenceGenerator, SequenceMaterializer};
pub use ports::{
    ActionSequenceGenerator, ConstraintSolver, PathSelector, StatementMaterializer, TestRunner,
};
