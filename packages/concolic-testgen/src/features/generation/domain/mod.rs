//! Generation domain models

pub mod action_sequence;
pub mod candidate;
pub mod descriptor;

pub use action_sequence::ActionSequence;
pub use candidate::{CandidatePath, GenerationStats, HarvestStats};
pub use descriptor::Descriptor;
