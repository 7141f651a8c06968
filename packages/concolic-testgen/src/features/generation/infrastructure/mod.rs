//! Default generation adapters

pub mod materializer;
pub mod sequence_generator;

pub use materializer::SequenceMaterializer;
pub use sequence_generator::DescriptorSequenceGenerator;
