//! Generation use cases

pub mod test_generator;

pub use test_generator::TestGenerator;
