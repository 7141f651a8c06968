//! Host-level data model
//!
//! Types, class/method/field handles, references and test actions as the host
//! test-execution engine describes them.

pub mod descriptors;
pub mod parameters;
pub mod reference;
pub mod test_case;
pub mod types;

pub use descriptors::{Class, Field, FieldSpec, Method, MethodDesc, MethodSpec, CONSTRUCTOR_NAME};
pub use parameters::Parameters;
pub use reference::{RefId, Reference, ReferenceKind};
pub use test_case::{ActionFailure, Literal, Operator, TestAction, TestCase};
pub use types::TypeRef;
