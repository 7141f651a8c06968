//! Trace Builder
//!
//! Translates every elementary action of a running test into an
//! instruction/predicate pair appended to an ordered trace.
//!
//! ## Architecture
//!
//! ```text
//! trace_builder
//! ├── domain/            # Operator tables, pending call, action ticket
//! ├── ports/             # Descriptor service (ClassManager)
//! └── infrastructure/    # Value/term cache, class registry, builder
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//! Armed ──before──▶ Recording ──after──▶ Suspended ──before──▶ Recording ...
//!                                            │
//!                                   execution_finished
//!                                            ▼
//!                                        Disabled
//! ```
//!
//! Calls are not appended while their action runs. `before_action` hands the
//! pending call back inside an [`ActionTicket`] and `after_action` commits it,
//! whether or not the action raised.

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{ActionTicket, OperatorKind, PendingCall};
pub use infrastructure::{
    ActiveRecorder, ClassRegistry, RecorderState, SymbolicTraceBuilder, ValueTermCache,
};
pub use ports::ClassManager;
