//! Workflow domain module.
//!
//! Every registry operation (register, propose, decide, transfer, PoS) runs
//! through the same four-phase state shape defined here.

pub mod error;
pub mod overlap;
pub mod state;
pub mod validation;

pub use error::{WorkflowError, NOT_AUTHENTICATED};
pub use overlap::OverlapPolicy;
pub use state::{WorkflowPhase, WorkflowState};
