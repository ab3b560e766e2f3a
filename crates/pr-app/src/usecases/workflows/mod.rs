//! The registry workflows, each a [`WorkflowSpec`](super::WorkflowSpec).

mod decide_proposal;
mod pos_validation;
mod register_property;
mod submit_proposal;
mod transfer;

pub use decide_proposal::{DecideProposalInput, DecideProposalSpec};
pub use pos_validation::{PosValidationInput, PosValidationSpec};
pub use register_property::{RegisterPropertyInput, RegisterPropertySpec};
pub use submit_proposal::{SubmitProposalInput, SubmitProposalSpec};
pub use transfer::{InitiateTransferSpec, SignTransferInput, SignTransferSpec};
