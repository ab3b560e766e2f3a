//! Registry contract models.
//!
//! Request bodies the client submits and the transient, display-oriented
//! copies of server state it reads back. The backend owns every entity; the
//! client never caches these between requests.

pub mod admin;
pub mod endpoints;
pub mod pos;
pub mod property;
pub mod proposal;
pub mod transfer;

pub use admin::{HealthStatus, RoleAssignment, RoleAssignmentRequest};
pub use pos::{PosOutcome, PosValidationRequest, ValidatorId};
pub use property::{NewProperty, PropertyRegistered};
pub use proposal::{Decision, DecisionRequest, NewProposal, ProposalDecided, ProposalStatus, ProposalSubmitted};
pub use transfer::{SignatureFlags, TransferAction, TransferActionRequest, TransferInitiated, TransferSigned};

/// Renders an optional transaction hash as a ` Tx: …` suffix.
pub(crate) fn tx_suffix(tx_hash: &Option<String>) -> String {
    match tx_hash.as_deref() {
        Some(hash) if !hash.is_empty() => format!(" Tx: {hash}"),
        _ => String::new(),
    }
}
