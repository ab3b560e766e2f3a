//! Business logic use cases
//!
//! [SiweLogin]  → Session (explicit, injected)
//!         ↓
//! ---------------------------------
//! RegisterProperty / SubmitProposal / DecideProposal
//! InitiateTransfer / SignTransfer / ValidatePos      → Workflow<S>
//! ---------------------------------
//! FetchAuditTrail / ListTransfers                    → read-only queries
//! CheckHealth / AssignRole                           → unauthenticated calls

pub mod admin;
pub mod audit;
pub mod auth;
pub mod registry_usecases;
pub mod workflow;
pub mod workflows;

pub use admin::{AssignRole, CheckHealth};
pub use audit::{FetchAuditTrail, ListTransfers};
pub use auth::{SiweLogin, SiweSettings};
pub use registry_usecases::RegistryUseCases;
pub use workflow::{Workflow, WorkflowSpec};
