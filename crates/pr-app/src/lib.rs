//! Property registry application orchestration layer
//!
//! This crate contains the use cases: the SIWE login orchestrator, the generic
//! workflow runner and its five registry workflows, and the read-only/admin
//! queries. Everything reaches the outside world through `pr-core` ports.

pub mod session;
pub mod usecases;

pub use session::SessionStore;
pub use usecases::workflows;
pub use usecases::{RegistryUseCases, SiweLogin, SiweSettings, Workflow, WorkflowSpec};
