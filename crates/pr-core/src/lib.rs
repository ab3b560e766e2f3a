//! # pr-core
//!
//! Core domain models and business logic for the property registry client.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the SIWE challenge and its state machine, the workflow state shared by every
//! registry operation, the request/response shapes of the registry contract and
//! the ports implemented by the infrastructure layer.

pub mod auth;
pub mod config;
pub mod ports;
pub mod registry;
pub mod workflow;

// Re-export commonly used types at the crate root
pub use auth::{AuthError, AuthState, Role, Session, SiweChallenge};
pub use config::AppConfig;
pub use workflow::{OverlapPolicy, WorkflowError, WorkflowPhase, WorkflowState};
