//! Wallet authentication domain.
//!
//! This module defines the SIWE-style challenge, the session produced by a
//! successful exchange and the pure authentication state machine.

pub mod challenge;
pub mod role;
pub mod session;
pub mod state_machine;

pub use challenge::{format_issued_at, SiweChallenge, DEFAULT_CHAIN_ID};
pub use role::Role;
pub use session::Session;
pub use state_machine::{AuthAction, AuthError, AuthEvent, AuthState, AuthStateMachine};
