//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. The registry service, the wallet and
//! the clock are all reached through these traits, so use cases can be driven
//! by scripted doubles in tests.

mod clock;
pub mod transport;
pub mod wallet;

pub use clock::*;
pub use transport::{ApiRequest, HttpMethod, RegistryTransportPort, TransportError};
pub use wallet::{WalletError, WalletPort};
