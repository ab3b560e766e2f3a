//! # pr-infra
//!
//! Adapters behind the `pr-core` ports: the reqwest registry transport, the
//! local-key wallet, the system clock and configuration loading.

pub mod config;
pub mod http;
pub mod time;
pub mod wallet;

pub use config::{load_config, siwe_origin, ConfigError, SiweOrigin};
pub use http::HttpRegistryTransport;
pub use time::SystemClock;
pub use wallet::{LocalKeyError, LocalKeyWallet};
