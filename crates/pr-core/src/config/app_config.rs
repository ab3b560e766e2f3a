//! Application configuration domain model

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::DEFAULT_CHAIN_ID;
use crate::workflow::OverlapPolicy;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_APP_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application configuration
///
/// Resolved from defaults, an optional TOML file and environment overrides.
/// This is a plain DTO; loading lives in the infrastructure layer.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the registry service
    pub api_url: String,

    /// Chain id embedded in the sign-in message
    pub siwe_chain_id: u64,

    /// Origin the sign-in message claims (`uri`; `domain` is its host)
    pub app_origin: String,

    /// Per-request timeout; `0` disables it
    pub request_timeout_secs: u64,

    /// Overlapping runs of one workflow
    pub overlap_policy: OverlapPolicy,

    /// Hex secp256k1 key for the local wallet; no wallet when absent
    pub wallet_private_key: Option<String>,

    /// Directory for the rolling log file; stdout only when absent
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            siwe_chain_id: DEFAULT_CHAIN_ID,
            app_origin: DEFAULT_APP_ORIGIN.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            overlap_policy: OverlapPolicy::default(),
            wallet_private_key: None,
            log_dir: None,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_url", &self.api_url)
            .field("siwe_chain_id", &self.siwe_chain_id)
            .field("app_origin", &self.app_origin)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("overlap_policy", &self.overlap_policy)
            .field(
                "wallet_private_key",
                &self.wallet_private_key.as_ref().map(|_| "<redacted>"),
            )
            .field("log_dir", &self.log_dir)
            .finish()
    }
}
