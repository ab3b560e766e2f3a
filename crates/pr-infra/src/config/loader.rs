//! # Configuration Loader / 配置加载器
//!
//! Resolution order, later wins:
//!
//! 1. `AppConfig::default()`
//! 2. optional TOML file (missing keys keep their defaults)
//! 3. `PROPREG_*` environment variables
//!
//! CLI flags are applied on top by the binary.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use pr_core::config::AppConfig;
use thiserror::Error;
use tracing::debug;

pub const ENV_API_URL: &str = "PROPREG_API_URL";
pub const ENV_SIWE_CHAIN_ID: &str = "PROPREG_SIWE_CHAIN_ID";
pub const ENV_APP_ORIGIN: &str = "PROPREG_APP_ORIGIN";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "PROPREG_REQUEST_TIMEOUT_SECS";
pub const ENV_OVERLAP_POLICY: &str = "PROPREG_OVERLAP_POLICY";
pub const ENV_WALLET_KEY: &str = "PROPREG_WALLET_KEY";
pub const ENV_LOG_DIR: &str = "PROPREG_LOG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("invalid app origin {0:?}")]
    InvalidOrigin(String),
}

/// Loads the configuration from an optional file and the process environment.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let config = match path {
        Some(path) => load_config_file(path)?,
        None => AppConfig::default(),
    };
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "config file loaded");
    Ok(config)
}

/// Applies `PROPREG_*` overrides read through `lookup`.
///
/// Blank values are ignored. Malformed numbers and policies are errors.
pub fn apply_env_overrides<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(api_url) = get(ENV_API_URL) {
        config.api_url = api_url;
    }
    if let Some(raw) = get(ENV_SIWE_CHAIN_ID) {
        config.siwe_chain_id = parse(ENV_SIWE_CHAIN_ID, &raw)?;
    }
    if let Some(origin) = get(ENV_APP_ORIGIN) {
        config.app_origin = origin;
    }
    if let Some(raw) = get(ENV_REQUEST_TIMEOUT_SECS) {
        config.request_timeout_secs = parse(ENV_REQUEST_TIMEOUT_SECS, &raw)?;
    }
    if let Some(raw) = get(ENV_OVERLAP_POLICY) {
        config.overlap_policy = parse(ENV_OVERLAP_POLICY, &raw)?;
    }
    if let Some(key) = get(ENV_WALLET_KEY) {
        config.wallet_private_key = Some(key);
    }
    if let Some(dir) = get(ENV_LOG_DIR) {
        config.log_dir = Some(PathBuf::from(dir));
    }
    Ok(config)
}

fn parse<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

/// `domain` and `uri` of the sign-in message, derived from the app origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiweOrigin {
    /// `host[:port]`, the port only when it is not the scheme default.
    pub domain: String,
    pub uri: String,
}

pub fn siwe_origin(app_origin: &str) -> Result<SiweOrigin, ConfigError> {
    let invalid = || ConfigError::InvalidOrigin(app_origin.to_string());
    let url = reqwest::Url::parse(app_origin.trim()).map_err(|_| invalid())?;
    let host = url.host_str().ok_or_else(invalid)?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(invalid());
    }

    // `port()` is `None` for a scheme's default port, as in `location.host`.
    let domain = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    Ok(SiweOrigin {
        domain,
        uri: origin.ascii_serialization(),
    })
}
