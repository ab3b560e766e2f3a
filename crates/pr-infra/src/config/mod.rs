mod loader;

pub use loader::{
    apply_env_overrides, load_config, load_config_file, siwe_origin, ConfigError, SiweOrigin,
    ENV_API_URL, ENV_APP_ORIGIN, ENV_LOG_DIR, ENV_OVERLAP_POLICY, ENV_REQUEST_TIMEOUT_SECS,
    ENV_SIWE_CHAIN_ID, ENV_WALLET_KEY,
};
