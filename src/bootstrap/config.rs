//! # Configuration resolution / 配置解析
//!
//! `.env` → TOML file → `PROPREG_*` environment → command-line flags.

use anyhow::Context;
use pr_core::config::AppConfig;
use pr_infra::load_config;

use crate::cli::Cli;

pub fn resolve_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err).context("Failed to load .env file");
        }
    }

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    Ok(apply_cli_overrides(config, cli))
}

fn apply_cli_overrides(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.clone();
    }
    if let Some(chain_id) = cli.chain_id {
        config.siwe_chain_id = chain_id;
    }
    if let Some(origin) = &cli.origin {
        config.app_origin = origin.clone();
    }
    if let Some(policy) = cli.overlap_policy {
        config.overlap_policy = policy;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.request_timeout_secs = timeout_secs;
    }
    config
}
