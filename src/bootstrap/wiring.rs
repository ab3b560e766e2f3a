//! # Dependency wiring / 依赖注入
//!
//! The only place that knows which adapter implements which port.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use pr_app::{RegistryUseCases, SessionStore, SiweLogin, SiweSettings};
use pr_core::config::AppConfig;
use pr_core::ports::{RegistryTransportPort, WalletPort};
use pr_infra::{siwe_origin, HttpRegistryTransport, LocalKeyWallet, SystemClock};

/// Long-lived application objects shared by the shell and its tasks.
pub struct AppRuntime {
    pub config: AppConfig,
    pub session: Arc<SessionStore>,
    pub login: Arc<SiweLogin>,
    pub registry: Arc<RegistryUseCases>,
}

pub fn wire(config: AppConfig) -> anyhow::Result<AppRuntime> {
    let transport: Arc<dyn RegistryTransportPort> = Arc::new(
        HttpRegistryTransport::from_config(&config).context("Failed to build HTTP transport")?,
    );

    let wallet: Option<Arc<dyn WalletPort>> = match config.wallet_private_key.as_deref() {
        Some(key) => {
            let wallet = LocalKeyWallet::from_hex(key).context("Invalid wallet private key")?;
            info!(address = %wallet.address(), "local wallet loaded");
            Some(Arc::new(wallet))
        }
        None => {
            warn!("no wallet key configured; login will fail with \"wallet not found\"");
            None
        }
    };

    let origin = siwe_origin(&config.app_origin)?;
    let settings = SiweSettings {
        domain: origin.domain,
        uri: origin.uri,
        chain_id: config.siwe_chain_id,
    };

    let session = SessionStore::new().arc();
    let login = Arc::new(SiweLogin::new(
        wallet,
        transport.clone(),
        Arc::new(SystemClock),
        session.clone(),
        settings,
    ));
    let registry = Arc::new(RegistryUseCases::new(
        transport,
        session.clone(),
        config.overlap_policy,
    ));

    info!(
        api_url = %config.api_url,
        chain_id = config.siwe_chain_id,
        overlap_policy = %config.overlap_policy,
        "application wired"
    );
    Ok(AppRuntime {
        config,
        session,
        login,
        registry,
    })
}
