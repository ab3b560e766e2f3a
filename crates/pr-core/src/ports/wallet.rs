use async_trait::async_trait;
use thiserror::Error;

/// Wallet capability failure. The wallet's own message is surfaced verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// The user denied account access or refused to sign.
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Signing(String),
}

/// Opaque signing capability: an active address and `sign(message) -> signature`.
#[async_trait]
pub trait WalletPort: Send + Sync {
    /// Requests account access and returns the active address.
    async fn request_accounts(&self) -> Result<String, WalletError>;

    /// Signs the exact UTF-8 bytes of `message`.
    async fn sign_message(&self, message: &str) -> Result<String, WalletError>;
}

#[cfg(test)]
mockall::mock! {
    pub Wallet {}

    #[async_trait]
    impl WalletPort for Wallet {
        async fn request_accounts(&self) -> Result<String, WalletError>;
        async fn sign_message(&self, message: &str) -> Result<String, WalletError>;
    }
}
