//! Authentication state machine.
//!
//! Defines a pure state transition function for the SIWE login flow. The
//! orchestrator in the application layer executes the returned actions and
//! feeds their outcomes back as events.

use crate::auth::{Role, SiweChallenge};
use crate::ports::WalletError;

/// Message surfaced when the challenge cannot be started, whatever the server said.
pub const START_CHALLENGE_FAILED: &str = "Failed to start SIWE";

/// Login flow state.
///
/// 登录流程状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// No login attempted, or logged out.
    ///
    /// 未连接。
    Disconnected,
    /// Asking the wallet for account access.
    ///
    /// 请求钱包账户授权。
    ConnectingWallet,
    /// Waiting for the server nonce.
    ///
    /// 等待服务器 nonce。
    AwaitingNonce { address: String },
    /// Waiting for the wallet to sign the canonical message.
    ///
    /// 等待钱包签名。
    AwaitingSignature { address: String, message: String },
    /// Waiting for the server to verify the signature.
    ///
    /// 等待服务器验证签名。
    VerifyingSignature { address: String },
    /// Session established.
    ///
    /// 已认证。
    Authenticated { address: String, role: Role },
    /// The attempt failed; the error is shown verbatim.
    ///
    /// 登录失败。
    Failed { error: AuthError },
}

impl AuthState {
    /// Whether no further event is expected for this attempt.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AuthState::Disconnected | AuthState::Authenticated { .. } | AuthState::Failed { .. }
        )
    }

    /// Short status line for presentation.
    pub fn status_text(&self) -> String {
        match self {
            AuthState::Disconnected => "Desconectado".to_string(),
            AuthState::ConnectingWallet => "Conectando carteira…".to_string(),
            AuthState::AwaitingNonce { .. } => "Gerando nonce…".to_string(),
            AuthState::AwaitingSignature { .. } => "Assinando mensagem…".to_string(),
            AuthState::VerifyingSignature { .. } => "Verificando assinatura…".to_string(),
            AuthState::Authenticated { .. } => "Autenticado".to_string(),
            AuthState::Failed { error } => format!("Erro: {error}"),
        }
    }
}

/// Events that drive the login flow.
///
/// 驱动登录流程的事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// User starts (or restarts) a login.
    Connect,
    /// Wallet granted access to its active account.
    AccountsGranted { address: String },
    /// Server issued a nonce; the challenge carries the local origin settings.
    ChallengeIssued { challenge: SiweChallenge },
    /// Wallet signed the canonical message.
    MessageSigned { signature: String },
    /// Server accepted the signature and assigned a role.
    Verified { role: Role },
    /// Any step failed.
    Failed { error: AuthError },
    /// User logged out.
    Disconnect,
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    RequestAccounts,
    StartChallenge,
    SignMessage {
        message: String,
    },
    VerifySignature {
        address: String,
        message: String,
        signature: String,
    },
}

/// Login error types. `Display` is the exact user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("wallet not found")]
    WalletNotFound,
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error("{}", START_CHALLENGE_FAILED)]
    StartFailed,
    #[error("{0}")]
    VerifyFailed(String),
    /// A logout overtook the attempt before its session was stored.
    #[error("Login cancelado")]
    Cancelled,
}

/// Pure authentication state machine.
///
/// 纯状态机：不包含副作用。
pub struct AuthStateMachine;

impl AuthStateMachine {
    pub fn transition(state: AuthState, event: AuthEvent) -> (AuthState, Vec<AuthAction>) {
        match (state, event) {
            // Every attempt starts from scratch; nothing from a prior attempt survives.
            (_, AuthEvent::Connect) => (AuthState::ConnectingWallet, vec![AuthAction::RequestAccounts]),
            (_, AuthEvent::Disconnect) => (AuthState::Disconnected, Vec::new()),
            (AuthState::ConnectingWallet, AuthEvent::AccountsGranted { address }) => (
                AuthState::AwaitingNonce { address },
                vec![AuthAction::StartChallenge],
            ),
            (AuthState::AwaitingNonce { address }, AuthEvent::ChallengeIssued { challenge }) => {
                let message = challenge.canonical_message(&address);
                (
                    AuthState::AwaitingSignature {
                        address,
                        message: message.clone(),
                    },
                    vec![AuthAction::SignMessage { message }],
                )
            }
            (
                AuthState::AwaitingSignature { address, message },
                AuthEvent::MessageSigned { signature },
            ) => (
                AuthState::VerifyingSignature {
                    address: address.clone(),
                },
                vec![AuthAction::VerifySignature {
                    address,
                    message,
                    signature,
                }],
            ),
            (AuthState::VerifyingSignature { address }, AuthEvent::Verified { role }) => {
                (AuthState::Authenticated { address, role }, Vec::new())
            }
            (state, AuthEvent::Failed { error }) if !state.is_terminal() => {
                (AuthState::Failed { error }, Vec::new())
            }
            (state, _event) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(state = ?state, event = ?_event, "auth event ignored in current state");
                (state, Vec::new())
            }
        }
    }
}
