//! SIWE login orchestrator.
//!
//! This module coordinates the authentication state machine and its side
//! effects: wallet access, nonce request, signing and verification.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, info_span, warn, Instrument};

use pr_core::auth::state_machine::START_CHALLENGE_FAILED;
use pr_core::auth::{
    format_issued_at, AuthAction, AuthError, AuthEvent, AuthState, AuthStateMachine, Role, Session,
    SiweChallenge,
};
use pr_core::ports::{ApiRequest, ClockPort, RegistryTransportPort, WalletPort};
use pr_core::registry::endpoints::{self, fallback};

use crate::session::SessionStore;

/// Origin and chain settings folded into every challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiweSettings {
    /// `host[:port]` of the application origin.
    pub domain: String,
    /// Full application origin, e.g. `http://localhost:3000`.
    pub uri: String,
    pub chain_id: u64,
}

#[derive(Deserialize)]
struct StartResponse {
    nonce: String,
}

#[derive(Deserialize)]
struct VerifyResponse {
    token: String,
    role: Role,
}

/// Orchestrator that drives the login state and its side effects.
pub struct SiweLogin {
    wallet: Option<Arc<dyn WalletPort>>,
    transport: Arc<dyn RegistryTransportPort>,
    clock: Arc<dyn ClockPort>,
    session: Arc<SessionStore>,
    settings: SiweSettings,
    state: watch::Sender<AuthState>,
    /// Serializes login/logout so two attempts never interleave their steps.
    dispatch_lock: Mutex<()>,
}

impl SiweLogin {
    /// `wallet` is `None` when no wallet capability is available.
    pub fn new(
        wallet: Option<Arc<dyn WalletPort>>,
        transport: Arc<dyn RegistryTransportPort>,
        clock: Arc<dyn ClockPort>,
        session: Arc<SessionStore>,
        settings: SiweSettings,
    ) -> Self {
        let (state, _) = watch::channel(AuthState::Disconnected);
        Self {
            wallet,
            transport,
            clock,
            session,
            settings,
            state,
            dispatch_lock: Mutex::new(()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Runs the full challenge-response exchange with a fresh nonce.
    pub async fn login(&self) -> Result<Session, AuthError> {
        let (state, established) = self.dispatch(AuthEvent::Connect).await;
        match (state, established) {
            (AuthState::Authenticated { .. }, Some(session)) => Ok(session),
            (AuthState::Failed { error }, _) => Err(error),
            (state, _) => Err(AuthError::VerifyFailed(format!(
                "login interrompido: {}",
                state.status_text()
            ))),
        }
    }

    /// Drops the session and returns to `Disconnected`.
    ///
    /// The session is cleared before waiting for the dispatch lock, which
    /// also invalidates an attempt still in flight.
    pub async fn logout(&self) {
        if let Some(session) = self.session.clear().await {
            info!(wallet = %session.wallet_address, "session cleared");
        }
        self.dispatch(AuthEvent::Disconnect).await;
    }

    async fn dispatch(&self, event: AuthEvent) -> (AuthState, Option<Session>) {
        let _dispatch_guard = self.dispatch_lock.lock().await;

        let span = info_span!("usecase.siwe_login.dispatch", event = ?event);
        async {
            let epoch = self.session.epoch().await;
            let mut current = self.state();
            let mut pending_events = vec![event];
            let mut established = None;

            while let Some(event) = pending_events.pop() {
                let from = current.status_text();
                debug!(?event, "auth event");
                let (next, actions) = AuthStateMachine::transition(current, event);
                info!(from = %from, to = %next.status_text(), "auth state transition");
                self.state.send_replace(next.clone());

                for action in actions {
                    let follow_up = self.execute_action(action, epoch, &mut established).await;
                    pending_events.push(follow_up);
                }
                current = next;
            }

            if let AuthState::Failed { error } = &current {
                warn!(error = %error, "login failed");
                self.session.clear().await;
            }

            (current, established)
        }
        .instrument(span)
        .await
    }

    async fn execute_action(
        &self,
        action: AuthAction,
        epoch: u64,
        established: &mut Option<Session>,
    ) -> AuthEvent {
        let result = match action {
            AuthAction::RequestAccounts => self
                .request_accounts()
                .await
                .map(|address| AuthEvent::AccountsGranted { address }),
            AuthAction::StartChallenge => self
                .start_challenge()
                .await
                .map(|challenge| AuthEvent::ChallengeIssued { challenge }),
            AuthAction::SignMessage { message } => self
                .sign(&message)
                .await
                .map(|signature| AuthEvent::MessageSigned { signature }),
            AuthAction::VerifySignature {
                address,
                message,
                signature,
            } => match self.verify(address, message, signature).await {
                Ok(session) => {
                    let role = session.role.clone();
                    if self.session.set_if_current(epoch, session.clone()).await {
                        info!(wallet = %session.wallet_address, role = %role, "session established");
                        *established = Some(session);
                        Ok(AuthEvent::Verified { role })
                    } else {
                        warn!(wallet = %session.wallet_address, "logout during login; session discarded");
                        Err(AuthError::Cancelled)
                    }
                }
                Err(error) => Err(error),
            },
        };

        result.unwrap_or_else(|error| AuthEvent::Failed { error })
    }

    fn wallet(&self) -> Result<&Arc<dyn WalletPort>, AuthError> {
        self.wallet.as_ref().ok_or(AuthError::WalletNotFound)
    }

    async fn request_accounts(&self) -> Result<String, AuthError> {
        let address = self.wallet()?.request_accounts().await?;
        debug!(wallet = %address, "wallet account granted");
        Ok(address)
    }

    async fn sign(&self, message: &str) -> Result<String, AuthError> {
        Ok(self.wallet()?.sign_message(message).await?)
    }

    async fn start_challenge(&self) -> Result<SiweChallenge, AuthError> {
        let request =
            ApiRequest::post(endpoints::SIWE_START).with_fallback_error(START_CHALLENGE_FAILED);

        // The server's message is deliberately not surfaced for this endpoint.
        let response = self.transport.send(request).await.map_err(|err| {
            warn!(error = %err, "siwe start request failed");
            AuthError::StartFailed
        })?;
        let start: StartResponse = serde_json::from_value(response).map_err(|err| {
            warn!(error = %err, "siwe start response malformed");
            AuthError::StartFailed
        })?;
        if start.nonce.trim().is_empty() {
            warn!("siwe start returned an empty nonce");
            return Err(AuthError::StartFailed);
        }

        Ok(SiweChallenge {
            nonce: start.nonce,
            domain: self.settings.domain.clone(),
            uri: self.settings.uri.clone(),
            chain_id: self.settings.chain_id,
            issued_at: format_issued_at(self.clock.now_utc()),
        })
    }

    async fn verify(
        &self,
        address: String,
        message: String,
        signature: String,
    ) -> Result<Session, AuthError> {
        let request = ApiRequest::post(endpoints::SIWE_VERIFY)
            .with_json(json!({
                "address": address,
                "message": message,
                "signature": signature,
            }))
            .with_fallback_error(fallback::VERIFY_SIGNATURE);

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|err| AuthError::VerifyFailed(err.to_string()))?;
        let verified: VerifyResponse = serde_json::from_value(response).map_err(|err| {
            AuthError::VerifyFailed(format!("resposta inválida do servidor: {err}"))
        })?;

        Ok(Session::new(address, verified.role, verified.token))
    }
}
