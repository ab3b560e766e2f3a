//! Shared doubles for the pr-app integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pr_app::{SessionStore, SiweSettings};
use pr_core::auth::{Role, Session};
use pr_core::ports::{ApiRequest, ClockPort, RegistryTransportPort, TransportError, WalletError, WalletPort};
use serde_json::Value;

/// Routes test logs through the libtest capture; `RUST_LOG` selects the level.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub type Reply = (Duration, Result<Value, TransportError>);
type Responder = Box<dyn Fn(&ApiRequest) -> Reply + Send + Sync>;

/// Transport double answering per path, optionally after a delay.
///
/// Requests are recorded in arrival order. A path with no responder fails
/// with a network error so a forgotten script never looks like success.
#[derive(Default)]
pub struct ScriptedTransport {
    responders: HashMap<String, Responder>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(self, path: &str, body: Value) -> Self {
        self.respond(path, move |_| (Duration::ZERO, Ok(body.clone())))
    }

    pub fn status(self, path: &str, status: u16, body: &str, fallback: &'static str) -> Self {
        let body = body.to_string();
        self.respond(path, move |_| {
            (
                Duration::ZERO,
                Err(TransportError::from_status(status, body.clone(), fallback)),
            )
        })
    }

    pub fn respond(
        mut self,
        path: &str,
        responder: impl Fn(&ApiRequest) -> Reply + Send + Sync + 'static,
    ) -> Self {
        self.responders.insert(path.to_string(), Box::new(responder));
        self
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|request| request.path).collect()
    }
}

#[async_trait]
impl RegistryTransportPort for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        let (delay, reply) = match self.responders.get(&request.path) {
            Some(responder) => responder(&request),
            None => (
                Duration::ZERO,
                Err(TransportError::Network(format!("no script for {}", request.path))),
            ),
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply
    }
}

/// Wallet double with a fixed account that signs everything.
pub struct StaticWallet {
    pub address: String,
    pub signature: String,
    pub signed: Mutex<Vec<String>>,
}

impl StaticWallet {
    pub fn new(address: &str, signature: &str) -> Arc<Self> {
        Arc::new(Self {
            address: address.to_string(),
            signature: signature.to_string(),
            signed: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl WalletPort for StaticWallet {
    async fn request_accounts(&self) -> Result<String, WalletError> {
        Ok(self.address.clone())
    }

    async fn sign_message(&self, message: &str) -> Result<String, WalletError> {
        self.signed.lock().unwrap().push(message.to_string());
        Ok(self.signature.clone())
    }
}

/// Clock pinned to 2024-01-01T00:00:00.750Z.
pub struct FixedClock;

impl ClockPort for FixedClock {
    fn now_ms(&self) -> i64 {
        1_704_067_200_750
    }
}

pub fn example_settings() -> SiweSettings {
    SiweSettings {
        domain: "example.com".into(),
        uri: "https://example.com".into(),
        chain_id: 11_155_111,
    }
}

pub async fn session_with(role: Role, token: &str) -> Arc<SessionStore> {
    let store = SessionStore::new().arc();
    store
        .set(Session::new("0xCAFE".into(), role, token.into()))
        .await;
    store
}
