use std::sync::Arc;

use pr_core::auth::Session;
use tokio::sync::RwLock;

/// Explicit in-memory session shared by the login flow and every workflow.
///
/// Created empty at bootstrap, filled on a successful SIWE exchange and
/// cleared on logout or a failed re-login. Nothing is persisted.
///
/// Every clear advances an epoch. A login attempt records the epoch when it
/// starts and stores its session with [`SessionStore::set_if_current`], so an
/// attempt that a logout overtook can never repopulate the store.
#[derive(Default)]
pub struct SessionStore {
    current: RwLock<Slot>,
}

#[derive(Default)]
struct Slot {
    epoch: u64,
    session: Option<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the store wrapped in Arc for shared ownership.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.session.clone()
    }

    /// Bearer token of the active session, if any.
    pub async fn token(&self) -> Option<String> {
        self.current
            .read()
            .await
            .session
            .as_ref()
            .map(|session| session.credential_token.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.session.is_some()
    }

    /// Number of clears so far.
    pub async fn epoch(&self) -> u64 {
        self.current.read().await.epoch
    }

    pub async fn set(&self, session: Session) {
        self.current.write().await.session = Some(session);
    }

    /// Stores `session` only if no clear happened since `epoch` was read.
    pub async fn set_if_current(&self, epoch: u64, session: Session) -> bool {
        let mut slot = self.current.write().await;
        if slot.epoch != epoch {
            return false;
        }
        slot.session = Some(session);
        true
    }

    /// Clears the session, returning the one that was active.
    pub async fn clear(&self) -> Option<Session> {
        let mut slot = self.current.write().await;
        slot.epoch += 1;
        slot.session.take()
    }
}
