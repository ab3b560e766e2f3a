use std::fmt;

use crate::auth::Role;

/// Authenticated session held in memory for the lifetime of the process.
///
/// 内存中的会话：进程退出或显式登出即销毁。
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub wallet_address: String,
    pub role: Role,
    pub credential_token: String,
}

impl Session {
    pub fn new(wallet_address: String, role: Role, credential_token: String) -> Self {
        Self {
            wallet_address,
            role,
            credential_token,
        }
    }
}

// The bearer token must never end up in logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("wallet_address", &self.wallet_address)
            .field("role", &self.role)
            .field("credential_token", &"<redacted>")
            .finish()
    }
}
