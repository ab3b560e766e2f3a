//! SIWE challenge and canonical sign-in message.

use chrono::{DateTime, Utc};

/// Chain id used when no override is configured (Sepolia).
pub const DEFAULT_CHAIN_ID: u64 = 11_155_111;

/// A single-use sign-in challenge.
///
/// 单次使用的登录挑战。
///
/// Created fresh for every authentication attempt from the server nonce and the
/// local origin settings. It is folded into the canonical message exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiweChallenge {
    pub nonce: String,
    pub domain: String,
    pub uri: String,
    pub chain_id: u64,
    pub issued_at: String,
}

impl SiweChallenge {
    /// Builds the canonical message the wallet signs.
    ///
    /// The layout is byte-exact; the server re-derives the nonce from the
    /// `Nonce:` line, so no field may be reordered or padded.
    pub fn canonical_message(&self, address: &str) -> String {
        format!(
            "{domain} wants you to sign in with your Ethereum account:\n\
             {address}\n\
             \n\
             URI: {uri}\n\
             Version: 1\n\
             Chain ID: {chain_id}\n\
             Nonce: {nonce}\n\
             Issued At: {issued_at}",
            domain = self.domain,
            address = address,
            uri = self.uri,
            chain_id = self.chain_id,
            nonce = self.nonce,
            issued_at = self.issued_at,
        )
    }
}

/// Formats a timestamp as ISO-8601 truncated to whole seconds with a literal `Z`.
pub fn format_issued_at(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
