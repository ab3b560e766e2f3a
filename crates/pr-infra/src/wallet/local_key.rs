//! Local-key wallet.
//!
//! Holds a secp256k1 key in process memory and signs like an injected
//! browser wallet would: EIP-191 `personal_sign` over the exact message
//! bytes, address rendered with the EIP-55 checksum.
//!
//! 本地私钥钱包：仅用于命令行客户端，私钥来自配置，绝不写入日志。

use async_trait::async_trait;
use secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};
use sha3::{Digest, Keccak256};
use thiserror::Error;
use tracing::debug;

use pr_core::ports::{WalletError, WalletPort};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocalKeyError {
    #[error("private key is not valid hex")]
    InvalidHex,
    #[error("private key is not a valid secp256k1 scalar")]
    InvalidKey,
}

pub struct LocalKeyWallet {
    secp: Secp256k1<All>,
    secret: SecretKey,
    address: String,
}

impl LocalKeyWallet {
    /// Accepts 32 bytes of hex, with or without a `0x` prefix.
    pub fn from_hex(raw: &str) -> Result<Self, LocalKeyError> {
        let trimmed = raw.trim();
        let stripped = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(stripped).map_err(|_| LocalKeyError::InvalidHex)?;
        let secret = SecretKey::from_slice(&bytes).map_err(|_| LocalKeyError::InvalidKey)?;

        let secp = Secp256k1::new();
        let address = address_of(&PublicKey::from_secret_key(&secp, &secret));
        Ok(Self {
            secp,
            secret,
            address,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// 65-byte `r || s || v` signature, `v` in {27, 28}.
    fn personal_sign(&self, message: &str) -> [u8; 65] {
        let digest = Message::from_digest(personal_message_hash(message));
        let (recovery_id, compact) = self
            .secp
            .sign_ecdsa_recoverable(&digest, &self.secret)
            .serialize_compact();

        let mut signature = [0u8; 65];
        signature[..64].copy_from_slice(&compact);
        signature[64] = 27 + recovery_id.to_i32() as u8;
        signature
    }
}

#[async_trait]
impl WalletPort for LocalKeyWallet {
    async fn request_accounts(&self) -> Result<String, WalletError> {
        Ok(self.address.clone())
    }

    async fn sign_message(&self, message: &str) -> Result<String, WalletError> {
        let signature = self.personal_sign(message);
        debug!(address = %self.address, bytes = message.len(), "message signed");
        Ok(format!("0x{}", hex::encode(signature)))
    }
}

fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// `keccak256("\x19Ethereum Signed Message:\n" + len(message) + message)`
fn personal_message_hash(message: &str) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(format!("\x19Ethereum Signed Message:\n{}", message.len()).as_bytes());
    hasher.update(message.as_bytes());
    hasher.finalize().into()
}

fn address_of(public_key: &PublicKey) -> String {
    let uncompressed = public_key.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    to_checksum_address(&address)
}

/// EIP-55 mixed-case rendering of a 20-byte address.
pub fn to_checksum_address(address: &[u8; 20]) -> String {
    let lower = hex::encode(address);
    let hash = keccak256(lower.as_bytes());

    let checksummed: String = lower
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect();
    format!("0x{checksummed}")
}
