use std::fmt;

use serde::{Deserialize, Serialize};

use super::tx_suffix;

/// Signer action on a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferAction {
    Sign,
    Reject,
}

impl TransferAction {
    pub fn parse(raw: &str) -> Option<TransferAction> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SIGN" => Some(TransferAction::Sign),
            "REJECT" => Some(TransferAction::Reject),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferActionRequest {
    pub action: TransferAction,
}

/// The four independent approvals, as reported by the server.
///
/// The client never decides completion from these; it only displays them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SignatureFlags {
    pub owner_signed: bool,
    pub buyer_signed: bool,
    pub regulator_signed: bool,
    pub financial_signed: bool,
}

impl fmt::Display for SignatureFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn mark(signed: bool) -> &'static str {
            if signed {
                "sim"
            } else {
                "não"
            }
        }
        write!(
            f,
            "proprietário: {}, comprador: {}, regulador: {}, financeiro: {}",
            mark(self.owner_signed),
            mark(self.buyer_signed),
            mark(self.regulator_signed),
            mark(self.financial_signed)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransferInitiated {
    pub id: u64,
    pub proposal_id: u64,
    #[serde(flatten)]
    pub signatures: SignatureFlags,
}

impl fmt::Display for TransferInitiated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transferência #{} iniciada para a proposta #{}. Assinaturas: {}",
            self.id, self.proposal_id, self.signatures
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransferSigned {
    pub id: u64,
    pub status: String,
    #[serde(flatten)]
    pub signatures: SignatureFlags,
    #[serde(default)]
    pub tx_hash: Option<String>,
}

impl fmt::Display for TransferSigned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transferência #{} ({}). Assinaturas: {}.{}",
            self.id,
            self.status,
            self.signatures,
            tx_suffix(&self.tx_hash)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partially_signed_transfer_shows_flags_without_tx() {
        let signed: TransferSigned = serde_json::from_value(json!({
            "id": 5,
            "status": "PENDING",
            "owner_signed": true,
            "buyer_signed": false,
            "regulator_signed": false,
            "financial_signed": false
        }))
        .unwrap();
        let summary = signed.to_string();
        assert!(summary.contains("proprietário: sim"));
        assert!(summary.contains("comprador: não"));
        assert!(summary.contains("regulador: não"));
        assert!(summary.contains("financeiro: não"));
        assert!(!summary.contains("Tx"));
    }

    #[test]
    fn completed_transfer_shows_tx_hash() {
        let signed: TransferSigned = serde_json::from_value(json!({
            "id": 5,
            "status": "COMPLETED",
            "owner_signed": true,
            "buyer_signed": true,
            "regulator_signed": true,
            "financial_signed": true,
            "tx_hash": "0xabc"
        }))
        .unwrap();
        assert!(signed.to_string().ends_with("Tx: 0xabc"));
    }

    #[test]
    fn null_tx_hash_is_absent() {
        let signed: TransferSigned = serde_json::from_value(json!({
            "id": 1,
            "status": "REJECTED",
            "owner_signed": false,
            "buyer_signed": false,
            "regulator_signed": false,
            "financial_signed": false,
            "tx_hash": null
        }))
        .unwrap();
        assert_eq!(signed.tx_hash, None);
    }

    #[test]
    fn action_parse_rejects_unknown_values() {
        assert_eq!(TransferAction::parse("sign"), Some(TransferAction::Sign));
        assert_eq!(TransferAction::parse("approve"), None);
    }
}
