use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Rejected,
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProposalStatus::Pending => f.write_str("PENDING"),
            ProposalStatus::Accepted => f.write_str("ACCEPTED"),
            ProposalStatus::Rejected => f.write_str("REJECTED"),
        }
    }
}

/// Owner decision on a proposal, transmitted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    pub fn parse(raw: &str) -> Option<Decision> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ACCEPT" => Some(Decision::Accept),
            "REJECT" => Some(Decision::Reject),
            _ => None,
        }
    }
}

/// Body of `POST /proposals`. Blank optional fields are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProposal {
    pub matricula: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionRequest {
    pub decision: Decision,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProposalSubmitted {
    pub id: u64,
    pub owner_wallet: String,
    pub status: ProposalStatus,
    pub matricula: String,
}

impl fmt::Display for ProposalSubmitted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Proposta #{} enviada ao proprietário {} (matrícula {}, status {})",
            self.id, self.owner_wallet, self.matricula, self.status
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProposalDecided {
    pub id: u64,
    pub status: ProposalStatus,
    pub proposer_wallet: String,
}

impl fmt::Display for ProposalDecided {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Proposta #{} agora está {} (proponente {})",
            self.id, self.status, self.proposer_wallet
        )
    }
}
