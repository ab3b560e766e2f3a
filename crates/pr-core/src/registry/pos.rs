use std::fmt;

use serde::{Deserialize, Serialize};

use super::tx_suffix;

/// Body of `POST /pos/validate`; `force_invalid` is passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PosValidationRequest {
    pub tx_reference: String,
    pub force_invalid: bool,
}

/// Validator identifier as returned by the server (name or numeric index).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ValidatorId {
    Name(String),
    Index(i64),
}

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatorId::Name(name) => f.write_str(name),
            ValidatorId::Index(index) => write!(f, "{index}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PosOutcome {
    pub status: String,
    pub approvals: u32,
    pub required: u32,
    /// Ordered as selected by the server.
    pub selected_validators: Vec<ValidatorId>,
    #[serde(default)]
    pub tx_hash: Option<String>,
}

impl fmt::Display for PosOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let validators = self
            .selected_validators
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "PoS {}: {}/{} aprovações. Validadores: [{}].{}",
            self.status,
            self.approvals,
            self.required,
            validators,
            tx_suffix(&self.tx_hash)
        )
    }
}
