use std::fmt;

use serde::{Deserialize, Serialize};

/// Body of `POST /properties`.
///
/// `previous_owner` is sent as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProperty {
    pub matricula: String,
    pub previous_owner: Option<String>,
    pub current_owner: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Fields of the registration response the client consumes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PropertyRegistered {
    pub tx_hash: String,
}

impl fmt::Display for PropertyRegistered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Propriedade registrada! Tx: {}", self.tx_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_previous_owner_serializes_as_null() {
        let body = serde_json::to_value(NewProperty {
            matricula: "M-1".into(),
            previous_owner: None,
            current_owner: "0xB".into(),
            latitude: -23.5,
            longitude: -46.6,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "matricula": "M-1",
                "previous_owner": null,
                "current_owner": "0xB",
                "latitude": -23.5,
                "longitude": -46.6
            })
        );
    }

    #[test]
    fn summary_mentions_tx_hash() {
        let registered: PropertyRegistered =
            serde_json::from_value(json!({"id": 3, "tx_hash": "0xfeed", "matricula": "M-1"})).unwrap();
        assert_eq!(registered.to_string(), "Propriedade registrada! Tx: 0xfeed");
    }
}
