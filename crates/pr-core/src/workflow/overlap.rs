use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which of several overlapping runs of one workflow decides the displayed state.
///
/// 同一工作流并发请求时，以哪一个结果为准。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// Whatever resolves last is displayed, regardless of start order.
    #[default]
    LastResponseWins,
    /// Responses from runs older than the most recently started one are discarded.
    LatestRequestWins,
}

impl FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "last-response-wins" => Ok(OverlapPolicy::LastResponseWins),
            "latest-request-wins" => Ok(OverlapPolicy::LatestRequestWins),
            other => Err(format!("unknown overlap policy: {other}")),
        }
    }
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlapPolicy::LastResponseWins => f.write_str("last-response-wins"),
            OverlapPolicy::LatestRequestWins => f.write_str("latest-request-wins"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kebab_case_names() {
        assert_eq!(
            "Latest-Request-Wins".parse::<OverlapPolicy>(),
            Ok(OverlapPolicy::LatestRequestWins)
        );
        assert!("first-wins".parse::<OverlapPolicy>().is_err());
    }
}
