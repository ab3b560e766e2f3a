use std::fmt;

use serde::{Deserialize, Serialize};

/// Role assigned to a wallet by the registry.
///
/// Roles the server does not know yet are kept verbatim in [`Role::Other`] so a
/// newer backend never breaks login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Regulator,
    Financial,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "USER",
            Role::Regulator => "REGULATOR",
            Role::Financial => "FINANCIAL",
            Role::Other(raw) => raw,
        }
    }

    /// Parses one of the assignable roles, rejecting anything else.
    pub fn parse_assignable(raw: &str) -> Option<Role> {
        match Role::from(raw.trim().to_ascii_uppercase()) {
            Role::Other(_) => None,
            role => Some(role),
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "USER" => Role::User,
            "REGULATOR" => Role::Regulator,
            "FINANCIAL" => Role::Financial,
            _ => Role::Other(raw),
        }
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        Role::from(raw.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
