use serde::{Deserialize, Serialize};

use crate::auth::Role;

/// Body of `POST /admin/assign-role` (proof-of-concept admin surface).
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RoleAssignmentRequest {
    pub wallet: String,
    pub role: Role,
    pub admin_secret: String,
}

impl std::fmt::Debug for RoleAssignmentRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleAssignmentRequest")
            .field("wallet", &self.wallet)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleAssignment {
    pub wallet: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}
