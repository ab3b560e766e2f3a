//! Unauthenticated service calls: health probe and role assignment.
//!
//! Role assignment is authorized by a shared admin secret carried in the
//! body, not by the session.

use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use pr_core::auth::Role;
use pr_core::ports::{ApiRequest, RegistryTransportPort};
use pr_core::registry::endpoints::{self, fallback};
use pr_core::registry::{HealthStatus, RoleAssignment, RoleAssignmentRequest};
use pr_core::workflow::validation::{non_blank, INVALID_ROLE, MISSING_ADMIN_SECRET, MISSING_WALLET};
use pr_core::WorkflowError;

/// `GET /health`
pub struct CheckHealth {
    transport: Arc<dyn RegistryTransportPort>,
}

impl CheckHealth {
    pub fn new(transport: Arc<dyn RegistryTransportPort>) -> Self {
        Self { transport }
    }

    pub async fn execute(&self) -> Result<HealthStatus, WorkflowError> {
        let request = ApiRequest::get(endpoints::HEALTH).with_fallback_error(fallback::HEALTH);
        let response = self
            .transport
            .send(request)
            .instrument(info_span!("usecase.check_health.execute"))
            .await?;
        let health: HealthStatus = serde_json::from_value(response)
            .map_err(|err| WorkflowError::InvalidResponse(err.to_string()))?;

        if !health.is_ok() {
            warn!(status = %health.status, "registry reports degraded health");
        }
        Ok(health)
    }
}

/// `POST /admin/assign-role`
pub struct AssignRole {
    transport: Arc<dyn RegistryTransportPort>,
}

impl AssignRole {
    pub fn new(transport: Arc<dyn RegistryTransportPort>) -> Self {
        Self { transport }
    }

    /// Assigns one of `USER`, `REGULATOR` or `FINANCIAL` to a wallet.
    pub async fn execute(
        &self,
        wallet: &str,
        role: &str,
        admin_secret: &str,
    ) -> Result<RoleAssignment, WorkflowError> {
        let body = Self::validate(wallet, role, admin_secret).map_err(WorkflowError::Validation)?;

        let span = info_span!("usecase.assign_role.execute", wallet = %body.wallet, role = %body.role);
        async {
            let request = ApiRequest::post(endpoints::ADMIN_ASSIGN_ROLE)
                .with_json(serde_json::json!(body))
                .with_fallback_error(fallback::ASSIGN_ROLE);
            let response = self.transport.send(request).await?;
            let assignment: RoleAssignment = serde_json::from_value(response)
                .map_err(|err| WorkflowError::InvalidResponse(err.to_string()))?;

            info!("role assigned");
            Ok(assignment)
        }
        .instrument(span)
        .await
    }

    fn validate(wallet: &str, role: &str, admin_secret: &str) -> Result<RoleAssignmentRequest, String> {
        let wallet = non_blank(wallet).ok_or(MISSING_WALLET)?;
        let role = Role::parse_assignable(role).ok_or(INVALID_ROLE)?;
        let admin_secret = non_blank(admin_secret).ok_or(MISSING_ADMIN_SECRET)?;
        Ok(RoleAssignmentRequest {
            wallet: wallet.to_string(),
            role,
            admin_secret: admin_secret.to_string(),
        })
    }
}
