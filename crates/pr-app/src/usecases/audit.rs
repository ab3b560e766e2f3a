//! Read-only audit queries.
//!
//! 只读审计查询：结果为服务端原样返回的 JSON，客户端不做解释。

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, info_span, Instrument};

use pr_core::ports::{ApiRequest, RegistryTransportPort};
use pr_core::registry::endpoints::{self, fallback};
use pr_core::workflow::validation::{non_blank, INVALID_MATRICULA, MISSING_MATRICULA};
use pr_core::WorkflowError;

use crate::session::SessionStore;

async fn bearer(session: &SessionStore) -> Result<String, WorkflowError> {
    session.token().await.ok_or(WorkflowError::NotAuthenticated)
}

/// Event history of one property (`GET /audit/{matricula}`).
pub struct FetchAuditTrail {
    transport: Arc<dyn RegistryTransportPort>,
    session: Arc<SessionStore>,
}

impl FetchAuditTrail {
    pub fn new(transport: Arc<dyn RegistryTransportPort>, session: Arc<SessionStore>) -> Self {
        Self { transport, session }
    }

    pub async fn execute(&self, matricula: &str) -> Result<Value, WorkflowError> {
        let span = info_span!("usecase.fetch_audit_trail.execute", matricula = %matricula.trim());
        async {
            let token = bearer(&self.session).await?;
            let matricula = non_blank(matricula)
                .ok_or_else(|| WorkflowError::Validation(MISSING_MATRICULA.to_string()))?;
            if endpoints::is_reserved_audit_segment(matricula) {
                return Err(WorkflowError::Validation(INVALID_MATRICULA.to_string()));
            }

            let request = ApiRequest::get(endpoints::audit_trail(matricula))
                .with_bearer(token)
                .with_fallback_error(fallback::AUDIT_TRAIL);
            let trail = self.transport.send(request).await?;

            info!("audit trail fetched");
            Ok(trail)
        }
        .instrument(span)
        .await
    }
}

/// All transfers known to the registry (`GET /audit/transfers`).
pub struct ListTransfers {
    transport: Arc<dyn RegistryTransportPort>,
    session: Arc<SessionStore>,
}

impl ListTransfers {
    pub fn new(transport: Arc<dyn RegistryTransportPort>, session: Arc<SessionStore>) -> Self {
        Self { transport, session }
    }

    pub async fn execute(&self) -> Result<Value, WorkflowError> {
        let span = info_span!("usecase.list_transfers.execute");
        async {
            let token = bearer(&self.session).await?;
            let request = ApiRequest::get(endpoints::AUDIT_TRANSFERS)
                .with_bearer(token)
                .with_fallback_error(fallback::LIST_TRANSFERS);
            let transfers = self.transport.send(request).await?;

            info!(
                count = transfers.as_array().map(Vec::len).unwrap_or_default(),
                "transfers listed"
            );
            Ok(transfers)
        }
        .instrument(span)
        .await
    }
}
