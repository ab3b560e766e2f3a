//! Registry use cases accessor.
//!
//! 注册表用例访问器：工作流实例是有状态的（订阅者依赖同一个实例），因此在此处
//! 长期持有；无状态的查询用例按需创建。

use std::sync::Arc;

use pr_core::ports::RegistryTransportPort;
use pr_core::OverlapPolicy;

use crate::session::SessionStore;
use crate::usecases::admin::{AssignRole, CheckHealth};
use crate::usecases::audit::{FetchAuditTrail, ListTransfers};
use crate::usecases::workflow::{Workflow, WorkflowSpec};
use crate::usecases::workflows::{
    DecideProposalSpec, InitiateTransferSpec, PosValidationSpec, RegisterPropertySpec,
    SignTransferSpec, SubmitProposalSpec,
};

/// The registry workflows of one session store, plus factories for the
/// stateless queries.
///
/// Each workflow is an independent instance; they share only the session.
pub struct RegistryUseCases {
    transport: Arc<dyn RegistryTransportPort>,
    session: Arc<SessionStore>,
    pub register_property: Arc<Workflow<RegisterPropertySpec>>,
    pub submit_proposal: Arc<Workflow<SubmitProposalSpec>>,
    pub decide_proposal: Arc<Workflow<DecideProposalSpec>>,
    pub initiate_transfer: Arc<Workflow<InitiateTransferSpec>>,
    pub sign_transfer: Arc<Workflow<SignTransferSpec>>,
    pub pos_validation: Arc<Workflow<PosValidationSpec>>,
}

impl RegistryUseCases {
    pub fn new(
        transport: Arc<dyn RegistryTransportPort>,
        session: Arc<SessionStore>,
        policy: OverlapPolicy,
    ) -> Self {
        Self {
            register_property: workflow(&transport, &session, policy),
            submit_proposal: workflow(&transport, &session, policy),
            decide_proposal: workflow(&transport, &session, policy),
            initiate_transfer: workflow(&transport, &session, policy),
            sign_transfer: workflow(&transport, &session, policy),
            pos_validation: workflow(&transport, &session, policy),
            transport,
            session,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn fetch_audit_trail(&self) -> FetchAuditTrail {
        FetchAuditTrail::new(self.transport.clone(), self.session.clone())
    }

    pub fn list_transfers(&self) -> ListTransfers {
        ListTransfers::new(self.transport.clone(), self.session.clone())
    }

    pub fn check_health(&self) -> CheckHealth {
        CheckHealth::new(self.transport.clone())
    }

    pub fn assign_role(&self) -> AssignRole {
        AssignRole::new(self.transport.clone())
    }
}

fn workflow<S: WorkflowSpec>(
    transport: &Arc<dyn RegistryTransportPort>,
    session: &Arc<SessionStore>,
    policy: OverlapPolicy,
) -> Arc<Workflow<S>> {
    Arc::new(Workflow::new(transport.clone(), session.clone()).with_overlap_policy(policy))
}
