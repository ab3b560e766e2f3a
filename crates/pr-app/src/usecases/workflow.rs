//! Generic workflow runner.
//!
//! 通用工作流执行器：会话检查 → 本地校验 → 单次请求 → 结果归约。
//!
//! Every registry feature shares the same control flow; only the validation
//! rule, the request descriptor and the response reducer differ. Those live
//! in a [`WorkflowSpec`] implementation, the control flow lives here.

use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, info_span, warn, Instrument};

use pr_core::ports::{ApiRequest, RegistryTransportPort};
use pr_core::{OverlapPolicy, WorkflowError, WorkflowState};

use crate::session::SessionStore;

/// Data-only description of one registry workflow.
pub trait WorkflowSpec: Send + Sync + 'static {
    /// Raw user input, as typed.
    type Input: Send + 'static;
    /// Validated call parameters.
    type Call: Send + 'static;
    /// Typed success result; its `Display` is the summary shown to the user.
    type Outcome: Clone + fmt::Display + DeserializeOwned + Send + Sync + 'static;

    /// Name used in spans and log fields.
    const NAME: &'static str;

    /// Local validation. The error string is the user-facing message.
    fn validate(input: Self::Input) -> Result<Self::Call, String>;

    /// Request descriptor for a validated call. The bearer is attached by the runner.
    fn request(call: Self::Call) -> ApiRequest;

    /// Maps a 2xx response body to the outcome.
    fn reduce(response: Value) -> Result<Self::Outcome, String> {
        serde_json::from_value(response).map_err(|err| err.to_string())
    }
}

/// One observable instance of a workflow.
///
/// Runs are re-entrant: calling [`Workflow::run`] while a previous run is in
/// flight starts a second, overlapping request. Which run decides the
/// displayed state is governed by the [`OverlapPolicy`].
pub struct Workflow<S: WorkflowSpec> {
    transport: Arc<dyn RegistryTransportPort>,
    session: Arc<SessionStore>,
    policy: OverlapPolicy,
    state: watch::Sender<WorkflowState<S::Outcome>>,
    latest_run: AtomicU64,
    _spec: PhantomData<fn() -> S>,
}

impl<S: WorkflowSpec> Workflow<S> {
    pub fn new(transport: Arc<dyn RegistryTransportPort>, session: Arc<SessionStore>) -> Self {
        let (state, _) = watch::channel(WorkflowState::Idle);
        Self {
            transport,
            session,
            policy: OverlapPolicy::default(),
            state,
            latest_run: AtomicU64::new(0),
            _spec: PhantomData,
        }
    }

    pub fn with_overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn overlap_policy(&self) -> OverlapPolicy {
        self.policy
    }

    pub fn subscribe(&self) -> watch::Receiver<WorkflowState<S::Outcome>> {
        self.state.subscribe()
    }

    pub fn state(&self) -> WorkflowState<S::Outcome> {
        self.state.borrow().clone()
    }

    /// Runs the workflow once and returns this run's own result.
    ///
    /// The displayed state is updated at each step unless the policy marks
    /// this run as stale.
    pub async fn run(&self, input: S::Input) -> Result<S::Outcome, WorkflowError> {
        let run_id = self.latest_run.fetch_add(1, Ordering::SeqCst) + 1;
        let span = info_span!("usecase.workflow.run", workflow = S::NAME, run_id);

        async {
            let result = self.execute(run_id, input).await;
            match &result {
                Ok(outcome) => {
                    info!(summary = %outcome, "workflow succeeded");
                    self.publish(run_id, WorkflowState::Succeeded(outcome.clone()));
                }
                Err(error) => {
                    warn!(error = %error, precondition = error.is_precondition(), "workflow failed");
                    self.publish(run_id, WorkflowState::Failed(error.clone()));
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, run_id: u64, input: S::Input) -> Result<S::Outcome, WorkflowError> {
        let Some(token) = self.session.token().await else {
            return Err(WorkflowError::NotAuthenticated);
        };

        self.publish(run_id, WorkflowState::Validating);
        let call = S::validate(input).map_err(WorkflowError::Validation)?;

        self.publish(run_id, WorkflowState::Submitting);
        let request = S::request(call).with_bearer(token);
        debug!(method = %request.method, path = %request.path, "submitting request");

        let response = self.transport.send(request).await?;
        S::reduce(response).map_err(WorkflowError::InvalidResponse)
    }

    fn publish(&self, run_id: u64, next: WorkflowState<S::Outcome>) {
        if self.policy == OverlapPolicy::LatestRequestWins
            && self.latest_run.load(Ordering::SeqCst) != run_id
        {
            debug!(run_id, phase = ?next.phase(), "discarding state of superseded run");
            return;
        }
        self.state.send_replace(next);
    }
}
