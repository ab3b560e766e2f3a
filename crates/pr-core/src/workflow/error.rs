use thiserror::Error;

use crate::ports::TransportError;

/// Message shown when a privileged workflow runs without a session.
pub const NOT_AUTHENTICATED: &str = "Conecte a carteira e autentique-se primeiro";

/// Workflow error types.
///
/// 工作流错误类型。`Display` 即展示给用户的文本。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// No session credential; no request was issued.
    #[error("{}", NOT_AUTHENTICATED)]
    NotAuthenticated,

    /// Local input rejected before any request.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// 2xx response missing a consumed field.
    #[error("resposta inválida do servidor: {0}")]
    InvalidResponse(String),
}

impl WorkflowError {
    /// Whether the failure was detected locally, before any network call.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            WorkflowError::NotAuthenticated | WorkflowError::Validation(_)
        )
    }
}
