use std::fmt;

use crate::workflow::WorkflowError;

/// Coarse phase of a workflow, independent of its outcome type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// Observable state of one workflow.
///
/// 单个工作流的可观察状态：Idle → Validating → Submitting → Succeeded | Failed。
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState<O> {
    Idle,
    Validating,
    Submitting,
    Succeeded(O),
    Failed(WorkflowError),
}

impl<O> Default for WorkflowState<O> {
    fn default() -> Self {
        WorkflowState::Idle
    }
}

impl<O> WorkflowState<O> {
    pub fn phase(&self) -> WorkflowPhase {
        match self {
            WorkflowState::Idle => WorkflowPhase::Idle,
            WorkflowState::Validating => WorkflowPhase::Validating,
            WorkflowState::Submitting => WorkflowPhase::Submitting,
            WorkflowState::Succeeded(_) => WorkflowPhase::Succeeded,
            WorkflowState::Failed(_) => WorkflowPhase::Failed,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, WorkflowState::Succeeded(_) | WorkflowState::Failed(_))
    }

    pub fn outcome(&self) -> Option<&O> {
        match self {
            WorkflowState::Succeeded(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&WorkflowError> {
        match self {
            WorkflowState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

impl<O: fmt::Display> WorkflowState<O> {
    /// Human-readable status line for presentation.
    pub fn status_text(&self) -> String {
        match self {
            WorkflowState::Idle => String::new(),
            WorkflowState::Validating => "Validando…".to_string(),
            WorkflowState::Submitting => "Enviando…".to_string(),
            WorkflowState::Succeeded(outcome) => outcome.to_string(),
            WorkflowState::Failed(error) => format!("Erro: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_uses_outcome_display() {
        let state: WorkflowState<String> = WorkflowState::Succeeded("feito".to_string());
        assert_eq!(state.status_text(), "feito");
        assert_eq!(state.phase(), WorkflowPhase::Succeeded);
        assert!(state.is_finished());
    }

    #[test]
    fn failed_state_exposes_error() {
        let state: WorkflowState<String> = WorkflowState::Failed(WorkflowError::NotAuthenticated);
        assert_eq!(state.error(), Some(&WorkflowError::NotAuthenticated));
        assert_eq!(
            state.status_text(),
            "Erro: Conecte a carteira e autentique-se primeiro"
        );
    }
}
