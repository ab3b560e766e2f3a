//! Presentation: one task per observable state machine, printing every
//! transition it sees.

use tokio::task::JoinHandle;

use pr_app::{RegistryUseCases, SiweLogin, Workflow, WorkflowSpec};

pub fn format_status(label: &str, text: &str) -> String {
    format!("[{label}] {text}")
}

pub fn spawn_workflow_renderer<S: WorkflowSpec>(
    label: &'static str,
    workflow: &Workflow<S>,
) -> JoinHandle<()> {
    let mut states = workflow.subscribe();
    tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let text = states.borrow_and_update().status_text();
            if !text.is_empty() {
                println!("{}", format_status(label, &text));
            }
        }
    })
}

pub fn spawn_auth_renderer(login: &SiweLogin) -> JoinHandle<()> {
    let mut states = login.subscribe();
    tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let text = states.borrow_and_update().status_text();
            println!("{}", format_status("auth", &text));
        }
    })
}

pub fn spawn_renderers(login: &SiweLogin, registry: &RegistryUseCases) -> Vec<JoinHandle<()>> {
    vec![
        spawn_auth_renderer(login),
        spawn_workflow_renderer("registro", &registry.register_property),
        spawn_workflow_renderer("proposta", &registry.submit_proposal),
        spawn_workflow_renderer("decisão", &registry.decide_proposal),
        spawn_workflow_renderer("transferência", &registry.initiate_transfer),
        spawn_workflow_renderer("assinatura", &registry.sign_transfer),
        spawn_workflow_renderer("pos", &registry.pos_validation),
    ]
}
