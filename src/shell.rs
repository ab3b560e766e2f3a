//! Interactive command shell.
//!
//! 交互式命令行：每行解析为一个命令；工作流在后台任务中运行，其状态变化由
//! [`render`](crate::render) 中的渲染任务打印，因此多个请求可以同时进行。

use std::fmt::Display;
use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use pr_app::workflows::{
    DecideProposalInput, PosValidationInput, RegisterPropertyInput, SignTransferInput,
    SubmitProposalInput,
};
use pr_app::{Workflow, WorkflowSpec};
use pr_core::registry::{Decision, TransferAction};
use pr_core::WorkflowError;

use crate::bootstrap::AppRuntime;
use crate::render::{self, format_status};

const PROMPT: &str = "propreg> ";

/// One shell line, parsed with the same machinery as the process arguments.
#[derive(Debug, Parser)]
#[command(name = "propreg", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum ShellCommand {
    /// Sign in with the configured wallet
    Login,
    /// Drop the current session
    Logout,
    /// Show the signed-in wallet and role
    Whoami,
    /// Register a property
    Register {
        matricula: String,
        current_owner: String,
        #[arg(allow_hyphen_values = true)]
        latitude: String,
        #[arg(allow_hyphen_values = true)]
        longitude: String,
        #[arg(long)]
        previous_owner: Option<String>,
    },
    /// Submit a purchase proposal
    Propose {
        matricula: String,
        amount: String,
        #[arg(long)]
        fraction: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
    /// Accept or reject a proposal
    Decide {
        proposal_id: String,
        #[arg(value_parser = parse_decision)]
        decision: Decision,
    },
    /// Initiate the transfer of an accepted proposal
    Initiate { proposal_id: String },
    /// Sign or reject a pending transfer
    Sign {
        proposal_id: String,
        #[arg(value_parser = parse_transfer_action)]
        action: TransferAction,
    },
    /// Request proof-of-stake validation of a transaction
    Pos {
        tx_reference: String,
        #[arg(long)]
        force_invalid: bool,
    },
    /// Show the audit trail of a property
    Audit { matricula: String },
    /// List transfers
    Transfers,
    /// Check registry service health
    Health,
    /// Assign a role to a wallet (admin)
    AssignRole {
        wallet: String,
        role: String,
        admin_secret: String,
    },
    /// Show the current state of login and every workflow
    Status,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

fn parse_decision(raw: &str) -> Result<Decision, String> {
    Decision::parse(raw).ok_or_else(|| format!("decisão inválida: {raw} (use accept ou reject)"))
}

fn parse_transfer_action(raw: &str) -> Result<TransferAction, String> {
    TransferAction::parse(raw).ok_or_else(|| format!("ação inválida: {raw} (use sign ou reject)"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Splits a line on whitespace, keeping single- or double-quoted runs together.
pub fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err("aspas não fechadas".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

pub struct Shell {
    runtime: AppRuntime,
}

impl Shell {
    pub fn new(runtime: AppRuntime) -> Self {
        Self { runtime }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let renderers = render::spawn_renderers(&self.runtime.login, &self.runtime.registry);
        println!(
            "Registro de imóveis em {}. Digite `help` para ver os comandos.",
            self.runtime.config.api_url
        );

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("{PROMPT}");
            std::io::stdout().flush().context("Failed to flush stdout")?;

            let Some(line) = lines.next_line().await.context("Failed to read from stdin")? else {
                break;
            };
            if self.dispatch_line(&line).await == Flow::Quit {
                break;
            }
        }

        info!("shell closed");
        for renderer in renderers {
            renderer.abort();
        }
        Ok(())
    }

    pub async fn dispatch_line(&self, line: &str) -> Flow {
        let words = match split_words(line) {
            Ok(words) => words,
            Err(message) => {
                println!("{message}");
                return Flow::Continue;
            }
        };
        if words.is_empty() {
            return Flow::Continue;
        }

        match ShellLine::try_parse_from(words) {
            Ok(parsed) => self.execute(parsed.command).await,
            Err(err) => {
                // Covers `help` and `--help` as well as real parse errors.
                println!("{}", err.render());
                Flow::Continue
            }
        }
    }

    async fn execute(&self, command: ShellCommand) -> Flow {
        debug!(?command, "shell command");
        let registry = &self.runtime.registry;

        match command {
            ShellCommand::Login => {
                let login = self.runtime.login.clone();
                tokio::spawn(async move {
                    if let Ok(session) = login.login().await {
                        debug!(wallet = %session.wallet_address, "login finished");
                    }
                });
            }
            ShellCommand::Logout => {
                let login = self.runtime.login.clone();
                tokio::spawn(async move { login.logout().await });
            }
            ShellCommand::Whoami => match self.runtime.session.current().await {
                Some(session) => println!("{} ({})", session.wallet_address, session.role),
                None => println!("Nenhuma sessão ativa"),
            },
            ShellCommand::Register {
                matricula,
                current_owner,
                latitude,
                longitude,
                previous_owner,
            } => spawn_run(
                &registry.register_property,
                RegisterPropertyInput {
                    matricula,
                    previous_owner,
                    current_owner,
                    latitude,
                    longitude,
                },
            ),
            ShellCommand::Propose {
                matricula,
                amount,
                fraction,
                message,
            } => spawn_run(
                &registry.submit_proposal,
                SubmitProposalInput {
                    matricula,
                    amount,
                    fraction,
                    message,
                },
            ),
            ShellCommand::Decide {
                proposal_id,
                decision,
            } => spawn_run(
                &registry.decide_proposal,
                DecideProposalInput {
                    proposal_id,
                    decision,
                },
            ),
            ShellCommand::Initiate { proposal_id } => {
                spawn_run(&registry.initiate_transfer, proposal_id)
            }
            ShellCommand::Sign {
                proposal_id,
                action,
            } => spawn_run(
                &registry.sign_transfer,
                SignTransferInput {
                    proposal_id,
                    action,
                },
            ),
            ShellCommand::Pos {
                tx_reference,
                force_invalid,
            } => spawn_run(
                &registry.pos_validation,
                PosValidationInput {
                    tx_reference,
                    force_invalid,
                },
            ),
            ShellCommand::Audit { matricula } => {
                let query = registry.fetch_audit_trail();
                tokio::spawn(async move {
                    print_json("auditoria", query.execute(&matricula).await);
                });
            }
            ShellCommand::Transfers => {
                let query = registry.list_transfers();
                tokio::spawn(async move {
                    print_json("transferências", query.execute().await);
                });
            }
            ShellCommand::Health => {
                let query = registry.check_health();
                tokio::spawn(async move {
                    let result = query.execute().await.map(|health| health.status);
                    print_outcome("health", result);
                });
            }
            ShellCommand::AssignRole {
                wallet,
                role,
                admin_secret,
            } => {
                let command = registry.assign_role();
                tokio::spawn(async move {
                    let result = command
                        .execute(&wallet, &role, &admin_secret)
                        .await
                        .map(|assignment| format!("{} agora é {}", assignment.wallet, assignment.role));
                    print_outcome("admin", result);
                });
            }
            ShellCommand::Status => self.print_status(),
            ShellCommand::Quit => return Flow::Quit,
        }

        Flow::Continue
    }

    fn print_status(&self) {
        let registry = &self.runtime.registry;
        println!("{}", format_status("auth", &self.runtime.login.state().status_text()));
        print_workflow_status("registro", &registry.register_property);
        print_workflow_status("proposta", &registry.submit_proposal);
        print_workflow_status("decisão", &registry.decide_proposal);
        print_workflow_status("transferência", &registry.initiate_transfer);
        print_workflow_status("assinatura", &registry.sign_transfer);
        print_workflow_status("pos", &registry.pos_validation);
    }
}

/// Starts a run in the background; the renderer reports its progress.
fn spawn_run<S: WorkflowSpec>(workflow: &Arc<Workflow<S>>, input: S::Input) {
    let workflow = workflow.clone();
    tokio::spawn(async move {
        let _ = workflow.run(input).await;
    });
}

fn print_workflow_status<S: WorkflowSpec>(label: &str, workflow: &Workflow<S>) {
    let text = workflow.state().status_text();
    let text = if text.is_empty() { "-".to_string() } else { text };
    println!("{}", format_status(label, &text));
}

fn print_outcome<T: Display>(label: &str, result: Result<T, WorkflowError>) {
    match result {
        Ok(value) => println!("{}", format_status(label, &value.to_string())),
        Err(error) => println!("{}", format_status(label, &format!("Erro: {error}"))),
    }
}

fn print_json(label: &str, result: Result<Value, WorkflowError>) {
    let result = result.map(|value| serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()));
    print_outcome(label, result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pr_core::config::AppConfig;
    use pr_core::WorkflowPhase;
    use std::time::Duration;

    fn parse(line: &str) -> Result<ShellCommand, clap::Error> {
        let words = split_words(line).unwrap();
        ShellLine::try_parse_from(words).map(|parsed| parsed.command)
    }

    #[test]
    fn split_words_keeps_quoted_runs_together() {
        let words = split_words(r#"propose M-1 1000 --message "olá, tudo bem?" 'x y'"#).unwrap();
        assert_eq!(
            words,
            vec!["propose", "M-1", "1000", "--message", "olá, tudo bem?", "x y"]
        );
    }

    #[test]
    fn split_words_keeps_empty_quoted_word() {
        assert_eq!(split_words(r#"audit """#).unwrap(), vec!["audit", ""]);
        assert!(split_words("   ").unwrap().is_empty());
    }

    #[test]
    fn split_words_rejects_unterminated_quote() {
        assert!(split_words(r#"propose M-1 "sem fim"#).is_err());
    }

    #[test]
    fn register_accepts_negative_coordinates() {
        let command = parse("register M-1 0xOwner -23.55 -46.63 --previous-owner 0xPrev").unwrap();
        assert_eq!(
            command,
            ShellCommand::Register {
                matricula: "M-1".into(),
                current_owner: "0xOwner".into(),
                latitude: "-23.55".into(),
                longitude: "-46.63".into(),
                previous_owner: Some("0xPrev".into()),
            }
        );
    }

    #[test]
    fn decide_and_sign_parse_their_actions_case_insensitively() {
        assert_eq!(
            parse("decide 3 ACCEPT").unwrap(),
            ShellCommand::Decide {
                proposal_id: "3".into(),
                decision: Decision::Accept
            }
        );
        assert_eq!(
            parse("sign 5 reject").unwrap(),
            ShellCommand::Sign {
                proposal_id: "5".into(),
                action: TransferAction::Reject
            }
        );
        assert!(parse("decide 3 maybe").is_err());
    }

    #[test]
    fn pos_flag_and_exit_alias() {
        assert_eq!(
            parse("pos tx-1 --force-invalid").unwrap(),
            ShellCommand::Pos {
                tx_reference: "tx-1".into(),
                force_invalid: true
            }
        );
        assert_eq!(parse("exit").unwrap(), ShellCommand::Quit);
        assert_eq!(parse("assign-role 0xA USER s3cret").unwrap(), ShellCommand::AssignRole {
            wallet: "0xA".into(),
            role: "USER".into(),
            admin_secret: "s3cret".into(),
        });
    }

    fn shell() -> Shell {
        let runtime = crate::bootstrap::wire(AppConfig::default()).unwrap();
        Shell::new(runtime)
    }

    #[tokio::test]
    async fn quit_ends_the_loop_and_errors_do_not() {
        let shell = shell();
        assert_eq!(shell.dispatch_line("bogus").await, Flow::Continue);
        assert_eq!(shell.dispatch_line("").await, Flow::Continue);
        assert_eq!(shell.dispatch_line("quit").await, Flow::Quit);
    }

    #[tokio::test]
    async fn register_without_session_fails_in_background() {
        let shell = shell();
        let mut states = shell.runtime.registry.register_property.subscribe();

        let flow = shell
            .dispatch_line("register M-1 0xOwner 1.0 2.0")
            .await;
        assert_eq!(flow, Flow::Continue);

        tokio::time::timeout(Duration::from_secs(1), states.changed())
            .await
            .unwrap()
            .unwrap();
        let state = states.borrow().clone();
        assert_eq!(state.phase(), WorkflowPhase::Failed);
        assert_eq!(state.error(), Some(&WorkflowError::NotAuthenticated));
    }
}
