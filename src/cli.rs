use std::path::PathBuf;

use clap::Parser;
use pr_core::OverlapPolicy;

/// Process arguments. Every flag overrides the file and environment values.
#[derive(Debug, Default, Parser)]
#[command(name = "propreg")]
#[command(about = "Wallet-authenticated property registry client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Registry service base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Chain id embedded in the sign-in message
    #[arg(long)]
    pub chain_id: Option<u64>,

    /// Application origin claimed by the sign-in message
    #[arg(long)]
    pub origin: Option<String>,

    /// last-response-wins | latest-request-wins
    #[arg(long)]
    pub overlap_policy: Option<OverlapPolicy>,

    /// Per-request timeout in seconds (0 disables it)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}
