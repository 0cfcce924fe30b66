//! CLI definitions using clap.

use clap::Parser;
use std::path::PathBuf;

/// Restaker - automated claim-and-restake across delegated staking networks
#[derive(Parser, Debug)]
#[command(name = "restaker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Networks to run; all enabled networks when omitted
    pub networks: Vec<String>,

    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Resolve operators and ping health checks without submitting transactions
    #[arg(long)]
    pub dry_run: bool,
}
