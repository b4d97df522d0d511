//! CLI module
//!
//! Currently a single subcommand: `serve`, which runs the HTTP API.

pub mod serve;

use clap::{Parser, Subcommand};

/// quotagate - admission-control gatekeeper with daily request quotas
#[derive(Parser)]
#[command(name = "quotagate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
