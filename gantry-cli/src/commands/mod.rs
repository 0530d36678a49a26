//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod health;
mod run;

use anyhow::Result;
use clap::{Args, Subcommand};
use gantry_client::GantryClient;
use std::time::Duration;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Trigger a new pipeline run
    Trigger {
        /// Make the simulated build fail
        #[arg(long)]
        fail: bool,

        /// Wait for the run to finish and print its logs
        #[arg(short, long)]
        wait: bool,

        #[command(flatten)]
        polling: PollArgs,
    },
    /// Show the status of a run
    Status {
        /// Run ID or unambiguous prefix
        id: String,
    },
    /// Show the logs of a finished run
    Logs {
        /// Run ID or unambiguous prefix
        id: String,
    },
    /// Wait until a run finishes
    Wait {
        /// Run ID or unambiguous prefix
        id: String,

        #[command(flatten)]
        polling: PollArgs,
    },
    /// List all runs
    List,
    /// Check server health
    Health,
}

/// Polling options shared by commands that wait on a run
#[derive(Args, Debug, Clone, Copy)]
pub struct PollArgs {
    /// Delay between status checks, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub interval_ms: u64,

    /// Give up after this many seconds
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,
}

impl PollArgs {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = GantryClient::new(&config.server_url);

    match command {
        Commands::Trigger {
            fail,
            wait,
            polling,
        } => run::trigger(&client, fail, wait.then_some(polling)).await,
        Commands::Status { id } => run::show_status(&client, &id).await,
        Commands::Logs { id } => run::show_logs(&client, &id).await,
        Commands::Wait { id, polling } => run::wait(&client, &id, polling).await,
        Commands::List => run::list(&client).await,
        Commands::Health => health::show_health(&client, config).await,
    }
}
