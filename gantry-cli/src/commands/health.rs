//! Health command handler

use anyhow::{Context, Result};
use colored::*;
use gantry_client::GantryClient;

use crate::config::Config;

/// Print the server health report
pub async fn show_health(client: &GantryClient, config: &Config) -> Result<()> {
    let report = client
        .health()
        .await
        .with_context(|| format!("Server at {} is not reachable", config.server_url))?;

    let status = if report.is_healthy() {
        report.status.green()
    } else {
        report.status.red()
    };

    println!("{}", "Server Health:".bold());
    println!("  Status:   {}", status);
    println!("  Service:  {} {}", report.service, report.version.dimmed());
    println!("  Uptime:   {}s", report.uptime_seconds);
    println!(
        "  Runs:     {} queued, {} in progress, {} succeeded, {} failed",
        report.runs.queued.to_string().yellow(),
        report.runs.in_progress.to_string().cyan(),
        report.runs.success.to_string().green(),
        report.runs.failed.to_string().red()
    );

    Ok(())
}
