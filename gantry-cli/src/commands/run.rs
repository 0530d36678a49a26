//! Run command handlers
//!
//! Triggering runs, following them to completion, and printing their
//! status and logs.

use anyhow::{Context, Result};
use colored::*;
use gantry_client::GantryClient;
use gantry_core::domain::run::{PipelineRun, RunStatus};
use gantry_core::dto::run::RunSummary;

use super::PollArgs;
use crate::id_resolver::resolve_run_id;

/// Trigger a run, optionally waiting for it to finish
pub async fn trigger(client: &GantryClient, fail: bool, wait: Option<PollArgs>) -> Result<()> {
    let triggered = client
        .trigger(fail)
        .await
        .context("Failed to trigger pipeline")?;

    println!(
        "{} {}",
        format!("✓ {}:", triggered.message).green(),
        triggered.id.cyan()
    );

    match wait {
        Some(polling) => follow_run(client, &triggered.id, polling).await,
        None => {
            println!(
                "{}",
                format!("  Follow it with: gantry wait {}", triggered.id).dimmed()
            );
            Ok(())
        }
    }
}

/// Show the status of a single run
pub async fn show_status(client: &GantryClient, id: &str) -> Result<()> {
    let id = resolve_run_id(client, id).await?;
    let run = client.status(&id).await?;

    print_run_details(&run);

    Ok(())
}

/// Show the logs of a successful run
pub async fn show_logs(client: &GantryClient, id: &str) -> Result<()> {
    let id = resolve_run_id(client, id).await?;
    let logs = client.logs(&id).await?;

    println!("{}", format!("Logs for run {}:", id).bold());
    println!("{}", "─".repeat(80).dimmed());
    println!("{}", logs.logs);
    println!("{}", "─".repeat(80).dimmed());

    Ok(())
}

/// Wait for a run to finish
pub async fn wait(client: &GantryClient, id: &str, polling: PollArgs) -> Result<()> {
    let id = resolve_run_id(client, id).await?;
    follow_run(client, &id, polling).await
}

/// List all runs
pub async fn list(client: &GantryClient) -> Result<()> {
    let runs = client.list_runs().await?;

    if runs.is_empty() {
        println!("{}", "No runs found.".yellow());
    } else {
        println!("{}", format!("Found {} run(s):", runs.len()).bold());
        println!();
        for run in runs {
            print_run_summary(&run);
        }
    }

    Ok(())
}

async fn follow_run(client: &GantryClient, id: &str, polling: PollArgs) -> Result<()> {
    println!(
        "{}",
        format!("Waiting for run {} (timeout {}s)...", id, polling.timeout_secs).dimmed()
    );

    let run = client
        .wait_for_completion(id, polling.interval(), polling.timeout())
        .await?;

    print_run_details(&run);

    if run.status == RunStatus::Failed {
        anyhow::bail!("Run {} failed", run.id);
    }

    Ok(())
}

/// Print a run summary line
fn print_run_summary(run: &RunSummary) {
    println!("  {} Run {}", "▸".cyan(), run.id.dimmed());
    println!("    Status:    {}", colorize_status(run.status));
    println!(
        "    Triggered: {}",
        run.triggered_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    println!();
}

/// Print detailed run information
fn print_run_details(run: &PipelineRun) {
    println!("{}", "Run Details:".bold());
    println!("  ID:          {}", run.id.cyan());
    println!("  Status:      {}", colorize_status(run.status));
    println!(
        "  Triggered:   {}",
        run.triggered_at.format("%Y-%m-%d %H:%M:%S")
    );

    if let Some(started) = run.started_at {
        println!("  Started:     {}", started.format("%Y-%m-%d %H:%M:%S"));
    }

    if let Some(completed) = run.completed_at {
        println!("  Completed:   {}", completed.format("%Y-%m-%d %H:%M:%S"));
    }

    if let Some(duration) = run.duration() {
        println!("  Duration:    {}s", duration.num_seconds());
    }

    if let Some(logs) = &run.logs {
        println!("\n{}", "Logs:".bold());
        println!("{}", logs);
    }
}

/// Colorize run status for display
fn colorize_status(status: RunStatus) -> ColoredString {
    let label = status.as_str();
    match status {
        RunStatus::Queued => label.yellow(),
        RunStatus::InProgress => label.cyan(),
        RunStatus::Success => label.green(),
        RunStatus::Failed => label.red(),
    }
}
