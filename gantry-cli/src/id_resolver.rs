//! ID resolver module
//!
//! Resolves run id prefixes to full ids by querying the run listing, so users
//! can type `pipeline-17292` instead of the full nanosecond stamp.

use anyhow::{Context, Result, anyhow};
use gantry_client::GantryClient;
use gantry_core::dto::run::RunSummary;

/// Resolve a run ID or prefix to a full run ID
///
/// An exact match wins. Otherwise the input must be a prefix of exactly one run.
///
/// # Errors
/// Returns an error if:
/// - No run matches the prefix
/// - Multiple runs match the prefix (ambiguous)
/// - API call fails
pub async fn resolve_run_id(client: &GantryClient, input: &str) -> Result<String> {
    let runs = client
        .list_runs()
        .await
        .context("Failed to fetch runs for ID resolution")?;

    match_run_id(&runs, input)
}

fn match_run_id(runs: &[RunSummary], input: &str) -> Result<String> {
    let needle = input.trim();
    if needle.is_empty() {
        return Err(anyhow!("Run ID cannot be empty"));
    }

    if runs.iter().any(|r| r.id == needle) {
        return Ok(needle.to_string());
    }

    let matches: Vec<&RunSummary> = runs.iter().filter(|r| r.id.starts_with(needle)).collect();

    match matches.len() {
        0 => Err(anyhow!("No run found with ID starting with '{}'", needle)),
        1 => Ok(matches[0].id.clone()),
        _ => {
            let ids: Vec<&str> = matches.iter().map(|r| r.id.as_str()).collect();
            Err(anyhow!(
                "Ambiguous prefix '{}' matches multiple runs: {}",
                needle,
                ids.join(", ")
            ))
        }
    }
}
