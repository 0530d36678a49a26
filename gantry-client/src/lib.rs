//! Gantry HTTP Client
//!
//! A small, type-safe HTTP client for the Gantry pipeline-status server.
//! The CLI is built on it, and it can be used from any tokio program.
//!
//! # Example
//!
//! ```no_run
//! use gantry_client::GantryClient;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = GantryClient::new("http://localhost:8080");
//!
//!     let triggered = client.trigger(false).await?;
//!     let run = client
//!         .wait_for_completion(&triggered.id, Duration::from_secs(1), Duration::from_secs(30))
//!         .await?;
//!
//!     println!("Run {} finished: {}", run.id, run.status);
//!     Ok(())
//! }
//! ```

pub mod error;
mod health;
mod runs;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Gantry server API
#[derive(Debug, Clone)]
pub struct GantryClient {
    /// Base URL of the server (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl GantryClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the server (e.g., "http://localhost:8080")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Error statuses carry a plain text body, which becomes the error message.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(
                status.as_u16(),
                error_text.trim_end(),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GantryClient::new("http://localhost:8080");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = GantryClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_url_joins_paths() {
        let client = GantryClient::new("http://localhost:8080/");
        assert_eq!(client.url("/status"), "http://localhost:8080/status");
        assert_eq!(client.url("runs"), "http://localhost:8080/runs");
    }

    #[test]
    fn test_client_with_custom_client() {
        let client = GantryClient::with_client("http://localhost:8080", Client::new());
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
