//! Configuration module
//!
//! Handles CLI configuration including the server URL.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the Gantry server
    pub server_url: String,
}
