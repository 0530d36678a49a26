//! Server configuration
//!
//! Bind address, simulated build timing and shutdown behaviour. Values come
//! from environment variables, falling back to defaults.

use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to (e.g., "0.0.0.0:8080")
    pub bind_addr: String,

    /// How long a simulated build takes
    pub build_duration: Duration,

    /// Max builds running at once; further runs stay queued
    pub max_concurrent_builds: usize,

    /// Delay between a shutdown signal and the listener closing
    pub shutdown_grace: Duration,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(bind_addr: String) -> Self {
        Self {
            bind_addr,
            build_duration: Duration::from_secs(10),
            max_concurrent_builds: 4,
            shutdown_grace: Duration::ZERO,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - GANTRY_BIND_ADDR (optional, default: 0.0.0.0:8080)
    /// - GANTRY_BUILD_DURATION_MS (optional, default: 10000)
    /// - GANTRY_MAX_CONCURRENT_BUILDS (optional, default: 4)
    /// - GANTRY_SHUTDOWN_GRACE_MS (optional, default: 0)
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let bind_addr = std::env::var("GANTRY_BIND_ADDR").unwrap_or(defaults.bind_addr);

        let build_duration = env_millis("GANTRY_BUILD_DURATION_MS").unwrap_or(defaults.build_duration);

        let max_concurrent_builds = std::env::var("GANTRY_MAX_CONCURRENT_BUILDS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(defaults.max_concurrent_builds);

        let shutdown_grace = env_millis("GANTRY_SHUTDOWN_GRACE_MS").unwrap_or(defaults.shutdown_grace);

        let config = Self {
            bind_addr,
            build_duration,
            max_concurrent_builds,
            shutdown_grace,
        };
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.trim().is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.max_concurrent_builds == 0 {
            anyhow::bail!("max_concurrent_builds must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("0.0.0.0:8080".to_string())
    }
}

fn env_millis(name: &str) -> Option<Duration> {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}
