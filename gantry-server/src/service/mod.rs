//! Service Module
//!
//! Business logic layer for the server.
//! Services sit between the HTTP handlers and the run registry.

pub mod build;
pub mod health;
pub mod run;

// Re-export for convenience
pub use build::{BuildExecutor, BuildReport, BuildScheduler, SimulatedBuild};
pub use health as health_service;
pub use run as run_service;
