//! Repository Module
//!
//! Data access layer for the server. Runs live in memory only.

pub mod run;

// Re-export for convenience
pub use run::{RepositoryError, RunRepository};
