//! Core domain types
//!
//! These types represent the entities the server keeps in its registry and
//! hands out to clients.

pub mod run;
