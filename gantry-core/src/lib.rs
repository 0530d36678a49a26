//! Gantry Core
//!
//! Core types shared by the Gantry pipeline-status server, client and CLI.
//!
//! This crate contains:
//! - Domain types: pipeline runs and their status lifecycle
//! - DTOs: request and response bodies exchanged over HTTP

pub mod domain;
pub mod dto;
