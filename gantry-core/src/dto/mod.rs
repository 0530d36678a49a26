//! Data Transfer Objects
//!
//! Request and response bodies for the Gantry HTTP API. The server produces
//! them and the client consumes them.

pub mod health;
pub mod run;
