//! HTTP server for the tournament leaderboard.
//!
//! The binary in `main.rs` wires these modules together; integration tests
//! drive [`api::create_router`] directly.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
