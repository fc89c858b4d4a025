//! # Lichess Stats
//!
//! Aggregate statistics over a Lichess player's game history.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (game records, summary statistics)
//! - **fetch**: Lichess API client (profile + NDJSON game export)
//! - **calculate**: Single-pass statistics aggregation
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod fetch;
pub mod models;

pub use models::*;
