//! Core plumbing shared by every stage of the pipeline
//!
//! - **config**: calens.toml discovery and merging with command-line values
//! - **error**: error types with contextual help messages
//! - **telemetry**: tracing subscriber setup

pub mod config;
pub mod error;
pub mod telemetry;
