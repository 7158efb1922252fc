//! Command-line interface for botblitz.
//!
//! Provides commands for running a manifest, printing its summary, and
//! validating its configuration.

mod commands;
pub mod manifest;

pub use commands::{build_engine, parse_cli, run, run_with_cli, Cli, Commands};
pub use manifest::{RunManifest, RunReport};
