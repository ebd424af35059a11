//! nglib - Angular workspace library helper
//!
//! This library provides the functionality behind the `nglib` command: it
//! discovers an Angular workspace, edits the path mappings and peer
//! dependencies of its libraries, and builds them in dependency order.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic: dependency resolution, build orchestration, workspace model
//! - [`infra`] - Infrastructure layer (filesystem, processes, directories)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
