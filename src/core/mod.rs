//! Core business logic module
//!
//! Process execution lives in [`crate::infra`]; the orchestrator only sees
//! it through the [`builder::BuildAction`] trait.
//!
//! # Submodules
//!
//! - [`resolver`] - Dependency resolution
//! - [`builder`] - Build orchestration logic
//! - [`workspace`] - Angular workspace model and edits
//! - [`global_config`] - Global configuration management

pub mod builder;
pub mod global_config;
pub mod resolver;
pub mod workspace;
