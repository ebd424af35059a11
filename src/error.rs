//! Error types for nglib
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Dependency resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// Requested unit was never added to the graph
    #[error("Unit '{name}' does not exist in the dependency graph")]
    NotFound { name: String },

    /// Circular dependency detected
    #[error("Circular dependency detected: {dependent} -> {dependency}")]
    CircularDependency { dependent: String, dependency: String },
}

/// Build orchestration errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// External build action failed
    #[error("Build failed for library '{unit}': {error}")]
    BuildFailed { unit: String, error: String },

    /// Unit is not part of the workspace
    #[error("Library '{name}' is not a buildable unit of this workspace")]
    UnknownUnit { name: String },

    /// Unit name collides with the dependency graph root
    #[error("Library name '{name}' is reserved")]
    ReservedUnitName { name: String },

    /// Build order could not be computed
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    /// Unit descriptors could not be collected
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
}

/// Workspace discovery and editing errors
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// No angular.json found walking up from the start directory
    #[error("Angular workspace not found from '{start}'")]
    NotFound { start: PathBuf },

    /// Angular CLI is not installed in the workspace
    #[error("Can't get @angular/cli version: '{path}' not found. Run 'npm install' first")]
    CliMissing { path: PathBuf },

    /// Installed Angular CLI is older than supported
    #[error("@angular/cli version {found} does not satisfy {required}")]
    CliTooOld { found: String, required: String },

    /// Version string could not be parsed
    #[error("Invalid version '{version}' in '{path}': {error}")]
    InvalidVersion {
        path: PathBuf,
        version: String,
        error: String,
    },

    /// Library is not a library project of this workspace
    #[error("Unknown library '{name}'")]
    UnknownLibrary { name: String },

    /// Library name rejected before running the generator
    #[error("Invalid library name '{name}'")]
    InvalidName { name: String },

    /// Library root would resolve to the workspace root or outside of it
    #[error("Refusing to delete library '{name}' with root '{root}'")]
    UnsafeLibraryRoot { name: String, root: String },

    /// Required field missing from a config document
    #[error("'{path}' is missing required field '{field}'")]
    MissingField { path: PathBuf, field: String },

    /// Filesystem error
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// External process errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// Process could not be started
    #[error("Failed to run '{program}': {error}")]
    Spawn { program: String, error: String },

    /// Process exited unsuccessfully
    #[error("'{command}' exited with {}: {stderr}", code.map_or_else(|| "signal".to_string(), |c| format!("status {c}")))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// File content is not valid JSON for the expected shape
    #[error("Failed to parse '{path}': {error}")]
    Parse { path: PathBuf, error: String },
}
