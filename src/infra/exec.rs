//! External process execution
//!
//! Runs the Angular CLI inside a workspace. The workspace root is passed to
//! every child process as its working directory; the current directory of
//! nglib itself is never changed.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use crate::config::defaults::DEFAULT_NG_COMMAND;
use crate::core::builder::BuildAction;
use crate::error::ExecError;

/// Angular CLI runner bound to a workspace root
#[derive(Debug, Clone)]
pub struct NgCli {
    /// Resolved executable
    program: PathBuf,
    /// Arguments placed before every invocation (`npx ng` -> `["ng"]`)
    base_args: Vec<String>,
    /// Working directory of every invocation
    root: PathBuf,
}

impl NgCli {
    /// Create a runner for `command` (whitespace separated) in `root`
    ///
    /// The plain `ng` command prefers the workspace-local
    /// `node_modules/.bin/ng` over the one on `PATH`.
    pub fn new(root: &Path, command: &str) -> Result<Self, ExecError> {
        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            return Err(ExecError::Spawn {
                program: command.to_string(),
                error: "empty command".to_string(),
            });
        };

        Ok(Self {
            program: resolve_program(root, program),
            base_args: parts.map(String::from).collect(),
            root: root.to_path_buf(),
        })
    }

    /// Resolved executable path
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Working directory of spawned commands
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run the CLI with `args` and return its standard output
    pub async fn run(&self, args: &[&str]) -> Result<String, ExecError> {
        let command = self.command_line(args);
        tracing::debug!("> {command}");

        let output = Command::new(&self.program)
            .args(&self.base_args)
            .args(args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ExecError::Spawn {
                program: self.program.display().to_string(),
                error: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ExecError::Failed {
                command,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::trace!("{stdout}");
        Ok(stdout)
    }

    /// `ng g library <name>`
    pub async fn generate_library(&self, name: &str) -> Result<String, ExecError> {
        self.run(&["g", "library", name]).await
    }

    fn command_line(&self, args: &[&str]) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.base_args.iter().cloned());
        parts.extend(args.iter().map(|a| (*a).to_string()));
        parts.join(" ")
    }
}

impl BuildAction for NgCli {
    fn build(&self, unit: &str) -> impl Future<Output = Result<(), ExecError>> + Send {
        async move { self.run(&["build", unit]).await.map(|_| ()) }
    }
}

fn resolve_program(root: &Path, program: &str) -> PathBuf {
    if program == DEFAULT_NG_COMMAND {
        let local = root.join("node_modules").join(".bin").join(program);
        if local.is_file() {
            return local;
        }
    }
    which::which(program).unwrap_or_else(|_| PathBuf::from(program))
}
