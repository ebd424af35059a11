//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod check;
pub mod create;
pub mod delete;
pub mod link;
pub mod list;
pub mod peer;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Subcommand, ValueEnum};

use crate::core::workspace::{LinkMode, Workspace};
use crate::infra::exec::NgCli;

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory the workspace search starts from
    pub start: PathBuf,
    /// Command used to invoke the Angular CLI
    pub ng_command: String,
}

impl Context {
    /// Discover and validate the workspace
    pub fn workspace(&self) -> Result<Workspace> {
        Workspace::discover(&self.start).context("Missing Angular workspace context")
    }

    /// Angular CLI runner for `workspace`
    pub fn ng(&self, workspace: &Workspace) -> Result<NgCli> {
        NgCli::new(workspace.root(), &self.ng_command)
            .with_context(|| format!("Invalid Angular CLI command '{}'", self.ng_command))
    }
}

/// Link target accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkTarget {
    /// Library entry file in its sources
    #[default]
    Source,
    /// Library build output
    #[value(alias = "dest")]
    Dist,
}

impl From<LinkTarget> for LinkMode {
    fn from(target: LinkTarget) -> Self {
        match target {
            LinkTarget::Source => LinkMode::Source,
            LinkTarget::Dist => LinkMode::Dist,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the current directory belongs to a supported Angular workspace
    Check,

    /// Generate a new library and link it to its sources
    Create {
        /// Library name
        name: String,
    },

    /// Remove a library from the workspace and delete its files
    Delete {
        /// Library name
        name: String,
    },

    /// Point a library's tsconfig path mapping at its sources or build output
    Link {
        /// Library name
        name: String,

        /// Link target
        #[arg(short, long, value_enum, default_value_t)]
        mode: LinkTarget,
    },

    /// Link every library of the workspace
    LinkAll {
        /// Link target
        #[arg(short, long, value_enum, default_value_t)]
        mode: LinkTarget,
    },

    /// Declare a library as peer dependency of another one
    Peer {
        /// Library receiving the peer dependency
        target: String,

        /// Library to depend on
        dependency: String,
    },

    /// List libraries in build order
    List,

    /// Build libraries in dependency order
    Build {
        /// Build only this library, without its dependencies
        library: Option<String>,

        /// Print the build order without building
        #[arg(long)]
        dry_run: bool,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(self, context: &Context) -> Result<()> {
        match self {
            Self::Check => check::execute(context).await,
            Self::Create { name } => create::execute(context, &name).await,
            Self::Delete { name } => delete::execute(context, &name).await,
            Self::Link { name, mode } => link::execute(context, &name, mode.into()).await,
            Self::LinkAll { mode } => link::execute_all(context, mode.into()).await,
            Self::Peer { target, dependency } => {
                peer::execute(context, &target, &dependency).await
            }
            Self::List => list::execute(context).await,
            Self::Build { library, dry_run } => {
                build::execute(context, library.as_deref(), dry_run).await
            }
        }
    }
}
