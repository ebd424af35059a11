//! Angular workspace handling
//!
//! Loads the project registry (`angular.json`) and the path mapping
//! (`tsconfig.json`) of a workspace and edits them: linking a library to its
//! sources or its build output, declaring peer dependencies between
//! libraries, and removing libraries.
//!
//! Documents that get written back are kept as JSON objects so unknown
//! fields and key order survive a round trip. Every path is resolved against
//! the workspace root held by [`Workspace`].

use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::defaults::{
    ANGULAR_JSON, LIBRARY_PROJECT_TYPE, MIN_CLI_VERSION, NG_PACKAGE_JSON, PACKAGE_JSON,
    TSCONFIG_JSON,
};
use crate::core::builder::{BuildUnit, UnitCatalog};
use crate::error::{FilesystemError, WorkspaceError};
use crate::infra::filesystem::{find_upward, normalize_path, read_json, remove_dir_all, write_json};

/// npm package name, optionally scoped
const LIBRARY_NAME_PATTERN: &str = r"^(?:@[a-z0-9~-][a-z0-9._~-]*/)?[a-z0-9~-][a-z0-9._~-]*$";

/// Where a library's path mapping points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    /// The library's entry file in its sources
    Source,
    /// The library's build output
    Dist,
}

/// A project entry of angular.json
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AngularProject {
    /// Project root, relative to the workspace root
    pub root: String,

    #[serde(default)]
    pub source_root: Option<String>,

    /// `application` or `library`
    #[serde(default)]
    pub project_type: Option<String>,

    #[serde(default)]
    pub prefix: Option<String>,

    /// Builder targets
    #[serde(default)]
    pub architect: Value,
}

impl AngularProject {
    /// Whether this is a library project
    pub fn is_library(&self) -> bool {
        self.project_type.as_deref() == Some(LIBRARY_PROJECT_TYPE)
    }

    /// Path of the ng-packagr config from the build target options
    pub fn ng_package_path(&self) -> Option<&str> {
        self.architect
            .pointer("/build/options/project")
            .and_then(Value::as_str)
    }
}

/// ng-package.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NgPackage {
    /// Build output directory, relative to the library root
    #[serde(default)]
    pub dest: Option<String>,

    #[serde(default)]
    pub lib: NgPackageLib,
}

/// `lib` section of ng-package.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NgPackageLib {
    /// Public API file, relative to the library root
    #[serde(default)]
    pub entry_file: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CliPackage {
    #[serde(default)]
    version: Option<String>,
}

/// A loaded Angular workspace
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    angular: Map<String, Value>,
    projects: IndexMap<String, AngularProject>,
    tsconfig: Map<String, Value>,
}

impl Workspace {
    /// Find and validate the workspace containing `start`
    ///
    /// Looks for angular.json in `start` and its parents, then requires a
    /// locally installed @angular/cli of a supported version.
    pub fn discover(start: &Path) -> Result<Self, WorkspaceError> {
        let angular_path =
            find_upward(ANGULAR_JSON, start).ok_or_else(|| WorkspaceError::NotFound {
                start: start.to_path_buf(),
            })?;
        let root = angular_path
            .parent()
            .map_or_else(|| start.to_path_buf(), Path::to_path_buf);

        check_cli_version(&root)?;
        Self::load(&root)
    }

    /// Load the workspace rooted at `root` without validating the CLI
    pub fn load(root: &Path) -> Result<Self, WorkspaceError> {
        let angular: Map<String, Value> = read_json(&root.join(ANGULAR_JSON))?;
        let tsconfig: Map<String, Value> = read_json(&root.join(TSCONFIG_JSON))?;
        let projects = parse_projects(&root.join(ANGULAR_JSON), &angular)?;
        tracing::debug!(
            "Loaded workspace {} with {} projects",
            root.display(),
            projects.len()
        );

        Ok(Self {
            root: root.to_path_buf(),
            angular,
            projects,
            tsconfig,
        })
    }

    /// Re-read angular.json, e.g. after the CLI generated a project
    pub fn reload(&mut self) -> Result<(), WorkspaceError> {
        let path = self.root.join(ANGULAR_JSON);
        self.angular = read_json(&path)?;
        self.projects = parse_projects(&path, &self.angular)?;
        Ok(())
    }

    /// Workspace root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Library projects in angular.json order
    pub fn libraries(&self) -> impl Iterator<Item = (&str, &AngularProject)> {
        self.projects
            .iter()
            .filter(|(_, project)| project.is_library())
            .map(|(name, project)| (name.as_str(), project))
    }

    /// Look up a library project
    pub fn library(&self, name: &str) -> Result<&AngularProject, WorkspaceError> {
        self.projects
            .get(name)
            .filter(|project| project.is_library())
            .ok_or_else(|| WorkspaceError::UnknownLibrary {
                name: name.to_string(),
            })
    }

    /// Read a library's ng-package.json
    pub fn ng_package(&self, name: &str) -> Result<NgPackage, WorkspaceError> {
        let lib = self.library(name)?;
        let path = lib.ng_package_path().map_or_else(
            || Path::new(&lib.root).join(NG_PACKAGE_JSON),
            PathBuf::from,
        );
        Ok(read_json(&self.root.join(path))?)
    }

    /// Read a library's package.json
    pub fn package_json(&self, name: &str) -> Result<Map<String, Value>, WorkspaceError> {
        Ok(read_json(&self.package_json_path(name)?)?)
    }

    /// Peer dependency names declared by a library, in file order
    pub fn peer_dependencies(&self, name: &str) -> Result<Vec<String>, WorkspaceError> {
        let package = self.package_json(name)?;
        Ok(package
            .get("peerDependencies")
            .and_then(Value::as_object)
            .map(|deps| deps.keys().cloned().collect())
            .unwrap_or_default())
    }

    /// Entry file of a library without its extension
    ///
    /// `projects/a` + `src/public_api.ts` gives `projects/a/src/public_api`.
    pub fn entry_file(&self, name: &str) -> Result<String, WorkspaceError> {
        let lib = self.library(name)?;
        let entry = self
            .ng_package(name)?
            .lib
            .entry_file
            .ok_or_else(|| self.missing_ng_package_field(lib, "lib.entryFile"))?;

        let entry = format!("{}/{}", lib.root, entry);
        let stripped = Path::new(&entry)
            .extension()
            .map(|ext| entry[..entry.len() - ext.len() - 1].to_string());
        Ok(stripped.unwrap_or(entry))
    }

    /// Build output directory of a library, relative to the workspace root
    pub fn dist_path(&self, name: &str) -> Result<String, WorkspaceError> {
        let lib = self.library(name)?;
        let dest = self
            .ng_package(name)?
            .dest
            .ok_or_else(|| self.missing_ng_package_field(lib, "dest"))?;
        Ok(normalize_path(&Path::new(&lib.root).join(dest)))
    }

    /// Current path mapping for `key` in tsconfig.json
    pub fn path_mapping(&self, key: &str) -> Option<Vec<String>> {
        self.tsconfig
            .get("compilerOptions")?
            .get("paths")?
            .get(key)?
            .as_array()
            .map(|targets| {
                targets
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
    }

    /// Point a library's path mapping at its sources or build output
    pub fn link(&mut self, name: &str, mode: LinkMode) -> Result<(), WorkspaceError> {
        self.apply_link(name, mode)?;
        self.save_tsconfig()
    }

    /// Link every library, saving tsconfig.json once
    pub fn link_all(&mut self, mode: LinkMode) -> Result<usize, WorkspaceError> {
        let names: Vec<String> = self.libraries().map(|(name, _)| name.to_string()).collect();
        for name in &names {
            self.apply_link(name, mode)?;
        }
        self.save_tsconfig()?;
        Ok(names.len())
    }

    /// Declare `dependency` as a peer dependency of `target`
    ///
    /// The requirement is a caret range on the dependency's current version.
    /// Returns the requirement written.
    pub fn add_peer_dependency(
        &self,
        target: &str,
        dependency: &str,
    ) -> Result<String, WorkspaceError> {
        self.library(target)?;
        self.library(dependency)?;

        let dep_path = self.package_json_path(dependency)?;
        let dep_package: Map<String, Value> = read_json(&dep_path)?;
        let version = dep_package
            .get("version")
            .and_then(Value::as_str)
            .ok_or_else(|| WorkspaceError::MissingField {
                path: dep_path.clone(),
                field: "version".to_string(),
            })?;
        let requirement = format!("^{version}");

        let target_path = self.package_json_path(target)?;
        let mut target_package: Map<String, Value> = read_json(&target_path)?;
        object_entry(&mut target_package, "peerDependencies")
            .insert(dependency.to_string(), Value::String(requirement.clone()));
        write_json(&target_path, &target_package)?;

        tracing::info!("{target} peer dependency {dependency}@{requirement}");
        Ok(requirement)
    }

    /// Remove a library from the workspace and delete its directory
    pub fn remove_library(&mut self, name: &str) -> Result<(), WorkspaceError> {
        let lib_root = self.library(name)?.root.clone();
        if !is_inside_workspace(&lib_root) {
            return Err(WorkspaceError::UnsafeLibraryRoot {
                name: name.to_string(),
                root: lib_root,
            });
        }
        let normalized = normalize_path(Path::new(&lib_root));

        object_entry(&mut self.angular, "projects").shift_remove(name);
        self.projects.shift_remove(name);
        write_json(&self.root.join(ANGULAR_JSON), &self.angular)?;

        let paths = self.paths_mut();
        paths.shift_remove(name);
        paths.shift_remove(&format!("{name}/*"));
        self.save_tsconfig()?;

        remove_dir_all(&self.root.join(&normalized))?;
        tracing::info!("Removed library {name} ({normalized})");
        Ok(())
    }

    fn apply_link(&mut self, name: &str, mode: LinkMode) -> Result<(), WorkspaceError> {
        let wildcard = format!("{name}/*");
        match mode {
            LinkMode::Source => {
                let entry = self.entry_file(name)?;
                let paths = self.paths_mut();
                paths.insert(name.to_string(), Value::from(vec![entry]));
                paths.shift_remove(&wildcard);
            }
            LinkMode::Dist => {
                let dest = self.dist_path(name)?;
                let paths = self.paths_mut();
                paths.insert(name.to_string(), Value::from(vec![dest.clone()]));
                paths.insert(wildcard, Value::from(vec![format!("{dest}/*")]));
            }
        }
        tracing::debug!("Linked {name} to {mode:?}");
        Ok(())
    }

    fn paths_mut(&mut self) -> &mut Map<String, Value> {
        let options = object_entry(&mut self.tsconfig, "compilerOptions");
        object_entry(options, "paths")
    }

    fn save_tsconfig(&self) -> Result<(), WorkspaceError> {
        Ok(write_json(&self.root.join(TSCONFIG_JSON), &self.tsconfig)?)
    }

    fn package_json_path(&self, name: &str) -> Result<PathBuf, WorkspaceError> {
        let lib = self.library(name)?;
        Ok(self.root.join(&lib.root).join(PACKAGE_JSON))
    }

    fn missing_ng_package_field(&self, lib: &AngularProject, field: &str) -> WorkspaceError {
        WorkspaceError::MissingField {
            path: self.root.join(&lib.root).join(NG_PACKAGE_JSON),
            field: field.to_string(),
        }
    }
}

impl UnitCatalog for Workspace {
    fn build_units(&self) -> Result<Vec<BuildUnit>, WorkspaceError> {
        self.libraries()
            .map(|(name, project)| {
                Ok(BuildUnit {
                    name: name.to_string(),
                    root: project.root.clone(),
                    dependencies: self.peer_dependencies(name)?,
                })
            })
            .collect()
    }
}

/// Reject names the Angular CLI would not accept as a library name
pub fn validate_library_name(name: &str) -> Result<(), WorkspaceError> {
    let re = Regex::new(LIBRARY_NAME_PATTERN).map_err(|_| WorkspaceError::InvalidName {
        name: name.to_string(),
    })?;
    if re.is_match(name) {
        Ok(())
    } else {
        Err(WorkspaceError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Whether a project root names a directory strictly below the workspace root
fn is_inside_workspace(root: &str) -> bool {
    let path = Path::new(root);
    let anchored = path
        .components()
        .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)));
    let normalized = normalize_path(path);
    !root.is_empty()
        && !path.is_absolute()
        && !anchored
        && normalized != "."
        && !normalized.starts_with("..")
}

fn check_cli_version(root: &Path) -> Result<(), WorkspaceError> {
    let path = root
        .join("node_modules")
        .join("@angular")
        .join("cli")
        .join(PACKAGE_JSON);
    if !path.is_file() {
        return Err(WorkspaceError::CliMissing { path });
    }

    let package: CliPackage = read_json(&path)?;
    let version = package.version.ok_or_else(|| WorkspaceError::MissingField {
        path: path.clone(),
        field: "version".to_string(),
    })?;
    let parsed = semver::Version::parse(&version).map_err(|e| WorkspaceError::InvalidVersion {
        path: path.clone(),
        version: version.clone(),
        error: e.to_string(),
    })?;
    let required =
        semver::VersionReq::parse(MIN_CLI_VERSION).map_err(|e| WorkspaceError::InvalidVersion {
            path: path.clone(),
            version: MIN_CLI_VERSION.to_string(),
            error: e.to_string(),
        })?;

    if !required.matches(&parsed) {
        return Err(WorkspaceError::CliTooOld {
            found: version,
            required: MIN_CLI_VERSION.to_string(),
        });
    }
    tracing::debug!("@angular/cli {version}");
    Ok(())
}

fn parse_projects(
    path: &Path,
    angular: &Map<String, Value>,
) -> Result<IndexMap<String, AngularProject>, WorkspaceError> {
    let Some(projects) = angular.get("projects").and_then(Value::as_object) else {
        return Ok(IndexMap::new());
    };
    projects
        .iter()
        .map(|(name, value)| {
            serde_json::from_value(value.clone())
                .map(|project| (name.clone(), project))
                .map_err(|e| {
                    WorkspaceError::from(FilesystemError::Parse {
                        path: path.to_path_buf(),
                        error: format!("project '{name}': {e}"),
                    })
                })
        })
        .collect()
}

/// Get `map[key]` as an object, replacing a missing or non-object value
fn object_entry<'m>(map: &'m mut Map<String, Value>, key: &str) -> &'m mut Map<String, Value> {
    let value = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(inner) => inner,
        _ => unreachable!("value was just replaced with an object"),
    }
}
