//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{json, Map, Value};
use tempfile::TempDir;

/// Test workspace context
///
/// Creates a temporary directory holding an Angular workspace and provides
/// utilities for running nglib against it.
pub struct TestProject {
    /// Temporary directory for the test workspace
    pub dir: TempDir,
    /// Config directory handed to nglib, kept empty
    config: TempDir,
}

impl TestProject {
    /// Create an empty test directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            config: TempDir::new().expect("Failed to create config directory"),
        }
    }

    /// Workspace with an application and libraries lib-c -> lib-b -> lib-a
    ///
    /// lib-b also peer-depends on `@angular/core`, which is not part of the
    /// workspace.
    pub fn angular() -> Self {
        let project = Self::new();
        project.write_json(
            "angular.json",
            &json!({
                "$schema": "./node_modules/@angular/cli/lib/config/schema.json",
                "version": 1,
                "newProjectRoot": "projects",
                "projects": {
                    "app": { "root": "", "sourceRoot": "src", "projectType": "application", "prefix": "app", "architect": {} },
                    "lib-c": library_project("lib-c"),
                    "lib-b": library_project("lib-b"),
                    "lib-a": library_project("lib-a")
                },
                "defaultProject": "app"
            }),
        );
        project.write_json(
            "tsconfig.json",
            &json!({ "compileOnSave": false, "compilerOptions": { "baseUrl": "./", "paths": {} } }),
        );
        project.set_cli_version("7.1.4");
        project.add_library_files("lib-a", "1.2.3", &[]);
        project.add_library_files("lib-b", "0.4.0", &["lib-a", "@angular/core"]);
        project.add_library_files("lib-c", "0.1.0", &["lib-b"]);
        project
    }

    /// Get the path to the test workspace directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test workspace
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Write a JSON document into the test workspace
    pub fn write_json(&self, name: &str, value: &Value) {
        let content = serde_json::to_string_pretty(value).expect("Failed to serialize JSON");
        self.create_file(name, &content);
    }

    /// Check if a file exists in the test workspace
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test workspace
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Read a JSON document from the test workspace
    pub fn read_json(&self, name: &str) -> Value {
        serde_json::from_str(&self.read_file(name)).expect("Failed to parse JSON")
    }

    /// Install a fake @angular/cli package of the given version
    pub fn set_cli_version(&self, version: &str) {
        self.write_json(
            "node_modules/@angular/cli/package.json",
            &json!({ "name": "@angular/cli", "version": version }),
        );
    }

    /// Write the package.json and ng-package.json of a library
    pub fn add_library_files(&self, name: &str, version: &str, peers: &[&str]) {
        let peers: Map<String, Value> = peers
            .iter()
            .map(|p| ((*p).to_string(), json!("^0.0.1")))
            .collect();
        self.write_json(
            &format!("projects/{name}/package.json"),
            &json!({ "name": name, "version": version, "peerDependencies": peers }),
        );
        self.write_json(
            &format!("projects/{name}/ng-package.json"),
            &json!({ "dest": format!("../../dist/{name}"), "lib": { "entryFile": "src/public_api.ts" } }),
        );
        self.create_file(&format!("projects/{name}/src/public_api.ts"), "");
    }

    /// Write an `ng` replacement script
    ///
    /// The script appends its arguments to `ng-calls.log` in its working
    /// directory, then runs `body`. Returns the `--ng` value invoking it.
    pub fn fake_ng(&self, body: &str) -> String {
        let script = self.config.path().join("fake-ng.sh");
        let content = format!("echo \"$@\" >> ng-calls.log\n{body}\n");
        std::fs::write(&script, content).expect("Failed to write fake ng");
        format!("sh {}", script.display())
    }

    /// Arguments the fake `ng` was called with, one invocation per entry
    pub fn ng_calls(&self) -> Vec<String> {
        if !self.file_exists("ng-calls.log") {
            return Vec::new();
        }
        self.read_file("ng-calls.log")
            .lines()
            .map(String::from)
            .collect()
    }

    /// Run nglib in `dir` with an isolated config directory
    pub fn run_in(&self, dir: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_nglib"))
            .current_dir(dir)
            .env("NGLIB_CONFIG_DIR", self.config.path())
            .env_remove("NGLIB_NG")
            .env_remove("RUST_LOG")
            .args(args)
            .output()
            .expect("Failed to execute nglib")
    }

    /// Run nglib at the workspace root
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_in(self.dir.path(), args)
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// angular.json entry of a generated library
pub fn library_project(name: &str) -> Value {
    json!({
        "root": format!("projects/{name}"),
        "sourceRoot": format!("projects/{name}/src"),
        "projectType": "library",
        "prefix": "lib",
        "architect": {
            "build": {
                "builder": "@angular-devkit/build-ng-packagr:build",
                "options": {
                    "tsConfig": format!("projects/{name}/tsconfig.lib.json"),
                    "project": format!("projects/{name}/ng-package.json")
                }
            }
        }
    })
}

/// Standard output as text
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Standard error as text
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
