//! Default configuration values

/// Workspace project registry
pub const ANGULAR_JSON: &str = "angular.json";

/// TypeScript config holding the `compilerOptions.paths` mapping
pub const TSCONFIG_JSON: &str = "tsconfig.json";

/// Per-library ng-packagr config
pub const NG_PACKAGE_JSON: &str = "ng-package.json";

/// Per-library npm manifest
pub const PACKAGE_JSON: &str = "package.json";

/// `projectType` of library projects in angular.json
pub const LIBRARY_PROJECT_TYPE: &str = "library";

/// Minimum supported @angular/cli version
pub const MIN_CLI_VERSION: &str = ">=7.1.2";

/// Default command used to invoke the Angular CLI
pub const DEFAULT_NG_COMMAND: &str = "ng";

/// Reserved name of the synthetic dependency graph root.
/// Not a valid npm package name, so it cannot collide with a library.
pub const ROOT_NODE: &str = "#root#";

/// Name of the global configuration file
pub const CONFIG_FILE: &str = "config.toml";
