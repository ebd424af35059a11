//! Integration tests for the workspace editing commands
//!
//! `check`, `link`, `link-all`, `peer`, `delete` and `create`.

mod common;

use common::{library_project, stderr, stdout, TestProject};
use serde_json::json;

#[test]
fn test_check_reports_workspace() {
    let project = TestProject::angular();

    let output = project.run(&["check"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("3 libraries"));
}

#[test]
fn test_check_from_directory_flag() {
    let project = TestProject::angular();
    let elsewhere = TestProject::new();

    let root = project.path();
    let output = elsewhere.run(&["-C", root.to_str().unwrap(), "check"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn test_check_without_installed_cli() {
    let project = TestProject::angular();
    std::fs::remove_dir_all(project.path().join("node_modules")).unwrap();

    let output = project.run(&["check"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("npm install"));
}

#[test]
fn test_check_with_old_cli() {
    let project = TestProject::angular();
    project.set_cli_version("7.0.0");

    let output = project.run(&["check"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("7.0.0"));
}

#[test]
fn test_quiet_check_prints_nothing() {
    let project = TestProject::angular();

    let output = project.run(&["-q", "check"]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_link_to_dist_then_source() {
    let project = TestProject::angular();

    let output = project.run(&["link", "lib-a", "--mode", "dist"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let paths = &project.read_json("tsconfig.json")["compilerOptions"]["paths"];
    assert_eq!(paths["lib-a"], json!(["dist/lib-a"]));
    assert_eq!(paths["lib-a/*"], json!(["dist/lib-a/*"]));

    let output = project.run(&["link", "lib-a"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let tsconfig = project.read_json("tsconfig.json");
    let paths = tsconfig["compilerOptions"]["paths"].as_object().unwrap();
    assert_eq!(paths["lib-a"], json!(["projects/lib-a/src/public_api"]));
    assert!(!paths.contains_key("lib-a/*"));
    assert_eq!(tsconfig["compileOnSave"], json!(false));
}

#[test]
fn test_link_unknown_library() {
    let project = TestProject::angular();

    let output = project.run(&["link", "app"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown library 'app'"));
}

#[test]
fn test_link_all() {
    let project = TestProject::angular();

    let output = project.run(&["link-all", "--mode", "dest"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let paths = &project.read_json("tsconfig.json")["compilerOptions"]["paths"];
    for name in ["lib-a", "lib-b", "lib-c"] {
        assert_eq!(paths[name], json!([format!("dist/{name}")]));
    }
}

#[test]
fn test_peer_adds_caret_requirement() {
    let project = TestProject::angular();

    let output = project.run(&["peer", "lib-c", "lib-a"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let package = project.read_json("projects/lib-c/package.json");
    assert_eq!(package["peerDependencies"]["lib-a"], json!("^1.2.3"));
    assert_eq!(package["peerDependencies"]["lib-b"], json!("^0.0.1"));

    let output = project.run(&["build", "--dry-run"]);
    assert_eq!(stdout(&output), "lib-a\nlib-b\nlib-c\n");
}

#[test]
fn test_delete_library() {
    let project = TestProject::angular();
    assert!(project.run(&["link", "lib-c", "--mode", "dist"]).status.success());

    let output = project.run(&["delete", "lib-c"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert!(!project.file_exists("projects/lib-c"));
    assert!(project.file_exists("projects/lib-b"));
    let angular = project.read_json("angular.json");
    assert!(angular["projects"].get("lib-c").is_none());
    assert_eq!(angular["defaultProject"], json!("app"));
    let paths = project.read_json("tsconfig.json")["compilerOptions"]["paths"].clone();
    assert!(paths.get("lib-c").is_none());
    assert!(paths.get("lib-c/*").is_none());
}

#[test]
fn test_delete_application_is_refused() {
    let project = TestProject::angular();

    let output = project.run(&["delete", "app"]);
    assert!(!output.status.success());
    assert!(project.file_exists("angular.json"));
}

#[test]
fn test_create_rejects_invalid_name() {
    let project = TestProject::angular();

    let output = project.run(&["create", "Not A Name"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid library name"));
}

#[cfg(unix)]
#[test]
fn test_create_generates_and_links_library() {
    let project = TestProject::angular();

    // What `ng g library lib-new` leaves behind
    let mut angular = project.read_json("angular.json");
    angular["projects"]["lib-new"] = library_project("lib-new");
    project.write_json("staged/angular.json", &angular);
    let ng = project.fake_ng(
        "cp staged/angular.json angular.json\n\
         mkdir -p projects/lib-new/src\n\
         printf '{\"dest\": \"../../dist/lib-new\", \"lib\": {\"entryFile\": \"src/public-api.ts\"}}' > projects/lib-new/ng-package.json\n\
         echo CREATE projects/lib-new",
    );

    let output = project.run(&["create", "lib-new", "--ng", &ng]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(project.ng_calls(), vec!["g library lib-new"]);
    assert!(stdout(&output).contains("CREATE projects/lib-new"));

    let paths = &project.read_json("tsconfig.json")["compilerOptions"]["paths"];
    assert_eq!(paths["lib-new"], json!(["projects/lib-new/src/public-api"]));
}

#[cfg(unix)]
#[test]
fn test_create_existing_library_is_refused() {
    let project = TestProject::angular();
    let ng = project.fake_ng("exit 0");

    let output = project.run(&["create", "lib-a", "--ng", &ng]);
    assert!(!output.status.success());
    assert!(project.ng_calls().is_empty());
}
