//! Filesystem operations
//!
//! Handles file and directory operations and JSON documents.

use std::path::{Component, Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::FilesystemError;

/// Remove a directory and all its contents
pub fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}

/// Write content to a file
pub fn write_file(path: &Path, content: &str) -> Result<(), FilesystemError> {
    std::fs::write(path, content).map_err(|e| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Read content from a file
pub fn read_file(path: &Path) -> Result<String, FilesystemError> {
    std::fs::read_to_string(path).map_err(|e| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Read and deserialize a JSON document
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, FilesystemError> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|e| FilesystemError::Parse {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Serialize a JSON document with two-space indentation
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), FilesystemError> {
    let mut content =
        serde_json::to_string_pretty(value).map_err(|e| FilesystemError::WriteFile {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    content.push('\n');
    write_file(path, &content)
}

/// Find `file_name` in `start` or the closest parent directory containing it
///
/// Returns the full path of the file, or `None` when the filesystem root is
/// reached without a match or `start` does not exist.
pub fn find_upward(file_name: &str, start: &Path) -> Option<PathBuf> {
    if !start.exists() {
        return None;
    }
    start
        .ancestors()
        .map(|dir| dir.join(file_name))
        .find(|candidate| candidate.is_file())
}

/// Lexically normalize a relative path and render it with `/` separators
///
/// `.` segments are dropped and `..` segments cancel the preceding segment,
/// without touching the filesystem. Leading `..` that cannot be cancelled
/// are kept.
pub fn normalize_path(path: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.last().is_some_and(|p| p != "..") {
                    parts.pop();
                } else {
                    parts.push("..".to_string());
                }
            }
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::RootDir | Component::Prefix(_) => parts.push(String::new()),
        }
    }
    if parts.is_empty() {
        return ".".to_string();
    }
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    #[test]
    fn test_normalize_resolves_parent_segments() {
        let joined = Path::new("projects/fake").join("../../dist/fake");
        assert_eq!(normalize_path(&joined), "dist/fake");
    }

    #[test]
    fn test_normalize_keeps_leading_parent_segments() {
        assert_eq!(normalize_path(Path::new("a/../../b")), "../b");
        assert_eq!(normalize_path(Path::new("./a/./b")), "a/b");
        assert_eq!(normalize_path(Path::new("a/..")), ".");
    }

    #[test]
    fn test_find_upward_from_nested_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("angular.json"), "{}").unwrap();
        let nested = temp.path().join("projects").join("lib").join("src");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_upward("angular.json", &nested).unwrap();
        assert_eq!(found, temp.path().join("angular.json"));
    }

    #[test]
    fn test_find_upward_missing_start() {
        assert!(find_upward("angular.json", Path::new("/nonexistent/dir/xyz")).is_none());
    }

    #[test]
    fn test_write_json_uses_two_spaces_and_keeps_key_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.json");
        let doc = json!({ "zeta": 1, "alpha": { "b": true } });

        write_json(&path, &doc).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "{\n  \"zeta\": 1,\n  \"alpha\": {\n    \"b\": true\n  }\n}\n"
        );

        let back: Value = read_json(&path).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_read_json_reports_path_on_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = read_json::<Value>(&path).unwrap_err();
        assert!(matches!(err, FilesystemError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_remove_dir_all_missing_is_ok() {
        let temp = TempDir::new().unwrap();
        assert!(remove_dir_all(&temp.path().join("missing")).is_ok());
    }
}
