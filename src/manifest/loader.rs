//! Manifest discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DepstrapError, Result};
use crate::manifest::schema::Manifest;

/// Default manifest filename at the project root.
pub const MANIFEST_FILE: &str = "depstrap.json";

/// Default manifest location for a project root.
pub fn default_manifest_path(project_root: &Path) -> PathBuf {
    project_root.join(MANIFEST_FILE)
}

/// Load and parse a manifest.
///
/// This is the one load that may fail a whole run: a missing or malformed
/// manifest aborts before any dependency is processed.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    if !path.exists() {
        return Err(DepstrapError::ManifestNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| DepstrapError::ManifestParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_manifest_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = load_manifest(&temp.path().join("depstrap.json"));
        assert!(matches!(
            result,
            Err(DepstrapError::ManifestNotFound { .. })
        ));
    }

    #[test]
    fn malformed_manifest_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("depstrap.json");
        fs::write(&path, "{not json").unwrap();

        let result = load_manifest(&path);
        assert!(matches!(
            result,
            Err(DepstrapError::ManifestParseError { .. })
        ));
    }

    #[test]
    fn loads_well_formed_manifest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("depstrap.json");
        fs::write(
            &path,
            r#"{
                "dependencies": [
                    {"name": "glfw", "type": "git", "url": "u", "revision": "3.4"}
                ]
            }"#,
        )
        .unwrap();

        let manifest = load_manifest(&path).unwrap();
        assert_eq!(manifest.dependencies.len(), 1);
        assert_eq!(manifest.dependencies[0].name, "glfw");
    }

    #[test]
    fn empty_dependencies_key_is_allowed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("depstrap.json");
        fs::write(&path, r#"{"dependencies": []}"#).unwrap();

        let manifest = load_manifest(&path).unwrap();
        assert!(manifest.dependencies.is_empty());
    }

    #[test]
    fn default_path_joins_manifest_file() {
        let path = default_manifest_path(Path::new("/proj"));
        assert_eq!(path, PathBuf::from("/proj/depstrap.json"));
    }
}
