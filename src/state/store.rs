//! Persistent installed-state storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::state::entry::InstalledEntry;

/// On-disk mapping from dependency name to last-installed entry.
///
/// The file is read once per run and fully rewritten at every checkpoint,
/// so entries for dependencies no longer in the manifest are preserved
/// across runs. Entries are never removed automatically.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
    entries: BTreeMap<String, InstalledEntry>,
}

impl StateStore {
    /// Load recorded state, starting empty when the file is absent.
    ///
    /// A file that exists but does not parse is treated the same as an
    /// absent one: the run starts fresh and the next save rewrites it.
    /// Only a broken manifest aborts a run, never broken state.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => {
                match serde_json::from_str::<BTreeMap<String, InstalledEntry>>(&content) {
                    Ok(raw) => raw
                        .into_iter()
                        .map(|(name, entry)| (name, entry.normalized()))
                        .collect(),
                    Err(e) => {
                        tracing::warn!(
                            "ignoring unreadable state file {}: {}",
                            path.display(),
                            e
                        );
                        BTreeMap::new()
                    }
                }
            }
            Err(_) => BTreeMap::new(),
        };

        Self { path, entries }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Recorded entry for a dependency.
    pub fn get(&self, name: &str) -> Option<&InstalledEntry> {
        self.entries.get(name)
    }

    /// Recorded installed version, empty when nothing is recorded.
    pub fn installed_version(&self, name: &str) -> &str {
        self.get(name).map(|e| e.version.as_str()).unwrap_or("")
    }

    /// Insert or overwrite the entry for a dependency.
    pub fn record(&mut self, name: &str, entry: InstalledEntry) {
        self.entries.insert(name.to_string(), entry);
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether anything has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persist the full mapping using an atomic write.
    ///
    /// Write-to-temp-then-rename keeps the file whole if the process dies
    /// mid-write; a crash mid-run leaves state consistent with whatever
    /// work completed.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content =
            serde_json::to_string_pretty(&self.entries).map_err(anyhow::Error::from)?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::entry::InstalledKind;
    use tempfile::TempDir;

    #[test]
    fn load_absent_file_starts_empty() {
        let temp = TempDir::new().unwrap();
        let store = StateStore::load(temp.path().join("depstrap.state.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("depstrap.state.json");

        let mut store = StateStore::load(&path);
        store.record("glfw", InstalledEntry::git("u", "abc123"));
        store.record("fonts", InstalledEntry::archive("v", 4096));
        store.save().unwrap();

        let loaded = StateStore::load(&path);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.installed_version("glfw"), "abc123");
        assert_eq!(loaded.installed_version("fonts"), "4096");
        assert_eq!(loaded.get("fonts").unwrap().kind, InstalledKind::Archive);
    }

    #[test]
    fn save_load_save_is_stable() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("depstrap.state.json");

        let mut store = StateStore::load(&path);
        store.record("glfw", InstalledEntry::git("u", "abc123"));
        store.save().unwrap();
        let first = fs::read_to_string(&path).unwrap();

        StateStore::load(&path).save().unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn malformed_state_file_starts_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("depstrap.state.json");
        fs::write(&path, "{broken").unwrap();

        let store = StateStore::load(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn save_normalizes_legacy_entries() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("depstrap.state.json");
        fs::write(
            &path,
            r#"{"old": {"url": "u", "revision": "2.0"}}"#,
        )
        .unwrap();

        let store = StateStore::load(&path);
        assert_eq!(store.installed_version("old"), "2.0");
        store.save().unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["old"]["type"], "unknown");
        assert_eq!(json["old"]["version"], "2.0");
        assert!(json["old"].get("revision").is_none());
    }

    #[test]
    fn save_preserves_untouched_entries() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("depstrap.state.json");

        let mut store = StateStore::load(&path);
        store.record("keep", InstalledEntry::archive("u", 10));
        store.save().unwrap();

        let mut store = StateStore::load(&path);
        store.record("new", InstalledEntry::git("v", "def"));
        store.save().unwrap();

        let loaded = StateStore::load(&path);
        assert!(loaded.get("keep").is_some());
        assert!(loaded.get("new").is_some());
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("depstrap.state.json");

        let mut store = StateStore::load(&path);
        store.record("glfw", InstalledEntry::git("u", "abc"));
        store.save().unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn numeric_archive_size_survives_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("depstrap.state.json");
        fs::write(
            &path,
            r#"{"fonts": {"type": "archive", "url": "u", "version": 133742}}"#,
        )
        .unwrap();

        let store = StateStore::load(&path);
        assert_eq!(store.installed_version("fonts"), "133742");
    }
}
