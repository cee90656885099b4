//! Workspace directory layout.
//!
//! Everything depstrap fetches lands under a single project root:
//! cloned repositories in `repos/`, downloaded container files in
//! `archives/`, and per-dependency extracted or plain-file content in
//! `sources/<name>/`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem layout for bootstrapped dependencies.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create a workspace rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding git working copies, one per dependency.
    pub fn repos_dir(&self) -> PathBuf {
        self.root.join("repos")
    }

    /// Working copy of a named git dependency.
    pub fn repo_dir(&self, name: &str) -> PathBuf {
        self.repos_dir().join(name)
    }

    /// Directory holding downloaded container files.
    pub fn archives_dir(&self) -> PathBuf {
        self.root.join("archives")
    }

    /// Root of per-dependency extracted content.
    pub fn sources_dir(&self) -> PathBuf {
        self.root.join("sources")
    }

    /// Extraction (or plain-file download) target for a named dependency.
    pub fn source_dir(&self, name: &str) -> PathBuf {
        self.sources_dir().join(name)
    }

    /// Create the layout directories if they do not exist.
    pub fn ensure_layout(&self) -> io::Result<()> {
        fs::create_dir_all(self.repos_dir())?;
        fs::create_dir_all(self.archives_dir())?;
        fs::create_dir_all(self.sources_dir())?;
        Ok(())
    }
}
