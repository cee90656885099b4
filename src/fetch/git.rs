//! Git dependency fetching.
//!
//! Shells out to the git CLI for clone/fetch/checkout/rev-parse, keeping
//! one working copy per dependency under the workspace `repos/`
//! directory.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{DepstrapError, Result};

/// Fetches and pins git dependencies.
pub struct GitFetcher {
    /// Directory holding working copies, one per dependency name.
    repos_dir: PathBuf,
}

impl GitFetcher {
    /// Create a new git fetcher.
    pub fn new(repos_dir: impl Into<PathBuf>) -> Self {
        Self {
            repos_dir: repos_dir.into(),
        }
    }

    /// Get the repos directory.
    pub fn repos_dir(&self) -> &Path {
        &self.repos_dir
    }

    /// Working copy path for a dependency.
    pub fn repo_dir(&self, name: &str) -> PathBuf {
        self.repos_dir.join(name)
    }

    /// Ensure `name`'s working copy exists and sits at `revision`.
    ///
    /// Clones on first use, fetches tags, checks out the revision
    /// (falling back to its `v`-prefixed form), and returns the resolved
    /// commit hash. A failed checkout leaves the copy fetched but not
    /// updated; the next run retries from there.
    pub fn sync(&self, name: &str, url: &str, revision: &str) -> Result<String> {
        let repo_dir = self.repo_dir(name);

        if !repo_dir.exists() {
            self.clone(name, url, &repo_dir)?;
        }

        self.run(&repo_dir, &["fetch", "--tags", "origin"])?;

        if self.checkout(&repo_dir, revision).is_err() {
            let fallback = format!("v{revision}");
            if self.checkout(&repo_dir, &fallback).is_err() {
                return Err(DepstrapError::RevisionNotFound {
                    name: name.to_string(),
                    requested: revision.to_string(),
                    fallback,
                });
            }
        }

        self.head_commit(&repo_dir)
    }

    fn clone(&self, name: &str, url: &str, repo_dir: &Path) -> Result<()> {
        if let Some(parent) = repo_dir.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::info!("cloning {url} into {}", repo_dir.display());

        let output = Command::new("git")
            .args(["clone", url])
            .arg(repo_dir)
            .output()?;

        if !output.status.success() {
            return Err(DepstrapError::GitCloneFailed {
                name: name.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }

    fn checkout(&self, repo_dir: &Path, revision: &str) -> Result<()> {
        self.run(repo_dir, &["checkout", revision]).map(|_| ())
    }

    /// Full hash of the working copy's current HEAD.
    fn head_commit(&self, repo_dir: &Path) -> Result<String> {
        let stdout = self.run(repo_dir, &["rev-parse", "HEAD"])?;
        Ok(stdout.trim().to_string())
    }

    /// Run a git subcommand in a working copy, returning its stdout.
    fn run(&self, repo_dir: &Path, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(repo_dir)
            .output()?;

        if !output.status.success() {
            return Err(DepstrapError::GitCommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
