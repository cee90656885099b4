//! Bootstrap orchestration.
//!
//! Walks the manifest in order, dispatching each dependency to its
//! fetcher, applying the idempotence checks, and persisting installed
//! state after every successful unit of work. Failures never abort the
//! batch: each is logged, counted, and the run moves on.

mod check;

pub use check::archive_needs_download;

use crate::archive::{self, filename_from_url, is_container};
use crate::error::{DepstrapError, Result};
use crate::fetch::{GitFetcher, HttpFetcher};
use crate::manifest::{Dependency, DependencyKind, Manifest};
use crate::state::{InstalledEntry, StateStore};
use crate::ui::{format_size, Output, Theme};
use crate::version::is_newer;
use crate::workspace::Workspace;

/// Per-run options.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Restrict processing to these names (empty = all).
    pub only: Vec<String>,

    /// Skip these names.
    pub skip: Vec<String>,

    /// Bypass the idempotence checks for these names.
    pub force: Vec<String>,

    /// Report decisions without fetching or recording.
    pub dry_run: bool,
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl SyncSummary {
    /// Whether every processed dependency succeeded.
    pub fn all_ok(&self) -> bool {
        self.failed == 0
    }
}

/// Drives one bootstrap run over a manifest.
pub struct SyncRunner<'a> {
    workspace: Workspace,
    state: StateStore,
    git: GitFetcher,
    http: HttpFetcher,
    options: SyncOptions,
    output: &'a Output,
    theme: Theme,
}

impl<'a> SyncRunner<'a> {
    /// Create a runner over a workspace and its recorded state.
    pub fn new(
        workspace: Workspace,
        state: StateStore,
        options: SyncOptions,
        output: &'a Output,
    ) -> Self {
        let git = GitFetcher::new(workspace.repos_dir());
        let http = HttpFetcher::new(output.mode().shows_progress());

        Self {
            workspace,
            state,
            git,
            http,
            options,
            output,
            theme: Theme::new(),
        }
    }

    /// Recorded state after the run (for inspection in tests).
    pub fn state(&self) -> &StateStore {
        &self.state
    }

    /// Process every dependency in manifest order.
    ///
    /// State is saved after each successful install and once more at the
    /// end as a safety net, so a crash mid-run leaves it consistent with
    /// whatever completed.
    pub fn run(&mut self, manifest: &Manifest) -> Result<SyncSummary> {
        self.workspace.ensure_layout()?;

        let mut summary = SyncSummary::default();

        for dep in &manifest.dependencies {
            if !self.selected(&dep.name) {
                self.output.detail(&format!("Skipping {} (filtered)", dep.name));
                continue;
            }

            match self.process(dep) {
                Ok(()) => summary.succeeded += 1,
                Err(e) => {
                    self.output
                        .error(&self.theme.format_error(&format!("{}: {}", dep.name, e)));
                    tracing::error!("error processing {}: {e}", dep.name);
                    summary.failed += 1;
                }
            }
        }

        if !self.options.dry_run {
            self.state.save()?;
        }

        Ok(summary)
    }

    fn selected(&self, name: &str) -> bool {
        if self.options.skip.iter().any(|s| s == name) {
            return false;
        }
        self.options.only.is_empty() || self.options.only.iter().any(|s| s == name)
    }

    fn forced(&self, name: &str) -> bool {
        self.options.force.iter().any(|f| f == name)
    }

    fn process(&mut self, dep: &Dependency) -> Result<()> {
        match &dep.kind {
            DependencyKind::Git { revision } => self.process_git(dep, revision),
            DependencyKind::Archive { user_agent } => {
                self.process_archive(dep, user_agent.as_deref())
            }
        }
    }

    fn process_git(&mut self, dep: &Dependency, revision: &str) -> Result<()> {
        let installed = self.state.installed_version(&dep.name).to_string();

        if !self.forced(&dep.name) && !is_newer(revision, &installed) {
            self.output.println(&self.theme.format_skipped(&format!(
                "Skipping {}: version {} already installed",
                dep.name, installed
            )));
            return Ok(());
        }

        if self.options.dry_run {
            self.output.println(&format!(
                "Would check out {} at revision {}",
                dep.name, revision
            ));
            return Ok(());
        }

        self.output.println(&format!(
            "Checking out {} revision {}...",
            self.theme.highlight.apply_to(&dep.name),
            revision
        ));

        let commit = self.git.sync(&dep.name, &dep.url, revision)?;

        self.state
            .record(&dep.name, InstalledEntry::git(&dep.url, &commit));
        self.state.save()?;

        self.output.println(
            &self
                .theme
                .format_success(&format!("Installed {} at {}", dep.name, commit)),
        );
        Ok(())
    }

    fn process_archive(&mut self, dep: &Dependency, user_agent: Option<&str>) -> Result<()> {
        if !self.forced(&dep.name)
            && !archive_needs_download(&dep.name, &dep.url, &self.workspace, &self.state)
        {
            self.output.println(
                &self
                    .theme
                    .format_skipped(&format!("Skipping {}: already downloaded", dep.name)),
            );
            return Ok(());
        }

        if self.options.dry_run {
            self.output
                .println(&format!("Would download {} from {}", dep.name, dep.url));
            return Ok(());
        }

        let target_dir = self.workspace.source_dir(&dep.name);
        std::fs::create_dir_all(&target_dir)?;

        let filename = filename_from_url(&dep.url);
        let container = is_container(&filename);
        let dest = if container {
            self.workspace.archives_dir().join(&filename)
        } else {
            target_dir.join(&filename)
        };

        self.output.println(&format!(
            "Downloading {}...",
            self.theme.highlight.apply_to(&dep.name)
        ));

        let Some(downloaded) = self.http.download(&dep.url, &dest, user_agent) else {
            return Err(DepstrapError::DownloadFailed {
                name: dep.name.clone(),
                url: dep.url.clone(),
            });
        };

        // The container heuristic admits extensionless names; only a file
        // that really ends in .zip is extracted.
        if container && downloaded.extension().is_some_and(|ext| ext == "zip") {
            archive::extract(&downloaded, &target_dir).map_err(|e| {
                DepstrapError::ExtractionFailed {
                    name: dep.name.clone(),
                    message: format!("{e:#}"),
                }
            })?;
        }

        let size = std::fs::metadata(&downloaded)?.len();
        self.state
            .record(&dep.name, InstalledEntry::archive(&dep.url, size));
        self.state.save()?;

        self.output.println(&self.theme.format_success(&format!(
            "Installed {} ({})",
            dep.name,
            format_size(size)
        )));
        Ok(())
    }
}
