//! Status command implementation.
//!
//! The `depstrap status` command reports installed state against the
//! manifest without fetching anything.

use crate::cli::args::StatusArgs;
use crate::error::{DepstrapError, Result};
use crate::manifest::{load_manifest, Dependency, DependencyKind};
use crate::runner::archive_needs_download;
use crate::state::StateStore;
use crate::ui::{Output, Theme};
use crate::version::is_newer;
use crate::workspace::Workspace;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The status command implementation.
pub struct StatusCommand {
    context: CommandContext,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(context: CommandContext, args: StatusArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &StatusArgs {
        &self.args
    }

    fn dependency_status(
        &self,
        dep: &Dependency,
        workspace: &Workspace,
        state: &StateStore,
    ) -> &'static str {
        match &dep.kind {
            DependencyKind::Git { revision } => {
                let installed = state.installed_version(&dep.name);
                if installed.is_empty() {
                    "not installed"
                } else if is_newer(revision, installed) {
                    "update available"
                } else {
                    "installed"
                }
            }
            DependencyKind::Archive { .. } => {
                if archive_needs_download(&dep.name, &dep.url, workspace, state) {
                    "needs download"
                } else {
                    "installed"
                }
            }
        }
    }
}

impl Command for StatusCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let manifest = match load_manifest(&self.context.manifest_path) {
            Ok(m) => m,
            Err(DepstrapError::ManifestNotFound { path }) => {
                output.error(&format!(
                    "No manifest found at {}. Run 'depstrap init' first.",
                    path.display()
                ));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let theme = Theme::new();
        let workspace = Workspace::new(&self.context.project_root);
        let state = StateStore::load(&self.context.state_path);

        output.println(&format!("{}", theme.key.apply_to("Dependencies:")));

        for dep in &manifest.dependencies {
            let status = self.dependency_status(dep, &workspace, &state);
            let recorded = state.installed_version(&dep.name);

            let line = if recorded.is_empty() {
                format!(
                    "  {} [{}] {}",
                    theme.highlight.apply_to(&dep.name),
                    dep.kind_name(),
                    theme.dim.apply_to(status)
                )
            } else {
                format!(
                    "  {} [{}] {} {}",
                    theme.highlight.apply_to(&dep.name),
                    dep.kind_name(),
                    theme.dim.apply_to(status),
                    theme.dim.apply_to(format!("({})", short_version(recorded)))
                )
            };
            output.println(&line);
        }

        Ok(CommandResult::success())
    }
}

/// Truncate long recorded versions (commit hashes) for display.
fn short_version(version: &str) -> &str {
    if version.len() > 12 && version.chars().all(|c| c.is_ascii_hexdigit()) {
        &version[..12]
    } else {
        version
    }
}
