//! Sync command implementation.
//!
//! The `depstrap sync` command runs the bootstrap: it loads the manifest
//! and recorded state, fetches what is out of date, and reports a
//! success/failure summary. This is also the default command.

use crate::cli::args::SyncArgs;
use crate::error::{DepstrapError, Result};
use crate::manifest::load_manifest;
use crate::runner::{SyncOptions, SyncRunner};
use crate::state::StateStore;
use crate::ui::{Output, Theme};
use crate::workspace::Workspace;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The sync command implementation.
pub struct SyncCommand {
    context: CommandContext,
    args: SyncArgs,
}

impl SyncCommand {
    /// Create a new sync command.
    pub fn new(context: CommandContext, args: SyncArgs) -> Self {
        Self { context, args }
    }
}

impl Command for SyncCommand {
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
        output.println(&format!(
            "Bootstrapping {} dependencies...",
            theme.highlight.apply_to(manifest.dependencies.len())
        ));

        let workspace = Workspace::new(&self.context.project_root);
        let state = StateStore::load(&self.context.state_path);
        let options = SyncOptions {
            only: self.args.only.clone(),
            skip: self.args.skip.clone(),
            force: self.args.force.clone(),
            dry_run: self.args.dry_run,
        };

        let mut runner = SyncRunner::new(workspace, state, options, output);
        let summary = runner.run(&manifest)?;

        output.println("");
        output.println(&format!("{}", theme.key.apply_to("Summary:")));
        output.println(&format!("  Successful: {}", summary.succeeded));

        if !summary.all_ok() {
            output.println(&format!("  Failed: {}", summary.failed));
            return Ok(CommandResult::failure(1));
        }

        output.println(&theme.format_success("Done!"));
        Ok(CommandResult::success())
    }
}
