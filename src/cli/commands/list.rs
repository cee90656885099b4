//! List command implementation.
//!
//! The `depstrap list` command prints the manifest's dependencies.

use crate::cli::args::ListArgs;
use crate::error::{DepstrapError, Result};
use crate::manifest::{load_manifest, DependencyKind};
use crate::ui::{Output, Theme};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    context: CommandContext,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(context: CommandContext, args: ListArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand {
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
        output.println(&format!("{}", theme.key.apply_to("Dependencies:")));

        for dep in &manifest.dependencies {
            let detail = match &dep.kind {
                DependencyKind::Git { revision } => {
                    format!(" {}", theme.dim.apply_to(format!("@ {}", revision)))
                }
                DependencyKind::Archive { .. } => String::new(),
            };
            output.println(&format!(
                "  {} [{}]{}",
                theme.highlight.apply_to(&dep.name),
                dep.kind_name(),
                detail
            ));

            if self.args.urls {
                output.println(&format!("      {}", theme.dim.apply_to(&dep.url)));
            }
        }

        if manifest.dependencies.is_empty() {
            output.println(&format!("  {}", theme.dim.apply_to("(none)")));
        }

        Ok(CommandResult::success())
    }
}
