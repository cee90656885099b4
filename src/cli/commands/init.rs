//! Init command implementation.
//!
//! The `depstrap init` command writes a starter manifest at the project
//! root.

use std::fs;

use dialoguer::Confirm;

use crate::cli::args::InitArgs;
use crate::error::Result;
use crate::ui::{Output, Theme};

use super::dispatcher::{Command, CommandContext, CommandResult};

const STARTER_MANIFEST: &str = r#"{
    "dependencies": [
        {
            "name": "glfw",
            "type": "git",
            "url": "https://github.com/glfw/glfw.git",
            "revision": "3.4"
        }
    ]
}
"#;

/// The init command implementation.
pub struct InitCommand {
    context: CommandContext,
    args: InitArgs,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(context: CommandContext, args: InitArgs) -> Self {
        Self { context, args }
    }
}

impl Command for InitCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let path = &self.context.manifest_path;
        let theme = Theme::new();

        if path.exists() && !self.args.force {
            if !console::user_attended() {
                output.error(&format!(
                    "Manifest already exists at {}. Use --force to overwrite.",
                    path.display()
                ));
                return Ok(CommandResult::failure(1));
            }

            let overwrite = Confirm::new()
                .with_prompt(format!("Overwrite existing {}?", path.display()))
                .default(false)
                .interact()
                .map_err(anyhow::Error::from)?;

            if !overwrite {
                output.println("Aborted.");
                return Ok(CommandResult::failure(1));
            }
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, STARTER_MANIFEST)?;

        output.println(&theme.format_success(&format!("Created {}", path.display())));
        output.println(&format!(
            "  {}",
            theme
                .dim
                .apply_to("Edit the dependency list, then run 'depstrap sync'.")
        ));

        Ok(CommandResult::success())
    }
}
