//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] resolving manifest/state/project paths
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands, SyncArgs};
use crate::error::Result;
use crate::manifest;
use crate::state;
use crate::ui::Output;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `output` - Writer for user-facing status and errors
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, output: &Output) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Resolved paths shared by every command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Project root holding fetched dependencies.
    pub project_root: PathBuf,

    /// Manifest location.
    pub manifest_path: PathBuf,

    /// State-file location.
    pub state_path: PathBuf,
}

impl CommandContext {
    /// Resolve paths from CLI flags, defaulting to the current directory.
    pub fn from_cli(cli: &Cli) -> Self {
        let project_root = cli
            .project
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
        let manifest_path = cli
            .manifest
            .clone()
            .unwrap_or_else(|| manifest::default_manifest_path(&project_root));
        let state_path = cli
            .state
            .clone()
            .unwrap_or_else(|| state::default_state_path(&project_root));

        Self {
            project_root,
            manifest_path,
            state_path,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a dispatcher with paths resolved from the CLI.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            context: CommandContext::from_cli(cli),
        }
    }

    /// Get the resolved context.
    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command
    /// implementation; no subcommand means `sync` with default options.
    pub fn dispatch(&self, cli: &Cli, output: &Output) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Sync(args)) => {
                let cmd = super::sync::SyncCommand::new(self.context.clone(), args.clone());
                cmd.execute(output)
            }
            Some(Commands::Status(args)) => {
                let cmd = super::status::StatusCommand::new(self.context.clone(), args.clone());
                cmd.execute(output)
            }
            Some(Commands::List(args)) => {
                let cmd = super::list::ListCommand::new(self.context.clone(), args.clone());
                cmd.execute(output)
            }
            Some(Commands::Init(args)) => {
                let cmd = super::init::InitCommand::new(self.context.clone(), args.clone());
                cmd.execute(output)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(output)
            }
            None => {
                let cmd =
                    super::sync::SyncCommand::new(self.context.clone(), SyncArgs::default());
                cmd.execute(output)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(2);
        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn context_uses_project_flag() {
        let cli = Cli::parse_from(["depstrap", "--project", "/work"]);
        let context = CommandContext::from_cli(&cli);

        assert_eq!(context.project_root, PathBuf::from("/work"));
        assert_eq!(context.manifest_path, PathBuf::from("/work/depstrap.json"));
        assert_eq!(
            context.state_path,
            PathBuf::from("/work/depstrap.state.json")
        );
    }

    #[test]
    fn explicit_paths_override_project_defaults() {
        let cli = Cli::parse_from([
            "depstrap",
            "--project",
            "/work",
            "--manifest",
            "/elsewhere/deps.json",
        ]);
        let context = CommandContext::from_cli(&cli);

        assert_eq!(context.manifest_path, PathBuf::from("/elsewhere/deps.json"));
        assert_eq!(
            context.state_path,
            PathBuf::from("/work/depstrap.state.json")
        );
    }
}
