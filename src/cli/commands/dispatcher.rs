//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{ConfigStore, Settings};
use crate::error::{BmtError, Result};
use crate::ui::UserInterface;

/// Exit code for a command that needs a setting that was never set.
pub const EXIT_NOT_CONFIGURED: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
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

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    store: Box<dyn ConfigStore>,
    cwd: PathBuf,
}

impl CommandDispatcher {
    /// Create a dispatcher that reads settings from `store`.
    ///
    /// `cwd` anchors relative paths given to `bmt set path`.
    pub fn new(store: Box<dyn ConfigStore>, cwd: PathBuf) -> Self {
        Self { store, cwd }
    }

    /// The directory relative paths are resolved against.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// The settings store.
    pub fn store(&self) -> &dyn ConfigStore {
        self.store.as_ref()
    }

    /// Dispatch and execute a command.
    ///
    /// A missing required setting is reported through `ui` and turned into
    /// exit code [`EXIT_NOT_CONFIGURED`]; other errors are returned.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match self.route(cli, ui) {
            Err(e @ BmtError::NotConfigured { .. }) => {
                ui.warning(&e.to_string());
                Ok(CommandResult::failure(EXIT_NOT_CONFIGURED))
            }
            other => other,
        }
    }

    fn load(&self) -> Result<Settings> {
        let settings = self.store.load()?;
        tracing::debug!(location = %self.store.location(), "settings loaded");
        Ok(settings)
    }

    fn route(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Set(args) => {
                let settings = self.load()?;
                let cmd = super::set::SetCommand::new(
                    &settings,
                    self.store.as_ref(),
                    &self.cwd,
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Commands::Config(args) => {
                let settings = self.load()?;
                let cmd =
                    super::config::ConfigCommand::new(&settings, self.store.as_ref(), args.clone());
                cmd.execute(ui)
            }
            Commands::Build => super::build::BuildCommand::new(&self.load()?).execute(ui),
            Commands::Push(args) => {
                let cmd = super::push::PushCommand::new(&self.load()?, args.clone());
                cmd.execute(ui)
            }
            Commands::New(args) => {
                let cmd = super::new::NewCommand::new(&self.load()?, args.clone());
                cmd.execute(ui)
            }
            Commands::Preview(args) => {
                let cmd = super::preview::PreviewCommand::new(&self.load()?, args.clone());
                cmd.execute(ui)
            }
            Commands::Clean => super::clean::CleanCommand::new(&self.load()?).execute(ui),
            Commands::Open(args) => {
                let cmd = super::open::OpenCommand::new(&self.load()?, args.clone());
                cmd.execute(ui)
            }
            // Needs no settings, so a broken settings file cannot block it.
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfigStore;
    use crate::ui::MockUI;
    use clap::Parser;

    fn dispatcher(settings: Settings) -> CommandDispatcher {
        CommandDispatcher::new(
            Box::new(MemoryConfigStore::new(settings)),
            PathBuf::from("/work"),
        )
    }

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_keeps_cwd() {
        let dispatcher = dispatcher(Settings::default());
        assert_eq!(dispatcher.cwd(), Path::new("/work"));
        assert_eq!(dispatcher.store().location(), "(memory)");
    }

    #[test]
    fn missing_site_dir_exits_with_two() {
        let dispatcher = dispatcher(Settings::default());
        let cli = Cli::parse_from(["bmt", "build"]);
        let mut ui = MockUI::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert_eq!(result.exit_code, EXIT_NOT_CONFIGURED);
        assert!(ui.has_warning("bmt set path"));
    }

    #[test]
    fn set_goes_through_store() {
        let dispatcher = dispatcher(Settings::default());
        let cli = Cli::parse_from(["bmt", "set", "path", "blog"]);
        let mut ui = MockUI::new();

        assert!(dispatcher.dispatch(&cli, &mut ui).unwrap().success);
        let saved = dispatcher.store().load().unwrap();
        assert_eq!(saved.site_dir, Some(PathBuf::from("/work/blog")));
    }

    #[test]
    fn other_errors_propagate() {
        let dispatcher = dispatcher(Settings::default());
        let cli = Cli::parse_from(["bmt", "set", "port"]);
        let mut ui = MockUI::new();

        assert!(dispatcher.dispatch(&cli, &mut ui).is_err());
    }
}
