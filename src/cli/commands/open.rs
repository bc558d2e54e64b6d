//! Open command implementation.
//!
//! `bmt open home` opens the content directory, `bmt open project` the
//! project directory.

use std::path::PathBuf;

use crate::cli::args::{OpenArgs, OpenTarget};
use crate::config::Settings;
use crate::error::Result;
use crate::shell::open_path;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The open command implementation.
pub struct OpenCommand {
    settings: Settings,
    args: OpenArgs,
}

impl OpenCommand {
    /// Create a new open command.
    pub fn new(settings: &Settings, args: OpenArgs) -> Self {
        Self {
            settings: settings.clone(),
            args,
        }
    }

    /// The folder this command opens.
    pub fn target_dir(&self) -> Result<PathBuf> {
        match self.args.target {
            OpenTarget::Home => self.settings.content_root(),
            OpenTarget::Project => Ok(self.settings.require_site_dir()?.to_path_buf()),
        }
    }
}

impl Command for OpenCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let dir = self.target_dir()?;
        open_path(&dir)?;
        ui.success(&format!("Opened {}", dir.display()));
        Ok(CommandResult::success())
    }
}
