//! Clean command implementation.

use crate::config::Settings;
use crate::error::{BmtError, Result};
use crate::site;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The clean command implementation.
pub struct CleanCommand {
    settings: Settings,
}

impl CleanCommand {
    /// Create a new clean command.
    pub fn new(settings: &Settings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }
}

impl Command for CleanCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match site::clean(&self.settings, ui) {
            Ok(_) => {
                ui.success("Caches cleared");
                Ok(CommandResult::success())
            }
            Err(e @ BmtError::NotConfigured { .. }) => Err(e),
            Err(e) => {
                ui.error("Clean failed");
                Err(e)
            }
        }
    }
}
