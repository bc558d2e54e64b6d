//! Build command implementation.

use crate::config::Settings;
use crate::error::{BmtError, Result};
use crate::site;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The build command implementation.
pub struct BuildCommand {
    settings: Settings,
}

impl BuildCommand {
    /// Create a new build command.
    pub fn new(settings: &Settings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }
}

impl Command for BuildCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match site::build(&self.settings, ui) {
            Ok(seconds) => {
                ui.success(&format!("Site built in {}s", seconds));
                Ok(CommandResult::success())
            }
            Err(e @ BmtError::NotConfigured { .. }) => Err(e),
            Err(e) => {
                ui.error("Build failed");
                Err(e)
            }
        }
    }
}
