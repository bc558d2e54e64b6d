//! Push command implementation.
//!
//! The `bmt push <message>` command builds the site and force-pushes the
//! generated `public/` directory.

use crate::cli::args::PushArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::site;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The push command implementation.
pub struct PushCommand {
    settings: Settings,
    args: PushArgs,
}

impl PushCommand {
    /// Create a new push command.
    pub fn new(settings: &Settings, args: PushArgs) -> Self {
        Self {
            settings: settings.clone(),
            args,
        }
    }
}

impl Command for PushCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.settings.require_site_dir()?;
        self.settings.require_repository()?;

        site::publish(&self.settings, &self.args.message(), ui)?;
        Ok(CommandResult::success())
    }
}
