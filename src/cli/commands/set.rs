//! Set command implementation.
//!
//! `bmt set <key> <value>` updates one setting and saves it; `bmt set` alone
//! lists the current values and the keys that can be set.

use std::path::{Path, PathBuf};

use crate::cli::args::SetArgs;
use crate::config::{ConfigStore, SettingKey, Settings};
use crate::error::{BmtError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The set command implementation.
pub struct SetCommand<'a> {
    settings: Settings,
    store: &'a dyn ConfigStore,
    cwd: PathBuf,
    args: SetArgs,
}

impl<'a> SetCommand<'a> {
    /// Create a new set command.
    pub fn new(settings: &Settings, store: &'a dyn ConfigStore, cwd: &Path, args: SetArgs) -> Self {
        Self {
            settings: settings.clone(),
            store,
            cwd: cwd.to_path_buf(),
            args,
        }
    }

    fn list(&self, ui: &mut dyn UserInterface) {
        ui.show_header("Settings");
        for key in SettingKey::ALL {
            ui.message(&format!(
                "  {:<11} {:<40} {}",
                key.as_str(),
                self.settings.display_value(key),
                key.description()
            ));
        }
        ui.message("");
        ui.message("Usage: bmt set <key> <value>");
    }
}

impl Command for SetCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(key) = self.args.key.as_deref() else {
            self.list(ui);
            return Ok(CommandResult::success());
        };

        let key: SettingKey = key.parse()?;
        let value = self
            .args
            .value
            .as_deref()
            .ok_or_else(|| BmtError::ConfigValidationError {
                message: format!("missing value for '{}'. Usage: bmt set {} <value>", key, key),
            })?;

        let mut updated = self.settings.clone();
        updated.apply(key, value, &self.cwd)?;
        self.store.save(&updated)?;

        if key == SettingKey::Path {
            if let Some(dir) = updated.site_dir.as_deref().filter(|d| !d.is_dir()) {
                ui.warning(&format!("{} is not a directory yet", dir.display()));
            }
        }

        ui.success(&format!("{} = {}", key, updated.display_value(key)));
        Ok(CommandResult::success())
    }
}
