//! Config command implementation.
//!
//! The `bmt config` command shows the current settings.

use crate::cli::args::ConfigArgs;
use crate::config::{ConfigStore, Settings};
use crate::error::{BmtError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand<'a> {
    settings: Settings,
    store: &'a dyn ConfigStore,
    args: ConfigArgs,
}

impl<'a> ConfigCommand<'a> {
    /// Create a new config command.
    pub fn new(settings: &Settings, store: &'a dyn ConfigStore, args: ConfigArgs) -> Self {
        Self {
            settings: settings.clone(),
            store,
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigArgs {
        &self.args
    }
}

impl Command for ConfigCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.json {
            let json = serde_json::to_string_pretty(&self.settings)
                .map_err(|e| BmtError::Other(e.into()))?;
            ui.message(&json);
        } else {
            ui.message(&format!("# {}", self.store.location()));
            ui.message("");
            let yaml =
                serde_yaml::to_string(&self.settings).map_err(|e| BmtError::Other(e.into()))?;
            ui.message(yaml.trim_end());
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfigStore;
    use crate::ui::MockUI;
    use std::path::PathBuf;

    fn settings() -> Settings {
        Settings {
            site_dir: Some(PathBuf::from("/blog")),
            ..Default::default()
        }
    }

    #[test]
    fn shows_yaml_with_location() {
        let store = MemoryConfigStore::default();
        let cmd = ConfigCommand::new(&settings(), &store, ConfigArgs::default());
        let mut ui = MockUI::new();

        assert!(cmd.execute(&mut ui).unwrap().success);
        assert!(ui.has_message("# (memory)"));
        assert!(ui.has_message("site_dir: /blog"));
        assert!(ui.has_message("port: 8000"));
    }

    #[test]
    fn json_output_parses() {
        let store = MemoryConfigStore::default();
        let cmd = ConfigCommand::new(&settings(), &store, ConfigArgs { json: true });
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();
        let value: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(value["port"].as_u64(), Some(8000));
        assert_eq!(value["probe"], "socket");
        assert_eq!(value["branch"], "master");
    }
}
