//! Loading and saving [`Settings`].

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BmtError, Result};

use super::Settings;

/// Where settings live.
pub trait ConfigStore {
    /// Read the settings. A store with nothing saved yields the defaults.
    fn load(&self) -> Result<Settings>;

    /// Persist the settings.
    fn save(&self, settings: &Settings) -> Result<()>;

    /// Human-readable location, for `bmt config`.
    fn location(&self) -> String;
}

/// `~/.bmt/config.yml`, or `./.bmt/config.yml` when there is no home directory.
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bmt")
        .join("config.yml")
}

/// YAML settings file.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new(default_config_path())
    }
}

impl FileConfigStore {
    /// Store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }

        serde_yaml::from_str(&content).map_err(|e| BmtError::ConfigParseError {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Uses the write-to-temp-then-rename pattern to prevent corruption.
    fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content =
            serde_yaml::to_string(settings).map_err(|e| BmtError::ConfigValidationError {
                message: format!("Failed to serialize settings: {}", e),
            })?;

        let temp_path = self.path.with_extension("yml.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Settings held in memory, for tests.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    settings: RefCell<Settings>,
    saves: RefCell<usize>,
}

impl MemoryConfigStore {
    /// Store pre-loaded with `settings`.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RefCell::new(settings),
            saves: RefCell::new(0),
        }
    }

    /// How many times `save` was called.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }

    /// The last saved settings.
    pub fn current(&self) -> Settings {
        self.settings.borrow().clone()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<Settings> {
        Ok(self.current())
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        *self.settings.borrow_mut() = settings.clone();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "(memory)".to_string()
    }
}
