//! The persisted settings struct.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{BmtError, Result};
use crate::probe::ProbeKind;

/// Branch the generated site is pushed to.
pub const DEFAULT_BRANCH: &str = "master";

/// Content directory, relative to the site directory.
pub const DEFAULT_CONTENT_DIR: &str = "content";

/// Port the develop server listens on.
pub const DEFAULT_PORT: u16 = 8000;

/// Everything bmt remembers between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the blog project.
    pub site_dir: Option<PathBuf>,

    /// Remote the generated site is pushed to.
    pub repository: Option<String>,

    /// Branch the generated site is pushed to.
    pub branch: String,

    /// Where posts live. Relative paths are resolved against `site_dir`.
    pub content_dir: PathBuf,

    /// Content subdirectories that are not categories.
    pub ignore: Vec<String>,

    /// Port the develop server listens on.
    pub port: u16,

    /// How preview decides the server is up.
    pub probe: ProbeKind,

    /// Command line that builds the site.
    pub build_command: String,

    /// Command line that runs the local develop server.
    pub develop_command: String,

    /// Command line that clears build caches.
    pub clean_command: String,

    /// Open a post in the file opener after creating it.
    pub open_new_posts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_dir: None,
            repository: None,
            branch: DEFAULT_BRANCH.to_string(),
            content_dir: PathBuf::from(DEFAULT_CONTENT_DIR),
            ignore: Vec::new(),
            port: DEFAULT_PORT,
            probe: ProbeKind::default(),
            build_command: "yarn run build".to_string(),
            develop_command: "yarn run develop".to_string(),
            clean_command: "gatsby clean".to_string(),
            open_new_posts: true,
        }
    }
}

impl Settings {
    /// The site directory, or [`BmtError::NotConfigured`].
    pub fn require_site_dir(&self) -> Result<&Path> {
        self.site_dir
            .as_deref()
            .ok_or_else(|| not_configured(SettingKey::Path))
    }

    /// The repository URL, or [`BmtError::NotConfigured`].
    pub fn require_repository(&self) -> Result<&str> {
        self.repository
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| not_configured(SettingKey::Repository))
    }

    /// Absolute content directory.
    pub fn content_root(&self) -> Result<PathBuf> {
        Ok(self.require_site_dir()?.join(&self.content_dir))
    }

    /// Directory the build writes the generated site into.
    pub fn public_dir(&self) -> Result<PathBuf> {
        Ok(self.require_site_dir()?.join("public"))
    }

    /// Update one setting from user text.
    ///
    /// `cwd` anchors a relative `path`.
    pub fn apply(&mut self, key: SettingKey, value: &str, cwd: &Path) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(invalid(format!("'{}' needs a value", key)));
        }

        match key {
            SettingKey::Path => {
                self.site_dir = Some(cwd.join(value));
            }
            SettingKey::Repository => {
                self.repository = Some(value.to_string());
            }
            SettingKey::Branch => {
                if value.chars().any(char::is_whitespace) {
                    return Err(invalid(format!("branch '{}' contains whitespace", value)));
                }
                self.branch = value.to_string();
            }
            SettingKey::Content => {
                self.content_dir = PathBuf::from(value);
            }
            SettingKey::Port => {
                self.port = match value.parse::<u16>() {
                    Ok(port) if port > 0 => port,
                    _ => return Err(invalid(format!("'{}' is not a valid port", value))),
                };
            }
            SettingKey::Probe => {
                self.probe = value.parse().map_err(invalid)?;
            }
        }

        Ok(())
    }

    /// Current value of a setting, as shown by `bmt set`.
    pub fn display_value(&self, key: SettingKey) -> String {
        match key {
            SettingKey::Path => self
                .site_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not set)".to_string()),
            SettingKey::Repository => self
                .repository
                .clone()
                .unwrap_or_else(|| "(not set)".to_string()),
            SettingKey::Branch => self.branch.clone(),
            SettingKey::Content => self.content_dir.display().to_string(),
            SettingKey::Port => self.port.to_string(),
            SettingKey::Probe => self.probe.to_string(),
        }
    }
}

fn not_configured(key: SettingKey) -> BmtError {
    BmtError::NotConfigured {
        setting: key.to_string(),
    }
}

fn invalid(message: String) -> BmtError {
    BmtError::ConfigValidationError { message }
}

/// Settings that `bmt set` can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Path,
    Repository,
    Branch,
    Content,
    Port,
    Probe,
}

impl SettingKey {
    /// Every key, in display order.
    pub const ALL: [SettingKey; 6] = [
        Self::Path,
        Self::Repository,
        Self::Branch,
        Self::Content,
        Self::Port,
        Self::Probe,
    ];

    /// Name used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Repository => "repository",
            Self::Branch => "branch",
            Self::Content => "content",
            Self::Port => "port",
            Self::Probe => "probe",
        }
    }

    /// One-line description for `bmt set` without arguments.
    pub fn description(self) -> &'static str {
        match self {
            Self::Path => "blog project directory",
            Self::Repository => "remote the generated site is pushed to",
            Self::Branch => "branch the generated site is pushed to",
            Self::Content => "posts directory, relative to the project",
            Self::Port => "develop server port",
            Self::Probe => "readiness check: socket or netstat",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = BmtError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s.to_lowercase())
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                invalid(format!(
                    "unknown setting '{}' (expected one of: {})",
                    s,
                    names.join(", ")
                ))
            })
    }
}
