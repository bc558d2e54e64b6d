//! Settings and their persistence.
//!
//! - [`settings`] - the [`Settings`] struct every command reads from
//! - [`store`] - the [`ConfigStore`] trait and its file and in-memory stores
//!
//! Settings are loaded once in `main` and passed by reference into each
//! command; only `bmt set` writes them back.
//!
//! # Example
//!
//! ```
//! use bmt::config::{ConfigStore, FileConfigStore, SettingKey, Settings};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let store = FileConfigStore::new(temp.path().join("config.yml"));
//!
//! let mut settings = store.load().unwrap();
//! settings.apply(SettingKey::Port, "9000", temp.path()).unwrap();
//! store.save(&settings).unwrap();
//!
//! assert_eq!(store.load().unwrap().port, 9000);
//! ```

pub mod settings;
pub mod store;

pub use settings::{SettingKey, Settings, DEFAULT_BRANCH, DEFAULT_CONTENT_DIR, DEFAULT_PORT};
pub use store::{default_config_path, ConfigStore, FileConfigStore, MemoryConfigStore};
