//! Category discovery.
//!
//! A category is a directory directly under the content directory.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Directories that are never categories.
pub const BUILTIN_IGNORES: &[&str] = &["assets", ".git"];

/// Sorted category names under `content_root`, skipping built-in and
/// configured ignores.
pub fn list_categories(content_root: &Path, ignore: &[String]) -> Result<Vec<String>> {
    let mut categories = Vec::new();

    for entry in fs::read_dir(content_root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if BUILTIN_IGNORES.contains(&name.as_str()) || ignore.iter().any(|i| *i == name) {
            tracing::debug!(category = %name, "skipping ignored directory");
            continue;
        }
        categories.push(name);
    }

    categories.sort();
    Ok(categories)
}
