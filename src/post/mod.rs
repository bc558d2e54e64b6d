//! New post scaffolding.
//!
//! - [`categories`] - which content subdirectories are categories
//! - [`naming`] - tag parsing and file name sanitizing
//!
//! A post is a Markdown file with a YAML front-matter block:
//!
//! ```text
//! ---
//! title: "Hello"
//! date: "2024-05-01 09:30:00"
//! tags: ["rust", "cli"]
//! status: "publish"
//! ---
//!
//! ## Heading
//! ```

pub mod categories;
pub mod naming;

pub use categories::{list_categories, BUILTIN_IGNORES};
pub use naming::{parse_tags, sanitize_file_stem};

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{BmtError, Result};

/// Timestamp format used in front matter.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Body written below the front matter.
const BODY: &str = "## Heading\n";

/// Whether the post is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStatus {
    Publish,
    Draft,
}

impl PostStatus {
    /// Value written to the `status` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Draft => "draft",
        }
    }
}

/// Everything needed to write a new post.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub category: String,
    pub tags: Vec<String>,
    pub status: PostStatus,
    pub created: DateTime<Local>,
}

impl PostDraft {
    /// Draft stamped with the current local time.
    pub fn new(title: &str, category: &str, tags: Vec<String>, status: PostStatus) -> Self {
        Self {
            title: title.to_string(),
            category: category.to_string(),
            tags,
            status,
            created: Local::now(),
        }
    }

    /// `<title>.md` with unsafe characters removed.
    pub fn file_name(&self) -> Result<String> {
        let stem = sanitize_file_stem(&self.title);
        if stem.is_empty() {
            return Err(BmtError::ConfigValidationError {
                message: format!("title '{}' has no usable file name characters", self.title),
            });
        }
        Ok(format!("{}.md", stem))
    }

    /// Where the post goes under `content_root`.
    ///
    /// The category must be a single plain directory name.
    pub fn path_in(&self, content_root: &Path) -> Result<PathBuf> {
        let mut components = Path::new(&self.category).components();
        let plain = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !plain {
            return Err(BmtError::ConfigValidationError {
                message: format!("category '{}' is not a directory name", self.category),
            });
        }
        Ok(content_root.join(&self.category).join(self.file_name()?))
    }

    /// Full file contents.
    pub fn render(&self) -> String {
        let mut fields = vec![
            format!("title: {}", quote(&self.title)),
            format!("date: {}", quote(&self.created.format(DATE_FORMAT).to_string())),
        ];
        if !self.tags.is_empty() {
            let tags: Vec<String> = self.tags.iter().map(|t| quote(t)).collect();
            fields.push(format!("tags: [{}]", tags.join(", ")));
        }
        fields.push(format!("status: {}", quote(self.status.as_str())));

        format!("---\n{}\n---\n\n{}", fields.join("\n"), BODY)
    }

    /// Write the post under `content_root`, refusing to overwrite.
    pub fn write(&self, content_root: &Path) -> Result<PathBuf> {
        let path = self.path_in(content_root)?;
        if path.exists() {
            return Err(BmtError::PostExists { path });
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        fs::write(&path, self.render())?;
        tracing::debug!(path = %path.display(), "post written");
        Ok(path)
    }
}

/// Double-quoted YAML scalar.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
