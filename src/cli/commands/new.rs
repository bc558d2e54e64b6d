//! New command implementation.
//!
//! The `bmt new <title>` command asks for a category, tags and publish
//! status, then writes the post under `<content>/<category>/<title>.md`.

use crate::cli::args::NewArgs;
use crate::config::Settings;
use crate::error::{BmtError, Result};
use crate::post::{list_categories, parse_tags, PostDraft, PostStatus};
use crate::shell::open_path;
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The new command implementation.
pub struct NewCommand {
    settings: Settings,
    args: NewArgs,
}

impl NewCommand {
    /// Create a new post command.
    pub fn new(settings: &Settings, args: NewArgs) -> Self {
        Self {
            settings: settings.clone(),
            args,
        }
    }

    fn choose_category(&self, categories: &[String], ui: &mut dyn UserInterface) -> Result<String> {
        if categories.is_empty() {
            return Err(BmtError::ConfigValidationError {
                message: "no categories found; create a folder in the content directory first"
                    .to_string(),
            });
        }

        let chosen = match &self.args.category {
            Some(category) => category.clone(),
            None if self.args.yes => categories[0].clone(),
            None => {
                let answer = ui
                    .prompt(&Prompt::select("category", "Category", categories))?
                    .as_string();
                if answer.is_empty() {
                    categories[0].clone()
                } else {
                    answer
                }
            }
        };

        if !categories.contains(&chosen) {
            return Err(BmtError::ConfigValidationError {
                message: format!(
                    "unknown category '{}' (available: {})",
                    chosen,
                    categories.join(", ")
                ),
            });
        }
        Ok(chosen)
    }

    fn choose_tags(&self, ui: &mut dyn UserInterface) -> Result<Vec<String>> {
        let raw = match &self.args.tags {
            Some(tags) => tags.clone(),
            None if self.args.yes => String::new(),
            None => {
                let prompt = Prompt {
                    default: Some(String::new()),
                    ..Prompt::input("tags", "Tags (comma or space separated)")
                };
                ui.prompt(&prompt)?.as_string()
            }
        };
        Ok(parse_tags(&raw))
    }

    fn choose_status(&self, ui: &mut dyn UserInterface) -> Result<PostStatus> {
        if self.args.draft {
            return Ok(PostStatus::Draft);
        }
        if self.args.yes {
            return Ok(PostStatus::Publish);
        }

        let publish = ui
            .prompt(&Prompt::confirm("publish", "Publish this post?", true))?
            .as_bool();
        Ok(if publish {
            PostStatus::Publish
        } else {
            PostStatus::Draft
        })
    }
}

impl Command for NewCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let content_root = self.settings.content_root()?;
        let title = self.args.title.trim();
        if title.is_empty() {
            return Err(BmtError::ConfigValidationError {
                message: "post title must not be empty".to_string(),
            });
        }

        let categories = list_categories(&content_root, &self.settings.ignore)?;
        let category = self.choose_category(&categories, ui)?;
        let tags = self.choose_tags(ui)?;
        let status = self.choose_status(ui)?;

        let draft = PostDraft::new(title, &category, tags, status);
        // Fail on a bad title before asking for confirmation.
        let path = draft.path_in(&content_root)?;

        if !self.args.yes {
            let question = format!("Create {}?", path.display());
            if !ui.prompt(&Prompt::confirm("continue", &question, true))?.as_bool() {
                ui.message("Cancelled");
                return Ok(CommandResult::success());
            }
        }

        let path = draft.write(&content_root)?;
        ui.success(&format!("Created {}", path.display()));

        if self.settings.open_new_posts && !self.args.no_open {
            if let Err(e) = open_path(&path) {
                tracing::debug!(error = %e, "could not open new post");
                ui.warning(&format!("Could not open {}: {}", path.display(), e));
            }
        }

        Ok(CommandResult::success())
    }
}
