//! Building and force-pushing the generated site.
//!
//! The generated `public/` directory is its own git repository whose only
//! branch is replaced on every publish:
//!
//! 1. build the site
//! 2. if `public/.git` is missing: `git init`, add the remote, start an
//!    orphan branch
//! 3. `git add --all` and `git commit -m <message>`
//! 4. `git push -u origin <branch> -f`

use std::path::Path;
use std::time::Instant;

use crate::config::Settings;
use crate::error::{BmtError, Result};
use crate::shell::{CommandInvocation, CommandOptions};
use crate::ui::UserInterface;

use super::run_stage;

/// A step of the publish sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStage {
    Build,
    Init,
    Commit,
    Push,
}

impl PublishStage {
    /// Ticker label while the stage runs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Build => "Building site",
            Self::Init => "Initializing repository",
            Self::Commit => "Committing changes",
            Self::Push => "Pushing to remote",
        }
    }

    /// Short name for reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Build => "Build",
            Self::Init => "Init",
            Self::Commit => "Commit",
            Self::Push => "Push",
        }
    }
}

/// Per-stage timings of a successful publish.
#[derive(Debug, Default)]
pub struct PublishReport {
    pub stages: Vec<(PublishStage, u64)>,
    pub total_seconds: u64,
}

fn git<I, S>(public: &Path, args: I) -> CommandInvocation
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CommandInvocation::new("git", args).with_options(CommandOptions::in_dir(public))
}

/// Commands that turn `public` into a repository pointing at `repository`.
pub fn init_commands(public: &Path, repository: &str, branch: &str) -> Vec<CommandInvocation> {
    vec![
        git(public, ["init"]),
        git(public, ["remote", "add", "origin", repository]),
        git(public, ["checkout", "--orphan", branch]),
    ]
}

/// Commands that stage everything and commit it.
pub fn commit_commands(public: &Path, message: &str) -> Vec<CommandInvocation> {
    vec![
        git(public, ["add", "--all"]),
        git(public, ["commit", "-m", message]),
    ]
}

/// Command that force-pushes the branch.
pub fn push_commands(public: &Path, branch: &str) -> Vec<CommandInvocation> {
    vec![git(public, ["push", "-u", "origin", branch, "-f"])]
}

/// Build, commit and push the site, reporting each stage through `ui`.
///
/// A failing stage is reported and its error returned; later stages do not
/// run.
pub fn publish(settings: &Settings, message: &str, ui: &mut dyn UserInterface) -> Result<PublishReport> {
    let repository = settings.require_repository()?;
    let message = message.trim();
    if message.is_empty() {
        return Err(BmtError::ConfigValidationError {
            message: "commit message must not be empty".to_string(),
        });
    }

    let started = Instant::now();
    let mut report = PublishReport::default();

    let build = vec![super::build_invocation(settings)?];
    run_publish_stage(ui, PublishStage::Build, &build, &mut report)?;

    let public = settings.public_dir()?;
    if !public.join(".git").exists() {
        let init = init_commands(&public, repository, &settings.branch);
        run_publish_stage(ui, PublishStage::Init, &init, &mut report)?;
    }

    run_publish_stage(ui, PublishStage::Commit, &commit_commands(&public, message), &mut report)?;
    run_publish_stage(ui, PublishStage::Push, &push_commands(&public, &settings.branch), &mut report)?;

    report.total_seconds = started.elapsed().as_secs();
    ui.success(&format!("Published in {}s", report.total_seconds));
    Ok(report)
}

fn run_publish_stage(
    ui: &mut dyn UserInterface,
    stage: PublishStage,
    commands: &[CommandInvocation],
    report: &mut PublishReport,
) -> Result<()> {
    match run_stage(ui, stage.label(), commands) {
        Ok(outcome) => {
            ui.success(&format!("{} done in {}s", stage.name(), outcome.seconds));
            report.stages.push((stage, outcome.seconds));
            Ok(())
        }
        Err(e) => {
            ui.error(&format!("{} failed", stage.name()));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn lines(commands: &[CommandInvocation]) -> Vec<String> {
        commands.iter().map(|c| c.display()).collect()
    }

    #[test]
    fn init_sequence() {
        let commands = init_commands(Path::new("/blog/public"), "git@host:me/site.git", "main");
        assert_eq!(
            lines(&commands),
            [
                "git init",
                "git remote add origin git@host:me/site.git",
                "git checkout --orphan main",
            ]
        );
        assert!(commands
            .iter()
            .all(|c| c.options().cwd == Some(PathBuf::from("/blog/public"))));
    }

    #[test]
    fn commit_message_stays_one_argument() {
        let commands = commit_commands(Path::new("/p"), "new post: hello world");
        assert_eq!(commands[1].arguments(), ["commit", "-m", "new post: hello world"]);
        assert_eq!(commands[0].arguments(), ["add", "--all"]);
    }

    #[test]
    fn push_is_forced_to_branch() {
        let commands = push_commands(Path::new("/p"), "master");
        assert_eq!(lines(&commands), ["git push -u origin master -f"]);
    }

    #[test]
    fn requires_repository() {
        let settings = Settings {
            site_dir: Some(PathBuf::from("/blog")),
            ..Default::default()
        };
        let mut ui = MockUI::new();
        let err = publish(&settings, "msg", &mut ui).unwrap_err();
        assert!(matches!(err, BmtError::NotConfigured { ref setting } if setting == "repository"));
        assert!(ui.tickers().is_empty());
    }

    #[test]
    fn rejects_blank_message() {
        let settings = Settings {
            site_dir: Some(PathBuf::from("/blog")),
            repository: Some("git@host:me/site.git".to_string()),
            ..Default::default()
        };
        let mut ui = MockUI::new();
        assert!(publish(&settings, "  ", &mut ui).is_err());
        assert!(ui.tickers().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn failed_build_stops_sequence() {
        let temp = TempDir::new().unwrap();
        let settings = Settings {
            site_dir: Some(temp.path().to_path_buf()),
            repository: Some("git@host:me/site.git".to_string()),
            build_command: "sh -c \"echo broken >&2; exit 1\"".to_string(),
            ..Default::default()
        };
        let mut ui = MockUI::new();

        let err = publish(&settings, "msg", &mut ui).unwrap_err();
        assert_eq!(err.stderr(), Some("broken\n"));
        assert_eq!(ui.tickers(), &["Building site".to_string()]);
        assert!(ui.has_error("Build failed"));
    }
}
