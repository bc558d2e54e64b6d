//! Operations on the blog project.
//!
//! - [`stage`] - a timed run of one or more commands
//! - [`publish`] - build, commit and push the generated site
//! - [`preview`] - run the develop server until it is ready
//!
//! All commands run with the site directory as their working directory.

pub mod preview;
pub mod publish;
pub mod stage;

pub use preview::{preview_url, start_preview, PreviewOutcome, PreviewState, COMPILING_LABEL};
pub use publish::{publish, PublishReport, PublishStage};
pub use stage::{run_stage, StageOutcome};

use crate::config::Settings;
use crate::error::Result;
use crate::shell::{CommandInvocation, CommandOptions, StdioMode};
use crate::ui::UserInterface;

/// Stderr kept from the develop server, which may run for hours.
pub const DEVELOP_STDERR_LIMIT: usize = 64 * 1024;

fn site_command(settings: &Settings, line: &str) -> Result<CommandInvocation> {
    let site = settings.require_site_dir()?;
    Ok(CommandInvocation::parse(line)?
        .through_shell()
        .with_options(CommandOptions::in_dir(site)))
}

/// The configured build command.
pub fn build_invocation(settings: &Settings) -> Result<CommandInvocation> {
    site_command(settings, &settings.build_command)
}

/// The configured clean command.
pub fn clean_invocation(settings: &Settings) -> Result<CommandInvocation> {
    site_command(settings, &settings.clean_command)
}

/// The configured develop command.
///
/// Its standard output is discarded unless `show_output` is set; standard
/// error is always captured so a failed start can be explained, keeping only
/// its last [`DEVELOP_STDERR_LIMIT`] bytes.
pub fn develop_invocation(settings: &Settings, show_output: bool) -> Result<CommandInvocation> {
    let invocation = site_command(settings, &settings.develop_command)?;
    let options = CommandOptions {
        stdout: if show_output {
            StdioMode::Inherit
        } else {
            StdioMode::Null
        },
        capture_limit: Some(DEVELOP_STDERR_LIMIT),
        ..invocation.options().clone()
    };
    Ok(invocation.with_options(options))
}

/// Build the site. Returns elapsed seconds.
pub fn build(settings: &Settings, ui: &mut dyn UserInterface) -> Result<u64> {
    let invocation = build_invocation(settings)?;
    Ok(run_stage(ui, PublishStage::Build.label(), &[invocation])?.seconds)
}

/// Clear build caches. Returns elapsed seconds.
pub fn clean(settings: &Settings, ui: &mut dyn UserInterface) -> Result<u64> {
    let invocation = clean_invocation(settings)?;
    Ok(run_stage(ui, "Cleaning", &[invocation])?.seconds)
}
