//! Preview command implementation.
//!
//! The `bmt preview` command starts the develop server, reports when its
//! port answers, and then stays attached until the server exits.

use crate::cli::args::PreviewArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::probe::{PollPolicy, PortProbe};
use crate::site::{self, preview_url, start_preview, PreviewOutcome};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The preview command implementation.
pub struct PreviewCommand {
    settings: Settings,
    args: PreviewArgs,
    probe: Option<Box<dyn PortProbe>>,
    policy: Option<PollPolicy>,
}

impl PreviewCommand {
    /// Create a new preview command.
    pub fn new(settings: &Settings, args: PreviewArgs) -> Self {
        Self {
            settings: settings.clone(),
            args,
            probe: None,
            policy: None,
        }
    }

    /// Use `probe` instead of the configured one.
    pub fn with_probe(mut self, probe: Box<dyn PortProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Use `policy` instead of the default poll timing.
    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    fn port(&self) -> u16 {
        self.args.port.unwrap_or(self.settings.port)
    }

    fn policy(&self) -> PollPolicy {
        let base = self.policy.clone().unwrap_or_default();
        PollPolicy {
            max_attempts: self.args.max_attempts.or(base.max_attempts),
            ..base
        }
    }
}

impl Command for PreviewCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let show_output = ui.output_mode().shows_command_output();
        let server = site::develop_invocation(&self.settings, show_output)?;
        let port = self.port();

        let configured;
        let probe: &dyn PortProbe = match &self.probe {
            Some(probe) => probe.as_ref(),
            None => {
                configured = self.settings.probe.build();
                configured.as_ref()
            }
        };

        match start_preview(ui, &server, probe, port, &self.policy())? {
            PreviewOutcome::Ready {
                server, seconds, ..
            } => {
                ui.info(&format!("Compiled in {}s, server running", seconds));
                ui.message(&preview_url(port));

                match server.wait() {
                    Ok(_) => {
                        ui.info("Preview ended");
                        Ok(CommandResult::success())
                    }
                    Err(e) => {
                        ui.error("Preview server failed");
                        Err(e)
                    }
                }
            }
            PreviewOutcome::Failed { exit: Ok(_), seconds } => {
                ui.warning(&format!(
                    "Develop server exited after {}s without listening on port {}",
                    seconds, port
                ));
                Ok(CommandResult::failure(1))
            }
            PreviewOutcome::Failed { exit: Err(e), .. } => {
                ui.error("Compilation failed");
                Err(e)
            }
            PreviewOutcome::GaveUp { attempts, seconds } => {
                ui.error(&format!(
                    "Nothing listening on port {} after {} checks ({}s); server stopped",
                    port, attempts, seconds
                ));
                Ok(CommandResult::failure(1))
            }
        }
    }
}
