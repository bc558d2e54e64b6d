//! One timed unit of work.

use crate::error::Result;
use crate::shell::{exec, CommandInvocation, ExecOutput};
use crate::ui::UserInterface;

/// What a finished stage produced.
#[derive(Debug)]
pub struct StageOutcome {
    /// Seconds on the stage's ticker.
    pub seconds: u64,
    /// Output of each command, in order.
    pub outputs: Vec<ExecOutput>,
}

/// Run `commands` in order under one ticker labelled `label`.
///
/// Stops at the first failing command and returns its error. The ticker is
/// stopped on every path.
pub fn run_stage(
    ui: &mut dyn UserInterface,
    label: &str,
    commands: &[CommandInvocation],
) -> Result<StageOutcome> {
    let mut ticker = ui.start_ticker(label);
    let mut outputs = Vec::with_capacity(commands.len());

    for command in commands {
        match exec(command) {
            Ok(output) => outputs.push(output),
            Err(e) => {
                let seconds = ticker.stop();
                tracing::debug!(stage = label, seconds, error = %e, "stage failed");
                return Err(e);
            }
        }
    }

    let seconds = ticker.stop();
    tracing::debug!(stage = label, seconds, "stage finished");

    if ui.output_mode().shows_command_output() {
        for output in &outputs {
            let text = output.stdout.trim_end();
            if !text.is_empty() {
                ui.message(text);
            }
        }
    }

    Ok(StageOutcome { seconds, outputs })
}
