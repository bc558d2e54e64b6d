//! Running the develop server until it answers on its port.
//!
//! A preview moves through these states:
//!
//! ```text
//! Starting --(initial delay)--> Polling --(probe true)--> Ready
//!     \                            |  \
//!      \-----(server exits)--------+   \--(attempt limit)--> GaveUp
//!                                  v
//!                                Failed
//! ```
//!
//! The "Compiling" ticker runs from `Starting` until a terminal state.

use std::fmt;

use crate::error::Result;
use crate::probe::{wait_until_ready, PollPolicy, PortProbe, Readiness};
use crate::shell::{spawn, CommandInvocation, ExecOutput, RunningProcess};
use crate::ui::UserInterface;

/// Ticker label while the server compiles.
pub const COMPILING_LABEL: &str = "Compiling";

/// Where a preview is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    Starting,
    Polling,
    Ready,
    Failed,
    GaveUp,
}

impl fmt::Display for PreviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Starting => "starting",
            Self::Polling => "polling",
            Self::Ready => "ready",
            Self::Failed => "failed",
            Self::GaveUp => "gave-up",
        };
        f.write_str(name)
    }
}

/// How the startup wait ended.
#[derive(Debug)]
pub enum PreviewOutcome {
    /// The port is listening. The server is still running.
    Ready {
        server: RunningProcess,
        seconds: u64,
        attempts: u32,
    },
    /// The server exited before it was ready.
    Failed {
        exit: Result<ExecOutput>,
        seconds: u64,
    },
    /// The attempt limit was reached. The server has been killed.
    GaveUp { attempts: u32, seconds: u64 },
}

impl PreviewOutcome {
    /// Terminal state this outcome represents.
    pub fn state(&self) -> PreviewState {
        match self {
            Self::Ready { .. } => PreviewState::Ready,
            Self::Failed { .. } => PreviewState::Failed,
            Self::GaveUp { .. } => PreviewState::GaveUp,
        }
    }
}

/// Spawn `server` and wait until `probe` sees `port` listening.
///
/// Only a spawn failure is returned as `Err`; everything after that is a
/// [`PreviewOutcome`].
pub fn start_preview(
    ui: &mut dyn UserInterface,
    server: &CommandInvocation,
    probe: &dyn PortProbe,
    port: u16,
    policy: &PollPolicy,
) -> Result<PreviewOutcome> {
    let mut ticker = ui.start_ticker(COMPILING_LABEL);
    tracing::debug!(state = %PreviewState::Starting, command = %server.display());

    let mut process = spawn(server)?;
    tracing::debug!(
        state = %PreviewState::Polling,
        port,
        probe = probe.name(),
        pid = process.id()
    );

    let readiness = wait_until_ready(&mut process, probe, port, policy);
    let seconds = ticker.stop();

    let outcome = match readiness {
        Readiness::Ready { attempts } => PreviewOutcome::Ready {
            server: process,
            seconds,
            attempts,
        },
        Readiness::Exited(exit) => PreviewOutcome::Failed { exit, seconds },
        Readiness::GaveUp { attempts } => {
            process.kill()?;
            PreviewOutcome::GaveUp { attempts, seconds }
        }
    };

    tracing::debug!(state = %outcome.state(), seconds, "preview startup finished");
    Ok(outcome)
}

/// URL the preview is served on.
pub fn preview_url(port: u16) -> String {
    format!("http://localhost:{}", port)
}
