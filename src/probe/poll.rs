//! Waiting for a spawned server to start listening.
//!
//! [`wait_until_ready`] races two signals: a [`PortProbe`] reporting a
//! listener, and the watched process exiting. Whichever comes first ends the
//! wait, so a server that dies during startup never leaves a poll loop
//! running behind it.

use std::thread;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::shell::{ExecOutput, RunningProcess};

use super::port::PortProbe;

/// Timing for [`wait_until_ready`].
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Wait before the first probe.
    pub initial_delay: Duration,
    /// Wait between probes.
    pub interval: Duration,
    /// Give up after this many probes. `None` polls until ready or exit.
    pub max_attempts: Option<u32>,
    /// How often the watched process is checked while waiting.
    pub exit_check: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(3),
            interval: Duration::from_secs(3),
            max_attempts: None,
            exit_check: Duration::from_millis(100),
        }
    }
}

/// Something whose exit ends the readiness wait.
pub trait ExitWatch {
    /// `None` while still running; the exit result once it has finished.
    fn check_exit(&mut self) -> Option<Result<ExecOutput>>;
}

impl ExitWatch for RunningProcess {
    fn check_exit(&mut self) -> Option<Result<ExecOutput>> {
        self.try_finish()
    }
}

/// How a readiness wait ended.
#[derive(Debug)]
pub enum Readiness {
    /// The probe saw a listener.
    Ready { attempts: u32 },
    /// The watched process finished first.
    Exited(Result<ExecOutput>),
    /// `max_attempts` probes all came back negative.
    GaveUp { attempts: u32 },
}

/// Probe `port` on `policy`'s schedule until it is listening or `watch` exits.
///
/// Probe errors count as "not ready"; polling carries on. Probes never
/// overlap: the next one is scheduled only after the previous returns.
pub fn wait_until_ready(
    watch: &mut dyn ExitWatch,
    probe: &dyn PortProbe,
    port: u16,
    policy: &PollPolicy,
) -> Readiness {
    let mut attempts = 0;
    let mut delay = policy.initial_delay;

    loop {
        if let Some(exit) = sleep_watching(watch, delay, policy.exit_check) {
            tracing::debug!(attempts, "watched process exited before ready");
            return Readiness::Exited(exit);
        }

        attempts += 1;
        match probe.is_listening(port) {
            Ok(true) => {
                tracing::debug!(port, attempts, probe = probe.name(), "port is listening");
                return Readiness::Ready { attempts };
            }
            Ok(false) => {
                tracing::debug!(port, attempts, probe = probe.name(), "port not listening yet");
            }
            Err(e) => {
                tracing::debug!(
                    port,
                    attempts,
                    probe = probe.name(),
                    error = %e,
                    "port check failed, treating as not ready"
                );
            }
        }

        if let Some(max) = policy.max_attempts {
            if attempts >= max {
                return Readiness::GaveUp { attempts };
            }
        }

        delay = policy.interval;
    }
}

/// Sleep for `total`, checking `watch` every `slice`.
fn sleep_watching(
    watch: &mut dyn ExitWatch,
    total: Duration,
    slice: Duration,
) -> Option<Result<ExecOutput>> {
    let deadline = Instant::now() + total;
    loop {
        if let Some(exit) = watch.check_exit() {
            return Some(exit);
        }
        let now = Instant::now();
        if now >= deadline {
            return None;
        }
        thread::sleep(slice.min(deadline - now));
    }
}
