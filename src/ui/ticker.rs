//! Elapsed-time ticker for long-running operations.
//!
//! A [`Ticker`] shows `"<label> <tips><elapsed>s"` right away and bumps the
//! counter once per interval on a background thread. The counter is a plain
//! increment, so it lags wall-clock time by whatever the scheduler loses per
//! tick; the reported figure is whole seconds.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Text between the label and the counter.
pub const DEFAULT_TIPS: &str = "elapsed: ";

/// Time between ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Render one ticker line.
pub fn format_tick(label: &str, tips: &str, elapsed: u64) -> String {
    format!("{} {}{}s", label, tips, elapsed)
}

/// Spinner-style bar used to display a ticker in a terminal.
pub fn spinner_bar() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.magenta} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

struct TickState {
    label: String,
    tips: String,
    elapsed: AtomicU64,
    bar: ProgressBar,
}

impl TickState {
    fn render(&self) {
        let elapsed = self.elapsed.load(Ordering::SeqCst);
        self.bar
            .set_message(format_tick(&self.label, &self.tips, elapsed));
    }

    fn advance(&self) -> u64 {
        let elapsed = self.elapsed.fetch_add(1, Ordering::SeqCst) + 1;
        self.render();
        elapsed
    }
}

/// A running elapsed-seconds display.
pub struct Ticker {
    state: Arc<TickState>,
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
    stopped: Option<u64>,
}

impl Ticker {
    /// Start ticking once per second with the default tips text.
    pub fn start(label: &str, bar: ProgressBar) -> Self {
        Self::with_interval(label, DEFAULT_TIPS, bar, TICK_INTERVAL)
    }

    /// Start ticking with custom tips text and interval.
    pub fn with_interval(label: &str, tips: &str, bar: ProgressBar, interval: Duration) -> Self {
        let mut ticker = Self::manual(label, tips, bar);

        let (tx, rx) = mpsc::channel::<()>();
        let state = Arc::clone(&ticker.state);
        let worker = thread::spawn(move || loop {
            match rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    state.advance();
                }
                // Sender dropped or an explicit stop.
                _ => break,
            }
        });

        ticker.stop_tx = Some(tx);
        ticker.worker = Some(worker);
        ticker
    }

    /// A ticker with no background thread; it only moves on [`Ticker::tick`].
    pub fn manual(label: &str, tips: &str, bar: ProgressBar) -> Self {
        let state = Arc::new(TickState {
            label: label.to_string(),
            tips: tips.to_string(),
            elapsed: AtomicU64::new(0),
            bar,
        });
        state.render();

        Self {
            state,
            stop_tx: None,
            worker: None,
            stopped: None,
        }
    }

    /// Advance by one second. No effect once stopped.
    pub fn tick(&self) -> u64 {
        match self.stopped {
            Some(elapsed) => elapsed,
            None => self.state.advance(),
        }
    }

    /// Seconds counted so far.
    pub fn elapsed(&self) -> u64 {
        self.state.elapsed.load(Ordering::SeqCst)
    }

    /// The label this ticker was started with.
    pub fn label(&self) -> &str {
        &self.state.label
    }

    /// The line currently displayed.
    pub fn message(&self) -> String {
        self.state.bar.message()
    }

    /// Whether [`Ticker::stop`] has been called.
    pub fn is_stopped(&self) -> bool {
        self.stopped.is_some()
    }

    /// Stop ticking, clear the display and return the final count.
    ///
    /// Calling this again returns the same count.
    pub fn stop(&mut self) -> u64 {
        if let Some(elapsed) = self.stopped {
            return elapsed;
        }

        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }

        let elapsed = self.elapsed();
        self.state.bar.finish_and_clear();
        self.stopped = Some(elapsed);
        elapsed
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ticker")
            .field("label", &self.state.label)
            .field("elapsed", &self.elapsed())
            .field("stopped", &self.stopped)
            .finish()
    }
}
