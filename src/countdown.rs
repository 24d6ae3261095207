//! Countdown Engine
//!
//! A blocking, second-granularity countdown that publishes the remaining time
//! to a display sink. Cancellation is cooperative: the token is checked before
//! every tick, so a stop takes effect within one second.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Display text written when a countdown is cancelled
pub const STOPPED_TEXT: &str = "Reminder stopped.";

/// Display text shown before the first start
pub const IDLE_TEXT: &str = "Please start timer";

/// Cooperative cancellation signal shared between the UI and one run
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Receives every display update the engine produces
pub trait DisplaySink: Send + Sync {
    fn show(&self, text: String);
}

/// One countdown step; production sleeps a second
pub trait Ticker: Send + Sync {
    fn tick(&self);
}

/// Real-time ticker
#[derive(Debug, Default, Clone, Copy)]
pub struct SecondTicker;

impl Ticker for SecondTicker {
    fn tick(&self) {
        thread::sleep(Duration::from_secs(1));
    }
}

/// Which kind of countdown is running; decides the display format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    /// Counting down to the next break
    Work,
    /// The break itself
    Break,
    /// A one-shot reminder
    Once,
}

impl PhaseKind {
    pub fn label(self, remaining: u64) -> String {
        match self {
            PhaseKind::Work => {
                let (minutes, secs) = (remaining / 60, remaining % 60);
                format!("Time to break: {} min {} sec", minutes, secs)
            }
            PhaseKind::Break => format!("Break time left: {} sec", remaining),
            PhaseKind::Once => format!("Time left: {}", format_hms(remaining)),
        }
    }
}

/// Format seconds as `H hr M min S sec`
pub fn format_hms(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{} hr {} min {} sec", hours, minutes, secs)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    Completed,
    Cancelled,
}

/// Count `seconds` down to zero, one tick per second.
///
/// Writes [`STOPPED_TEXT`] and returns `Cancelled` as soon as the token is
/// observed; otherwise writes the zero label and returns `Completed` after
/// exactly `seconds` ticks.
pub fn run_countdown(
    seconds: u64,
    phase: PhaseKind,
    display: &dyn DisplaySink,
    cancel: &CancellationToken,
    ticker: &dyn Ticker,
) -> CountdownOutcome {
    debug!("Countdown {:?} started for {}s", phase, seconds);

    for remaining in (1..=seconds).rev() {
        if cancel.is_cancelled() {
            display.show(STOPPED_TEXT.to_string());
            return CountdownOutcome::Cancelled;
        }
        display.show(phase.label(remaining));
        ticker.tick();
    }

    // A stop during the final sleep must not complete the phase
    if cancel.is_cancelled() {
        display.show(STOPPED_TEXT.to_string());
        return CountdownOutcome::Cancelled;
    }

    display.show(phase.label(0));
    debug!("Countdown {:?} completed", phase);
    CountdownOutcome::Completed
}
