//! Reminder plans built from countdown phases
//!
//! A plan runs on the countdown thread. Notifications fire at phase
//! boundaries and are skipped while the busy check reports a call.

use crate::busy::{in_active_call, WindowTitles};
use crate::countdown::{
    format_hms, run_countdown, CancellationToken, CountdownOutcome, DisplaySink, PhaseKind, Ticker,
};
use crate::error::InputError;
use crate::input::{BreakDurations, SharedInputs};
use crate::notify::{Notice, Notifier};
use std::sync::Arc;
use tracing::{info, warn};

pub const TAKE_BREAK: &str = "Take a break!";
pub const BREAK_OVER: &str = "Break over! Back to work!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderPlan {
    /// Alternate work and break phases until stopped. Durations are re-read
    /// from the input fields at the top of every phase.
    Cycle(BreakDurations),
    /// Count down once and remind
    Once { seconds: u64 },
}

/// Everything one run needs, moved onto the countdown thread
pub struct ReminderContext {
    pub display: Box<dyn DisplaySink>,
    pub notifier: Arc<dyn Notifier>,
    pub windows: Arc<dyn WindowTitles>,
    pub ticker: Arc<dyn Ticker>,
    pub inputs: SharedInputs,
    pub cancel: CancellationToken,
}

impl ReminderContext {
    fn countdown(&self, seconds: u64, phase: PhaseKind) -> CountdownOutcome {
        run_countdown(
            seconds,
            phase,
            self.display.as_ref(),
            &self.cancel,
            self.ticker.as_ref(),
        )
    }

    fn remind(&self, body: String) {
        if in_active_call(self.windows.as_ref()) {
            info!("In a call, skipping reminder: {}", body);
            return;
        }
        self.notifier.notify(&Notice::reminder(body));
    }

    /// Current field values; an invalid field keeps its last valid value
    fn refresh(&self, last: BreakDurations) -> BreakDurations {
        let fields = self.inputs.lock().clone();
        BreakDurations {
            long_break_minutes: fields
                .long_break_minutes()
                .unwrap_or_else(|e| keep_previous(e, last.long_break_minutes)),
            short_break_seconds: fields
                .short_break_seconds()
                .unwrap_or_else(|e| keep_previous(e, last.short_break_seconds)),
        }
    }
}

fn keep_previous(err: InputError, previous: u64) -> u64 {
    warn!("{} Keeping previous value {}", err, previous);
    previous
}

/// Run `plan` until it completes or is cancelled
pub fn run_reminder(plan: ReminderPlan, ctx: &ReminderContext) -> CountdownOutcome {
    match plan {
        ReminderPlan::Once { seconds } => {
            let outcome = ctx.countdown(seconds, PhaseKind::Once);
            if outcome == CountdownOutcome::Completed {
                ctx.remind(format!("Reminder after {}!", format_hms(seconds)));
            }
            outcome
        }
        ReminderPlan::Cycle(initial) => {
            let mut durations = initial;
            loop {
                durations = ctx.refresh(durations);
                if ctx.countdown(durations.long_break_secs(), PhaseKind::Work)
                    == CountdownOutcome::Cancelled
                {
                    return CountdownOutcome::Cancelled;
                }
                ctx.remind(TAKE_BREAK.to_string());

                durations = ctx.refresh(durations);
                if ctx.countdown(durations.short_break_secs(), PhaseKind::Break)
                    == CountdownOutcome::Cancelled
                {
                    return CountdownOutcome::Cancelled;
                }
                ctx.remind(BREAK_OVER.to_string());
            }
        }
    }
}
