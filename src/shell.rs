//! App Shell: start/stop wiring between the input panel, the session and the
//! countdown thread, independent of the GUI toolkit.
//!
//! The countdown thread never touches UI state. It sends `EngineEvent`s over a
//! channel which the UI thread drains with [`ReminderShell::pump_events`].

use crate::busy::{DesktopWindows, WindowTitles};
use crate::config::ReminderConfig;
use crate::countdown::{CountdownOutcome, DisplaySink, SecondTicker, Ticker, IDLE_TEXT};
use crate::error::ShellError;
use crate::input::{SharedInputs, TimerInputs};
use crate::notify::{DialogNotifier, Notice, Notifier};
use crate::reminder::{run_reminder, ReminderContext, ReminderPlan};
use crate::session::Session;
use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

/// Messages from the countdown thread to the UI thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Display { generation: u64, text: String },
    Finished { generation: u64, outcome: CountdownOutcome },
}

/// Display sink that forwards to the UI thread, tagged with its run
struct ChannelDisplay {
    generation: u64,
    tx: Sender<EngineEvent>,
}

impl DisplaySink for ChannelDisplay {
    fn show(&self, text: String) {
        let _ = self.tx.send(EngineEvent::Display {
            generation: self.generation,
            text,
        });
    }
}

/// External collaborators of a run
#[derive(Clone)]
pub struct Services {
    pub notifier: Arc<dyn Notifier>,
    pub windows: Arc<dyn WindowTitles>,
    pub ticker: Arc<dyn Ticker>,
}

impl Services {
    /// Message boxes, the desktop's window list and a real one-second tick
    pub fn desktop() -> Self {
        Services {
            notifier: Arc::new(DialogNotifier),
            windows: Arc::new(DesktopWindows),
            ticker: Arc::new(SecondTicker),
        }
    }
}

pub struct ReminderShell {
    session: Arc<Session>,
    inputs: SharedInputs,
    display: String,
    services: Services,
    events_tx: Sender<EngineEvent>,
    events_rx: Receiver<EngineEvent>,
    worker: Option<JoinHandle<()>>,
}

impl ReminderShell {
    pub fn new(config: &ReminderConfig, services: Services) -> Self {
        let (events_tx, events_rx) = channel::unbounded();
        ReminderShell {
            session: Arc::new(Session::new()),
            inputs: Arc::new(Mutex::new(TimerInputs::from_config(config))),
            display: IDLE_TEXT.to_string(),
            services,
            events_tx,
            events_rx,
            worker: None,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn inputs(&self) -> TimerInputs {
        self.inputs.lock().clone()
    }

    pub fn set_long_break(&self, value: String) {
        self.inputs.lock().long_break = value;
    }

    pub fn set_short_break(&self, value: String) {
        self.inputs.lock().short_break = value;
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    pub fn notify(&self, notice: &Notice) {
        self.services.notifier.notify(notice);
    }

    /// Show `err` on the notification surface
    pub fn report(&self, err: &ShellError) {
        self.notify(&Notice::from(err));
    }

    /// Validate the fields and start the repeating long/short break cycle
    pub fn start_cycle(&mut self) -> Result<(), ShellError> {
        let durations = self.inputs.lock().parse()?;
        self.launch(ReminderPlan::Cycle(durations))
    }

    /// Start a one-shot reminder
    pub fn start_once(&mut self, seconds: u64) -> Result<(), ShellError> {
        self.launch(ReminderPlan::Once { seconds })
    }

    pub fn stop(&mut self) -> Result<(), ShellError> {
        self.session.stop()?;
        Ok(())
    }

    /// Cancel any active run; used on exit
    pub fn shutdown(&mut self) {
        if self.session.stop().is_ok() {
            info!("Active reminder cancelled on exit");
        }
    }

    fn launch(&mut self, plan: ReminderPlan) -> Result<(), ShellError> {
        let ticket = self.session.begin()?;
        let generation = ticket.generation;

        if let Some(previous) = self.worker.take() {
            if !previous.is_finished() {
                debug!("Previous countdown thread still winding down");
            }
        }

        let ctx = ReminderContext {
            display: Box::new(ChannelDisplay {
                generation,
                tx: self.events_tx.clone(),
            }),
            notifier: self.services.notifier.clone(),
            windows: self.services.windows.clone(),
            ticker: self.services.ticker.clone(),
            inputs: self.inputs.clone(),
            cancel: ticket.cancel,
        };
        let session = self.session.clone();
        let tx = self.events_tx.clone();

        let spawned = thread::Builder::new()
            .name(format!("countdown-{}", generation))
            .spawn(move || {
                let outcome = run_reminder(plan, &ctx);
                session.finish(generation);
                let _ = tx.send(EngineEvent::Finished {
                    generation,
                    outcome,
                });
            });

        match spawned {
            Ok(handle) => {
                info!("Started {:?} (run {})", plan, generation);
                self.worker = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.session.finish(generation);
                Err(e.into())
            }
        }
    }

    /// Apply pending engine events on the UI thread. Events from runs other
    /// than the latest are dropped.
    pub fn pump_events(&mut self) {
        let current = self.session.generation();
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                EngineEvent::Display { generation, text } if generation == current => {
                    self.display = text;
                }
                EngineEvent::Display { generation, .. } => {
                    debug!("Dropping display update from stale run {}", generation);
                }
                EngineEvent::Finished {
                    generation,
                    outcome,
                } => {
                    info!("Run {} ended: {:?}", generation, outcome);
                }
            }
        }
    }

    #[cfg(test)]
    fn join_worker(&mut self) {
        if let Some(handle) = self.worker.take() {
            handle.join().unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::STOPPED_TEXT;
    use crate::error::{DurationField, InputError, SessionError};
    use crate::notify::NoticeLevel;
    use crate::testing::{CountingTicker, RecordingNotifier, StaticWindows};
    use std::time::Duration;

    fn shell_with(ticker: CountingTicker, titles: &[&str]) -> (ReminderShell, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let services = Services {
            notifier: notifier.clone(),
            windows: Arc::new(StaticWindows::new(titles)),
            ticker: Arc::new(ticker),
        };
        (ReminderShell::new(&ReminderConfig::default(), services), notifier)
    }

    #[test]
    fn test_initial_display() {
        let (shell, _) = shell_with(CountingTicker::default(), &[]);
        assert_eq!(shell.display(), "Please start timer");
        assert!(!shell.is_running());
    }

    #[test]
    fn test_invalid_input_changes_nothing() {
        let (mut shell, _) = shell_with(CountingTicker::default(), &[]);
        for (long, short) in [("", "20"), ("abc", "20"), ("20", ""), ("20", "x1"), ("0", "20")] {
            shell.set_long_break(long.to_string());
            shell.set_short_break(short.to_string());

            let err = shell.start_cycle().unwrap_err();
            assert!(matches!(err, ShellError::Input(_)), "{:?}", err);
            assert!(!shell.is_running());
            assert_eq!(shell.session.generation(), 0);
        }
    }

    #[test]
    fn test_report_shows_field_specific_error() {
        let (mut shell, notifier) = shell_with(CountingTicker::default(), &[]);
        shell.set_short_break("soon".to_string());

        let err = shell.start_cycle().unwrap_err();
        shell.report(&err);

        let notices = notifier.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(
            notices[0].body,
            InputError::NotNumeric(DurationField::ShortBreak).to_string()
        );
    }

    #[test]
    fn test_once_runs_to_completion() {
        let (mut shell, notifier) = shell_with(CountingTicker::default(), &[]);

        shell.start_once(3).unwrap();
        shell.join_worker();
        shell.pump_events();

        assert!(!shell.is_running());
        assert_eq!(shell.display(), "Time left: 0 hr 0 min 0 sec");
        assert_eq!(
            notifier.notices(),
            vec![Notice::reminder("Reminder after 0 hr 0 min 3 sec!")]
        );
    }

    #[test]
    fn test_start_while_running_is_rejected() {
        let (mut shell, _) = shell_with(CountingTicker::with_delay(Duration::from_millis(5)), &[]);

        shell.start_cycle().unwrap();
        let err = shell.start_cycle().unwrap_err();
        assert!(matches!(err, ShellError::Session(SessionError::AlreadyRunning)));
        let err = shell.start_once(10).unwrap_err();
        assert!(matches!(err, ShellError::Session(SessionError::AlreadyRunning)));
        assert_eq!(shell.session.generation(), 1);
        assert!(shell.is_running());

        shell.stop().unwrap();
        shell.join_worker();
    }

    #[test]
    fn test_stop_shows_stopped_message() {
        let (mut shell, notifier) = shell_with(CountingTicker::with_delay(Duration::from_millis(5)), &[]);

        shell.start_cycle().unwrap();
        shell.stop().unwrap();
        assert!(!shell.is_running());
        shell.join_worker();
        shell.pump_events();

        assert_eq!(shell.display(), STOPPED_TEXT);
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_stop_while_idle_warns() {
        let (mut shell, _) = shell_with(CountingTicker::default(), &[]);
        let err = shell.stop().unwrap_err();
        assert!(matches!(err, ShellError::Session(SessionError::NotRunning)));

        // the next run is unaffected
        shell.start_once(2).unwrap();
        shell.join_worker();
        shell.pump_events();
        assert_eq!(shell.display(), "Time left: 0 hr 0 min 0 sec");
    }

    #[test]
    fn test_stale_display_events_are_dropped() {
        let (mut shell, _) = shell_with(CountingTicker::default(), &[]);
        shell.start_once(1).unwrap();
        shell.join_worker();
        shell.pump_events();

        shell
            .events_tx
            .send(EngineEvent::Display {
                generation: 0,
                text: "stale".to_string(),
            })
            .unwrap();
        shell.pump_events();

        assert_eq!(shell.display(), "Time left: 0 hr 0 min 0 sec");
    }

    #[test]
    fn test_in_call_suppresses_popup() {
        let (mut shell, notifier) = shell_with(
            CountingTicker::default(),
            &["Engineering Sync | Microsoft Teams"],
        );

        shell.start_once(2).unwrap();
        shell.join_worker();

        assert!(!shell.is_running());
        assert!(notifier.notices().is_empty());
    }
}
