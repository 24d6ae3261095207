//! In-crate fakes for unit tests

use crate::busy::WindowTitles;
use crate::countdown::{CancellationToken, DisplaySink, Ticker};
use crate::error::BusyCheckError;
use crate::notify::{Notice, Notifier};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Collects every display update
#[derive(Clone, Default)]
pub struct RecordingDisplay {
    texts: Arc<Mutex<Vec<String>>>,
}

impl RecordingDisplay {
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().clone()
    }
}

impl DisplaySink for RecordingDisplay {
    fn show(&self, text: String) {
        self.texts.lock().push(text);
    }
}

type TickHook = Box<dyn FnMut() + Send>;

#[derive(Default)]
struct TickerState {
    count: AtomicUsize,
    hooks: Mutex<Vec<(usize, TickHook)>>,
    delay: Option<Duration>,
}

/// Ticker that never sleeps (unless given a delay) and runs hooks on chosen ticks
#[derive(Clone, Default)]
pub struct CountingTicker {
    state: Arc<TickerState>,
}

impl CountingTicker {
    pub fn with_delay(delay: Duration) -> Self {
        CountingTicker {
            state: Arc::new(TickerState {
                delay: Some(delay),
                ..Default::default()
            }),
        }
    }

    /// Cancels `token` once the `tick`-th tick has happened
    pub fn cancelling_at(tick: usize, token: CancellationToken) -> Self {
        let ticker = Self::default();
        ticker.on_tick(tick, move || token.cancel());
        ticker
    }

    pub fn on_tick(&self, tick: usize, hook: impl FnMut() + Send + 'static) {
        self.state.hooks.lock().push((tick, Box::new(hook)));
    }

    pub fn count(&self) -> usize {
        self.state.count.load(Ordering::SeqCst)
    }
}

impl Ticker for CountingTicker {
    fn tick(&self) {
        if let Some(delay) = self.state.delay {
            std::thread::sleep(delay);
        }
        let n = self.state.count.fetch_add(1, Ordering::SeqCst) + 1;
        for (at, hook) in self.state.hooks.lock().iter_mut() {
            if *at == n {
                hook();
            }
        }
    }
}

/// Remembers notices instead of showing dialogs
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().push(notice.clone());
    }
}

/// Fixed window title list, or an enumeration failure
pub struct StaticWindows {
    titles: Option<Vec<String>>,
}

impl StaticWindows {
    pub fn new(titles: &[&str]) -> Self {
        StaticWindows {
            titles: Some(titles.iter().map(|t| t.to_string()).collect()),
        }
    }

    pub fn failing() -> Self {
        StaticWindows { titles: None }
    }
}

impl WindowTitles for StaticWindows {
    fn window_titles(&self) -> Result<Vec<String>, BusyCheckError> {
        self.titles
            .clone()
            .ok_or_else(|| BusyCheckError::Enumeration("access denied".to_string()))
    }
}
