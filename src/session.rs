//! Run state for the single active reminder

use crate::countdown::CancellationToken;
use crate::error::SessionError;
use parking_lot::Mutex;
use tracing::{debug, info};

/// Handed to the countdown thread of one run
#[derive(Debug, Clone)]
pub struct RunTicket {
    pub generation: u64,
    pub cancel: CancellationToken,
}

#[derive(Debug, Default)]
struct SessionState {
    running: bool,
    generation: u64,
    cancel: CancellationToken,
}

/// Running flag, run generation and cancellation token.
///
/// Each start mints a fresh token, so cancelling one run never leaks into
/// the next.
#[derive(Debug, Default)]
pub struct Session {
    state: Mutex<SessionState>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    /// Generation of the most recent run (0 before the first start)
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    /// Mark running and issue a ticket, unless a run is already active
    pub fn begin(&self) -> Result<RunTicket, SessionError> {
        let mut state = self.state.lock();
        if state.running {
            return Err(SessionError::AlreadyRunning);
        }

        state.generation += 1;
        state.cancel = CancellationToken::new();
        state.running = true;
        info!("Reminder run {} started", state.generation);

        Ok(RunTicket {
            generation: state.generation,
            cancel: state.cancel.clone(),
        })
    }

    /// Cancel the active run
    pub fn stop(&self) -> Result<(), SessionError> {
        let mut state = self.state.lock();
        if !state.running {
            return Err(SessionError::NotRunning);
        }

        state.cancel.cancel();
        state.running = false;
        info!("Reminder run {} stopped", state.generation);
        Ok(())
    }

    /// Called by a run's thread when it exits; stale generations are ignored
    pub fn finish(&self, generation: u64) {
        let mut state = self.state.lock();
        if state.generation == generation && state.running {
            state.running = false;
            debug!("Reminder run {} finished", generation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_then_stop() {
        let session = Session::new();
        assert!(!session.is_running());

        let ticket = session.begin().unwrap();
        assert_eq!(ticket.generation, 1);
        assert!(session.is_running());
        assert!(!ticket.cancel.is_cancelled());

        session.stop().unwrap();
        assert!(!session.is_running());
        assert!(ticket.cancel.is_cancelled());
    }

    #[test]
    fn test_second_begin_is_rejected() {
        let session = Session::new();
        let first = session.begin().unwrap();

        assert_eq!(session.begin().unwrap_err(), SessionError::AlreadyRunning);
        assert_eq!(session.generation(), first.generation);
        assert!(!first.cancel.is_cancelled());
        assert!(session.is_running());
    }

    #[test]
    fn test_stop_while_idle_does_not_touch_next_run() {
        let session = Session::new();
        assert_eq!(session.stop().unwrap_err(), SessionError::NotRunning);

        let ticket = session.begin().unwrap();
        assert!(!ticket.cancel.is_cancelled());
    }

    #[test]
    fn test_restart_gets_fresh_token() {
        let session = Session::new();
        let first = session.begin().unwrap();
        session.stop().unwrap();

        let second = session.begin().unwrap();
        assert_eq!(second.generation, 2);
        assert!(first.cancel.is_cancelled());
        assert!(!second.cancel.is_cancelled());
    }

    #[test]
    fn test_stale_finish_is_ignored() {
        let session = Session::new();
        let first = session.begin().unwrap();
        session.stop().unwrap();
        let _second = session.begin().unwrap();

        session.finish(first.generation);
        assert!(session.is_running());

        session.finish(2);
        assert!(!session.is_running());
    }
}
