//! Error types surfaced to the user as dialogs

use std::fmt;
use thiserror::Error;

/// Which duration field an input error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationField {
    LongBreak,
    ShortBreak,
}

impl fmt::Display for DurationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationField::LongBreak => f.write_str("Long break"),
            DurationField::ShortBreak => f.write_str("Short break"),
        }
    }
}

/// Invalid duration field contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{0} value must be entered.")]
    Missing(DurationField),
    #[error("{0} value must be numerical.")]
    NotNumeric(DurationField),
    #[error("{0} value must be greater than zero.")]
    NotPositive(DurationField),
}

/// Start/stop requests that conflict with the current run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("A reminder is already running!")]
    AlreadyRunning,
    #[error("No active reminder to stop!")]
    NotRunning,
}

/// Window enumeration failures; always treated as "not busy"
#[derive(Debug, Error)]
pub enum BusyCheckError {
    #[error("window enumeration is not supported on this platform")]
    Unsupported,
    #[error("window enumeration failed: {0}")]
    Enumeration(String),
}

/// Anything the shell can reject a user action with
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("failed to spawn countdown thread: {0}")]
    Spawn(#[from] std::io::Error),
}
