//! Eye Reminder Library
//!
//! Break reminder timer shared by the GUI binary:
//! - Countdown engine and reminder plans run on a background thread
//! - Busy check suppresses popups during Teams calls
//! - Tray controller hides the window to the system tray

pub mod busy;
pub mod config;
pub mod countdown;
pub mod error;
pub mod gui;
pub mod input;
pub mod notify;
pub mod reminder;
pub mod session;
pub mod shell;
pub mod tray;

#[cfg(test)]
mod testing;
