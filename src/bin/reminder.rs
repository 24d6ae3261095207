//! Eye Reminder - Main GUI Process
//!
//! Break reminder window with:
//! - Repeating long/short break cycle and one-shot presets
//! - Teams call detection to hold back popups
//! - Minimize to system tray

#![windows_subsystem = "windows"]

use eye_reminder::config::ReminderConfig;
use eye_reminder::gui;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Eye Reminder starting...");

    gui::run(ReminderConfig::default())?;

    tracing::info!("Eye Reminder exited");
    Ok(())
}
