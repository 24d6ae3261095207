/// Configuration module for the Eye Reminder application.
///
/// This module holds the compile-time defaults the application starts with:
/// - The main window title and size
/// - Initial values of the long/short break fields
/// - One-shot reminder presets shown as buttons
/// - How often the GUI polls for engine and tray events
///
/// Nothing is read from or written to disk; every launch starts from
/// `ReminderConfig::default()`.
///
/// # Example
///
/// ```rust
/// use eye_reminder::config::ReminderConfig;
///
/// let config = ReminderConfig::default();
/// assert_eq!(config.long_break_minutes, 20);
/// assert_eq!(config.presets.len(), 3);
/// ```
use std::time::Duration;

/// A one-shot reminder offered as a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub label: &'static str,
    pub seconds: u64,
}

/// One-shot presets, in display order
pub const PRESETS: &[Preset] = &[
    Preset { label: "Remind after 20 min", seconds: 20 * 60 },
    Preset { label: "Remind after ~ 1 hr", seconds: 72 * 60 },
    Preset { label: "Remind after ~ 3 hr", seconds: 190 * 60 },
];

/// Starts a 20 minute reminder and hides the window to the tray
pub const CONTINUE_PRESET: Preset = Preset {
    label: "Continue - 20 Min",
    seconds: 20 * 60,
};

/// Application configuration
#[derive(Clone, Debug)]
pub struct ReminderConfig {
    pub window_title: &'static str,
    /// Window width and height in logical pixels
    pub window_size: (f32, f32),
    /// Initial value of the long break field (minutes)
    pub long_break_minutes: u64,
    /// Initial value of the short break field (seconds)
    pub short_break_seconds: u64,
    pub presets: &'static [Preset],
    pub continue_preset: Preset,
    /// Interval at which the GUI drains engine and tray events
    pub poll_interval: Duration,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        ReminderConfig {
            window_title: "Eye Reminder",
            window_size: (420.0, 420.0),
            long_break_minutes: 20,
            short_break_seconds: 20,
            presets: PRESETS,
            continue_preset: CONTINUE_PRESET,
            poll_interval: Duration::from_millis(50),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReminderConfig::default();
        assert_eq!(config.window_title, "Eye Reminder");
        assert_eq!(config.long_break_minutes, 20);
        assert_eq!(config.short_break_seconds, 20);
        assert_eq!(config.continue_preset.seconds, 1200);
    }

    #[test]
    fn test_presets_are_positive() {
        assert!(PRESETS.iter().all(|p| p.seconds > 0));
        assert_eq!(PRESETS[1].seconds, 4320);
        assert_eq!(PRESETS[2].seconds, 11400);
    }
}
