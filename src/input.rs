//! Input panel: the long/short break fields and their validation

use crate::config::ReminderConfig;
use crate::error::{DurationField, InputError};
use parking_lot::Mutex;
use std::sync::Arc;

/// Raw text of the duration fields, shared with the countdown thread
pub type SharedInputs = Arc<Mutex<TimerInputs>>;

/// Field contents exactly as the user typed them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerInputs {
    /// Minutes between breaks
    pub long_break: String,
    /// Seconds a break lasts
    pub short_break: String,
}

impl TimerInputs {
    pub fn from_config(config: &ReminderConfig) -> Self {
        TimerInputs {
            long_break: config.long_break_minutes.to_string(),
            short_break: config.short_break_seconds.to_string(),
        }
    }

    /// Validate both fields, long break first
    pub fn parse(&self) -> Result<BreakDurations, InputError> {
        Ok(BreakDurations {
            long_break_minutes: self.long_break_minutes()?,
            short_break_seconds: self.short_break_seconds()?,
        })
    }

    pub fn long_break_minutes(&self) -> Result<u64, InputError> {
        parse_field(&self.long_break, DurationField::LongBreak)
    }

    pub fn short_break_seconds(&self) -> Result<u64, InputError> {
        parse_field(&self.short_break, DurationField::ShortBreak)
    }
}

impl Default for TimerInputs {
    fn default() -> Self {
        Self::from_config(&ReminderConfig::default())
    }
}

/// Validated durations for one reminder cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakDurations {
    pub long_break_minutes: u64,
    pub short_break_seconds: u64,
}

impl BreakDurations {
    pub fn long_break_secs(&self) -> u64 {
        self.long_break_minutes.saturating_mul(60)
    }

    pub fn short_break_secs(&self) -> u64 {
        self.short_break_seconds
    }
}

fn parse_field(raw: &str, field: DurationField) -> Result<u64, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Missing(field));
    }

    let value: u64 = trimmed
        .parse()
        .map_err(|_| InputError::NotNumeric(field))?;

    if value == 0 {
        return Err(InputError::NotPositive(field));
    }
    Ok(value)
}
