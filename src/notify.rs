/// User-visible notifications
///
/// Every dialog the application shows (input errors, state warnings and the
/// break reminders themselves) goes through the `Notifier` trait so the
/// countdown thread and the GUI share one surface.
use crate::error::ShellError;
use rfd::{MessageButtons, MessageDialog, MessageLevel};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A titled message for the notification surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn info(title: &str, body: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, body)
    }

    pub fn warning(title: &str, body: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title, body)
    }

    pub fn error(title: &str, body: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, body)
    }

    fn new(level: NoticeLevel, title: &str, body: impl Into<String>) -> Self {
        Notice {
            level,
            title: title.to_string(),
            body: body.into(),
        }
    }

    /// Break reminder shown at the end of a phase
    pub fn reminder(body: impl Into<String>) -> Self {
        Self::info("Reminder", body)
    }
}

impl From<&ShellError> for Notice {
    fn from(err: &ShellError) -> Self {
        match err {
            ShellError::Input(e) => Notice::error("Input Error", e.to_string()),
            ShellError::Session(e) => Notice::warning("Warning", e.to_string()),
            ShellError::Spawn(e) => Notice::error("Error", format!("Could not start the reminder: {}", e)),
        }
    }
}

/// Shows notices to the user. Implementations may block until acknowledged.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Native blocking message box
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogNotifier;

impl Notifier for DialogNotifier {
    fn notify(&self, notice: &Notice) {
        info!("Showing {:?} dialog: {}", notice.level, notice.body);

        let level = match notice.level {
            NoticeLevel::Info => MessageLevel::Info,
            NoticeLevel::Warning => MessageLevel::Warning,
            NoticeLevel::Error => MessageLevel::Error,
        };

        let _ = MessageDialog::new()
            .set_level(level)
            .set_title(notice.title.as_str())
            .set_description(notice.body.as_str())
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
