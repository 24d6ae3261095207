//! Busy Check
//!
//! Looks at the titles of the open top-level windows and guesses whether the
//! user is in a Microsoft Teams call. A meeting window is titled
//! `"<meeting> | Microsoft Teams"`; the calendar and people views use the same
//! pattern and are excluded. The result only gates whether a reminder popup
//! is shown, never whether the timer runs.

use crate::error::BusyCheckError;
use tracing::debug;

const CALL_APP_SUFFIX: &str = "| Microsoft Teams";

const NON_CALL_VIEWS: [&str; 2] = ["Calendar | Microsoft Teams", "People | Microsoft Teams"];

/// Source of currently open window titles
pub trait WindowTitles: Send + Sync {
    fn window_titles(&self) -> Result<Vec<String>, BusyCheckError>;
}

/// True if `title` looks like a Teams call window
pub fn is_call_title(title: &str) -> bool {
    title.matches('|').count() == 1
        && title.ends_with(CALL_APP_SUFFIX)
        && !NON_CALL_VIEWS.contains(&title)
}

/// True if any open window looks like a call; enumeration failure means no
pub fn in_active_call(source: &dyn WindowTitles) -> bool {
    match source.window_titles() {
        Ok(titles) => match titles.iter().find(|t| is_call_title(t)) {
            Some(title) => {
                debug!("Busy check matched window {:?}", title);
                true
            }
            None => false,
        },
        Err(e) => {
            debug!("Busy check unavailable, treating as not busy: {}", e);
            false
        }
    }
}

/// Visible top-level windows of the current desktop
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopWindows;

#[cfg(windows)]
impl WindowTitles for DesktopWindows {
    fn window_titles(&self) -> Result<Vec<String>, BusyCheckError> {
        use windows::Win32::Foundation::LPARAM;
        use windows::Win32::UI::WindowsAndMessaging::EnumWindows;

        let mut titles: Vec<String> = Vec::new();
        unsafe {
            EnumWindows(
                Some(win32::collect_title),
                LPARAM(&mut titles as *mut Vec<String> as isize),
            )
        }
        .map_err(|e| BusyCheckError::Enumeration(e.to_string()))?;

        Ok(titles)
    }
}

#[cfg(not(windows))]
impl WindowTitles for DesktopWindows {
    fn window_titles(&self) -> Result<Vec<String>, BusyCheckError> {
        Err(BusyCheckError::Unsupported)
    }
}

#[cfg(windows)]
mod win32 {
    use windows::Win32::Foundation::{BOOL, HWND, LPARAM};
    use windows::Win32::UI::WindowsAndMessaging::{
        GetWindowTextLengthW, GetWindowTextW, IsWindowVisible,
    };

    /// `EnumWindows` callback; `lparam` points at the caller's `Vec<String>`
    pub(super) unsafe extern "system" fn collect_title(hwnd: HWND, lparam: LPARAM) -> BOOL {
        let titles = &mut *(lparam.0 as *mut Vec<String>);

        if IsWindowVisible(hwnd).as_bool() {
            let len = GetWindowTextLengthW(hwnd);
            if len > 0 {
                let mut buf = vec![0u16; len as usize + 1];
                let copied = GetWindowTextW(hwnd, &mut buf);
                if copied > 0 {
                    titles.push(String::from_utf16_lossy(&buf[..copied as usize]));
                }
            }
        }

        // keep enumerating
        BOOL(1)
    }
}
