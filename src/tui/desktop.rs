//! Clipboard and browser collaborators.
//!
//! Failures are reported to the caller, which logs and ignores them.

use std::fmt;
use std::sync::Mutex;

use arboard::Clipboard;
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopError {
    Clipboard(String),
    Browser(String),
}

impl fmt::Display for DesktopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesktopError::Clipboard(msg) => write!(f, "clipboard error: {msg}"),
            DesktopError::Browser(msg) => write!(f, "browser error: {msg}"),
        }
    }
}

impl std::error::Error for DesktopError {}

pub trait Desktop: Send + Sync {
    fn open_url(&self, url: &str) -> Result<(), DesktopError>;
    fn copy_text(&self, text: &str) -> Result<(), DesktopError>;
}

/// The user's browser and system clipboard.
///
/// The clipboard handle is opened on first use and kept, since on X11 the
/// copied text disappears when its owner is dropped.
#[derive(Default)]
pub struct SystemDesktop {
    clipboard: Mutex<Option<Clipboard>>,
}

impl SystemDesktop {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Desktop for SystemDesktop {
    fn open_url(&self, url: &str) -> Result<(), DesktopError> {
        debug!("Opening {} in browser", url);
        webbrowser::open(url).map_err(|e| DesktopError::Browser(e.to_string()))
    }

    fn copy_text(&self, text: &str) -> Result<(), DesktopError> {
        let mut slot = self
            .clipboard
            .lock()
            .map_err(|_| DesktopError::Clipboard("clipboard lock poisoned".to_string()))?;
        if slot.is_none() {
            let clipboard = Clipboard::new()
                .map_err(|e| DesktopError::Clipboard(format!("Failed to access clipboard: {e}")))?;
            *slot = Some(clipboard);
        }
        let Some(clipboard) = slot.as_mut() else {
            return Err(DesktopError::Clipboard("clipboard unavailable".to_string()));
        };
        clipboard
            .set_text(text.to_string())
            .map_err(|e| DesktopError::Clipboard(format!("Failed to copy to clipboard: {e}")))?;
        debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }
}
