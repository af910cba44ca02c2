//! Clipboard side channel
//!
//! Writing the clipboard is visible outside the process: other applications
//! can read a macro's text after it has been pasted.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ClipboardError;

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    fn text(&mut self) -> Result<String, ClipboardError>;
}

/// The desktop clipboard
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::Write(e.to_string()))?;

        // X11/Wayland middle-click selection too, best-effort
        #[cfg(all(
            unix,
            not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
        ))]
        {
            use arboard::{LinuxClipboardKind, SetExtLinux};

            if let Err(e) = self
                .inner
                .set()
                .clipboard(LinuxClipboardKind::Primary)
                .text(text.to_owned())
            {
                tracing::debug!(error = %e, "Primary selection not updated");
            }
        }

        Ok(())
    }

    fn text(&mut self) -> Result<String, ClipboardError> {
        self.inner
            .get_text()
            .map_err(|e| ClipboardError::Read(e.to_string()))
    }
}

/// Process-local clipboard for hosts without a desktop session
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Rc<RefCell<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }

    fn text(&mut self) -> Result<String, ClipboardError> {
        self.contents
            .borrow()
            .clone()
            .ok_or_else(|| ClipboardError::Read("clipboard is empty".to_string()))
    }
}
