//! Input Injector
//!
//! Delivers text to the active session only. The clipboard + paste route
//! avoids translating arbitrary Unicode into key events; typing is the
//! fallback when there is no clipboard or the view cannot paste.

use serde::Serialize;

use guacagui_tabs::{InputEvent, Key, SessionId, TabManager, ViewHostError};

use crate::clipboard::Clipboard;
use crate::error::InjectError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionStrategy {
    ClipboardPaste,
    Keystrokes,
    /// Empty text, nothing was sent
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InjectionReport {
    pub session: SessionId,
    pub strategy: InjectionStrategy,
    pub chars: usize,
}

pub struct InputInjector {
    clipboard: Option<Box<dyn Clipboard>>,
}

impl InputInjector {
    pub fn new(clipboard: Option<Box<dyn Clipboard>>) -> Self {
        Self { clipboard }
    }

    /// Keystrokes only
    pub fn without_clipboard() -> Self {
        Self { clipboard: None }
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    /// Deliver `text` to whichever session is active
    pub fn inject(
        &mut self,
        tabs: &mut TabManager,
        text: &str,
    ) -> Result<InjectionReport, InjectError> {
        let target = tabs.active_id().ok_or(InjectError::NoActiveSession)?;
        self.inject_into(tabs, target, text)
    }

    /// Deliver `text` to `target`, which must be the active session
    pub fn inject_into(
        &mut self,
        tabs: &mut TabManager,
        target: SessionId,
        text: &str,
    ) -> Result<InjectionReport, InjectError> {
        let active = tabs.active_id().ok_or(InjectError::NoActiveSession)?;
        if active != target {
            tracing::warn!(session_id = %target, "Refusing to inject into a background session");
            return Err(InjectError::InactiveTarget(target));
        }

        let chars = text.chars().count();
        if chars == 0 {
            return Ok(InjectionReport {
                session: target,
                strategy: InjectionStrategy::Skipped,
                chars,
            });
        }

        let session = tabs.active_mut().ok_or(InjectError::NoActiveSession)?;
        let view = session.view_mut();
        view.focus()?;

        if let Some(clipboard) = self.clipboard.as_mut() {
            match clipboard.set_text(text) {
                Ok(()) => match view.dispatch(&InputEvent::Paste) {
                    Ok(()) => {
                        tracing::info!(session_id = %target, chars, "Pasted macro text");
                        return Ok(InjectionReport {
                            session: target,
                            strategy: InjectionStrategy::ClipboardPaste,
                            chars,
                        });
                    }
                    Err(ViewHostError::Unsupported(what)) => {
                        tracing::debug!(session_id = %target, unsupported = %what, "View cannot paste, typing instead");
                    }
                    Err(e) => return Err(e.into()),
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Clipboard unavailable, typing instead");
                }
            }
        }

        view.inject_text(text)?;
        tracing::info!(session_id = %target, chars, "Typed macro text");

        Ok(InjectionReport {
            session: target,
            strategy: InjectionStrategy::Keystrokes,
            chars,
        })
    }

    /// Press `keys` together on the active session's view
    pub fn send_chord(
        &mut self,
        tabs: &mut TabManager,
        keys: Vec<Key>,
    ) -> Result<SessionId, InjectError> {
        let session = tabs.active_mut().ok_or(InjectError::NoActiveSession)?;
        let id = session.id();
        let view = session.view_mut();
        view.focus()?;
        view.dispatch(&InputEvent::Chord(keys))?;
        tracing::debug!(session_id = %id, "Sent key chord");
        Ok(id)
    }
}
