//! Headless view host
//!
//! Stands in for the rendering engine when none is embedded: every call is
//! logged and appended to a shared journal that callers can inspect.

use std::cell::RefCell;
use std::rc::Rc;
use url::Url;

use crate::error::ViewHostError;
use crate::session::SessionId;
use crate::view::{InputEvent, NavigationCommand, ViewHost, ViewHostFactory};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEventKind {
    Navigate(Url),
    Focus,
    Input(InputEvent),
    Command(NavigationCommand),
    Released,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEvent {
    pub session: SessionId,
    pub kind: ViewEventKind,
}

/// Shared, append-only record of view activity
#[derive(Debug, Clone, Default)]
pub struct ViewJournal {
    events: Rc<RefCell<Vec<ViewEvent>>>,
}

impl ViewJournal {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.borrow().clone()
    }

    pub fn for_session(&self, session: SessionId) -> Vec<ViewEventKind> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.session == session)
            .map(|e| e.kind.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, session: SessionId, kind: ViewEventKind) {
        self.events.borrow_mut().push(ViewEvent { session, kind });
    }
}

pub struct HeadlessViewHost {
    session: SessionId,
    journal: ViewJournal,
    paste_supported: bool,
    released: bool,
}

impl HeadlessViewHost {
    pub fn new(session: SessionId, journal: ViewJournal) -> Self {
        Self {
            session,
            journal,
            paste_supported: true,
            released: false,
        }
    }

    /// Views without paste support force the keystroke fallback
    pub fn with_paste_support(mut self, supported: bool) -> Self {
        self.paste_supported = supported;
        self
    }

    fn ensure_live(&self) -> Result<(), ViewHostError> {
        if self.released {
            return Err(ViewHostError::Released);
        }
        Ok(())
    }
}

impl ViewHost for HeadlessViewHost {
    fn navigate(&mut self, url: &Url) -> Result<(), ViewHostError> {
        self.ensure_live()?;
        tracing::debug!(session_id = %self.session, url = %url, "View navigate");
        self.journal
            .push(self.session, ViewEventKind::Navigate(url.clone()));
        Ok(())
    }

    fn focus(&mut self) -> Result<(), ViewHostError> {
        self.ensure_live()?;
        tracing::debug!(session_id = %self.session, "View focus");
        self.journal.push(self.session, ViewEventKind::Focus);
        Ok(())
    }

    fn dispatch(&mut self, event: &InputEvent) -> Result<(), ViewHostError> {
        self.ensure_live()?;
        if *event == InputEvent::Paste && !self.paste_supported {
            return Err(ViewHostError::Unsupported("paste".to_string()));
        }
        tracing::trace!(session_id = %self.session, event = ?event, "View input");
        self.journal
            .push(self.session, ViewEventKind::Input(event.clone()));
        Ok(())
    }

    fn command(&mut self, command: NavigationCommand) -> Result<(), ViewHostError> {
        self.ensure_live()?;
        tracing::debug!(session_id = %self.session, command = %command, "View command");
        self.journal
            .push(self.session, ViewEventKind::Command(command));
        Ok(())
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            tracing::debug!(session_id = %self.session, "View released");
            self.journal.push(self.session, ViewEventKind::Released);
        }
    }
}

/// Builds [`HeadlessViewHost`]s that all write to one journal
#[derive(Debug, Clone)]
pub struct HeadlessFactory {
    journal: ViewJournal,
    paste_supported: bool,
    fail_next: bool,
}

impl HeadlessFactory {
    pub fn new() -> Self {
        Self {
            journal: ViewJournal::default(),
            paste_supported: true,
            fail_next: false,
        }
    }

    pub fn with_paste_support(mut self, supported: bool) -> Self {
        self.paste_supported = supported;
        self
    }

    pub fn journal(&self) -> ViewJournal {
        self.journal.clone()
    }

    /// Make the next `create` call fail, as a renderer out of resources would
    pub fn fail_next_create(&mut self) {
        self.fail_next = true;
    }
}

impl Default for HeadlessFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewHostFactory for HeadlessFactory {
    fn create(&mut self, session_id: SessionId) -> Result<Box<dyn ViewHost>, ViewHostError> {
        if std::mem::take(&mut self.fail_next) {
            return Err(ViewHostError::Creation(
                "renderer refused a new view".to_string(),
            ));
        }

        Ok(Box::new(
            HeadlessViewHost::new(session_id, self.journal.clone())
                .with_paste_support(self.paste_supported),
        ))
    }
}
