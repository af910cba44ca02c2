//! Tab Manager
//!
//! Owns the ordered sessions and the active pointer. After every mutation
//! the session at index `i` reports `position == i`.

use url::Url;

use crate::error::TabError;
use crate::session::{Session, SessionId, SessionInfo};
use crate::view::{NavigationCommand, ViewHostFactory};
use crate::Result;

pub struct TabManager {
    /// Sessions in tab order
    sessions: Vec<Session>,
    /// Currently focused session, `None` only when there are no sessions
    active: Option<SessionId>,
    /// Creates a renderer for each new session
    factory: Box<dyn ViewHostFactory>,
    /// Target for new sessions opened without a URL
    home_url: Url,
}

impl TabManager {
    pub fn new(factory: Box<dyn ViewHostFactory>, home_url: Url) -> Self {
        Self {
            sessions: Vec::new(),
            active: None,
            factory,
            home_url,
        }
    }

    pub fn home_url(&self) -> &Url {
        &self.home_url
    }

    /// Applied after a configuration reload; open sessions keep their URL
    pub fn set_home_url(&mut self, url: Url) {
        self.home_url = url;
    }

    /// Open a new session at the end of the tab order and make it active
    pub fn open_session(&mut self, url: Option<Url>) -> Result<SessionId> {
        let url = url.unwrap_or_else(|| self.home_url.clone());
        let id = SessionId::new();
        let view = self.factory.create(id)?;

        tracing::info!(session_id = %id, url = %url, "Opening session");

        let mut session = Session::new(id, url.clone(), self.sessions.len(), view);
        // Loading is the view's business; a refused navigate leaves the tab open
        if let Err(e) = session.navigate(url) {
            tracing::warn!(session_id = %id, error = %e, "Initial navigation failed");
        }
        self.sessions.push(session);

        self.focus_index(self.sessions.len() - 1);
        Ok(id)
    }

    /// Close a session and release its view; unknown ids are ignored
    ///
    /// Returns whether a session was closed.
    pub fn close_session(&mut self, id: SessionId) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::debug!(session_id = %id, "Close ignored, session not found");
            return false;
        };

        let session = self.sessions.remove(index);
        session.release();
        self.renumber();

        tracing::info!(session_id = %id, remaining = self.sessions.len(), "Closed session");

        if self.active == Some(id) {
            self.active = None;
            // Same index first, otherwise the one before it
            let next = if index < self.sessions.len() {
                Some(index)
            } else {
                index.checked_sub(1)
            };
            if let Some(next) = next {
                self.focus_index(next);
            }
        }

        true
    }

    /// Make `id` the active session and focus its view
    pub fn activate(&mut self, id: SessionId) -> Result<()> {
        let index = self.index_of(id).ok_or(TabError::NotFound(id))?;
        self.focus_index(index);
        Ok(())
    }

    /// Activate the session `offset` places away from the active one, wrapping
    pub fn activate_relative(&mut self, offset: isize) -> Result<SessionId> {
        let current = self.active_index().ok_or(TabError::NoActiveSession)?;
        let count = self.sessions.len() as isize;
        let next = (current as isize + offset).rem_euclid(count) as usize;
        self.focus_index(next);
        Ok(self.sessions[next].id())
    }

    /// Move a session to `new_index`, clamped to the tab range
    ///
    /// Untouched sessions keep their relative order. Returns whether the
    /// order changed.
    pub fn reorder(&mut self, id: SessionId, new_index: usize) -> Result<bool> {
        let current = self.index_of(id).ok_or(TabError::NotFound(id))?;
        let target = new_index.min(self.sessions.len() - 1);

        if current == target {
            return Ok(false);
        }

        let session = self.sessions.remove(current);
        self.sessions.insert(target, session);
        self.renumber();

        tracing::info!(session_id = %id, from = current, to = target, "Reordered session");

        Ok(true)
    }

    /// Point a session at a new URL
    pub fn navigate(&mut self, id: SessionId, url: Url) -> Result<()> {
        let session = self.get_mut(id).ok_or(TabError::NotFound(id))?;
        tracing::info!(session_id = %id, url = %url, "Navigating session");
        session.navigate(url)?;
        Ok(())
    }

    /// Send the active session back to the configured home URL
    pub fn navigate_home(&mut self) -> Result<SessionId> {
        let id = self.active.ok_or(TabError::NoActiveSession)?;
        let home = self.home_url.clone();
        self.navigate(id, home)?;
        Ok(id)
    }

    /// Run a toolbar command (back, forward, reload, stop) on the active view
    pub fn send_command(&mut self, command: NavigationCommand) -> Result<SessionId> {
        let session = self.active_mut().ok_or(TabError::NoActiveSession)?;
        session.command(command)?;
        Ok(session.id())
    }

    /// Page title reported by the view
    pub fn set_title(&mut self, id: SessionId, title: String) -> Result<()> {
        let session = self.get_mut(id).ok_or(TabError::NotFound(id))?;
        session.set_title(title);
        Ok(())
    }

    /// URL change reported by the view (redirects, in-page links)
    pub fn record_url(&mut self, id: SessionId, url: Url) -> Result<()> {
        let session = self.get_mut(id).ok_or(TabError::NotFound(id))?;
        if session.url() != &url {
            tracing::debug!(session_id = %id, url = %url, "Session URL changed");
            session.record_url(url);
        }
        Ok(())
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id() == id)
    }

    pub fn active_id(&self) -> Option<SessionId> {
        self.active
    }

    pub fn active(&self) -> Option<&Session> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut Session> {
        let id = self.active?;
        self.get_mut(id)
    }

    pub fn index_of(&self, id: SessionId) -> Option<usize> {
        self.sessions.iter().position(|s| s.id() == id)
    }

    /// Sessions in tab order
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// The tab order as ids
    pub fn order(&self) -> Vec<SessionId> {
        self.sessions.iter().map(Session::id).collect()
    }

    pub fn infos(&self) -> Vec<SessionInfo> {
        self.sessions
            .iter()
            .map(|s| s.info(self.active == Some(s.id())))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn active_index(&self) -> Option<usize> {
        self.active.and_then(|id| self.index_of(id))
    }

    fn focus_index(&mut self, index: usize) {
        let session = &mut self.sessions[index];
        let id = session.id();
        if let Err(e) = session.focus() {
            tracing::warn!(session_id = %id, error = %e, "View refused focus");
        }
        if self.active != Some(id) {
            tracing::debug!(session_id = %id, "Activated session");
        }
        self.active = Some(id);
    }

    fn renumber(&mut self) {
        for (index, session) in self.sessions.iter_mut().enumerate() {
            session.set_position(index);
        }
    }
}

impl Drop for TabManager {
    fn drop(&mut self) {
        for session in self.sessions.drain(..) {
            session.release();
        }
    }
}
