//! Session data structure
//!
//! A session is one open tab: the view it owns plus what the tab strip shows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::ViewHostError;
use crate::view::{NavigationCommand, ViewHost};

/// Opaque, stable session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

pub struct Session {
    id: SessionId,
    /// Page title reported by the view, empty until the page loads
    title: String,
    /// Current navigation target
    url: Url,
    /// Index in the tab order, maintained by the tab manager
    position: usize,
    created_at: DateTime<Utc>,
    last_accessed_at: DateTime<Utc>,
    view: Box<dyn ViewHost>,
}

/// Read-only copy of a session for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub id: SessionId,
    pub title: String,
    pub url: String,
    pub position: usize,
    pub is_active: bool,
}

impl Session {
    pub(crate) fn new(id: SessionId, url: Url, position: usize, view: Box<dyn ViewHost>) -> Self {
        let now = Utc::now();

        Self {
            id,
            title: String::new(),
            url,
            position,
            created_at: now,
            last_accessed_at: now,
            view,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_accessed_at(&self) -> DateTime<Utc> {
        self.last_accessed_at
    }

    /// Title for the tab strip, falling back to the URL while loading
    pub fn display_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() {
            self.url.as_str()
        } else {
            title
        }
    }

    pub fn info(&self, is_active: bool) -> SessionInfo {
        SessionInfo {
            id: self.id,
            title: self.display_title().to_string(),
            url: self.url.to_string(),
            position: self.position,
            is_active,
        }
    }

    pub(crate) fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    /// The page moved on its own (redirect, link click)
    pub(crate) fn record_url(&mut self, url: Url) {
        self.url = url;
    }

    pub(crate) fn navigate(&mut self, url: Url) -> Result<(), ViewHostError> {
        self.url = url;
        // Title is stale until the new page reports one
        self.title.clear();
        self.view.navigate(&self.url)
    }

    pub(crate) fn focus(&mut self) -> Result<(), ViewHostError> {
        self.last_accessed_at = Utc::now();
        self.view.focus()
    }

    pub(crate) fn command(&mut self, command: NavigationCommand) -> Result<(), ViewHostError> {
        self.view.command(command)
    }

    /// Raw access for input delivery
    pub fn view_mut(&mut self) -> &mut dyn ViewHost {
        self.view.as_mut()
    }

    pub(crate) fn release(mut self) {
        self.view.release();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("url", &self.url.as_str())
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}
