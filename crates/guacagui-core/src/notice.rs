//! User-facing notices
//!
//! A notice names the action that failed; error detail goes to the log.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Shell operations that can surface a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    OpenTab,
    SwitchTab,
    MoveTab,
    OpenAddress,
    GoHome,
    Navigate,
    PasteMacro,
    EditMacro,
    ToggleSidebar,
    ReloadConfig,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenTab => "open_tab",
            Self::SwitchTab => "switch_tab",
            Self::MoveTab => "move_tab",
            Self::OpenAddress => "open_address",
            Self::GoHome => "go_home",
            Self::Navigate => "navigate",
            Self::PasteMacro => "paste_macro",
            Self::EditMacro => "edit_macro",
            Self::ToggleSidebar => "toggle_sidebar",
            Self::ReloadConfig => "reload_config",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::OpenTab => "could not open a new tab",
            Self::SwitchTab => "could not switch tabs",
            Self::MoveTab => "could not move tab",
            Self::OpenAddress => "could not open address",
            Self::GoHome => "could not go home",
            Self::Navigate => "could not navigate",
            Self::PasteMacro => "could not paste macro",
            Self::EditMacro => "could not edit macro",
            Self::ToggleSidebar => "could not toggle the gateway menu",
            Self::ReloadConfig => "could not reload configuration",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}
