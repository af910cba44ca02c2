//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] guacagui_config::ConfigError),

    #[error("Tab error: {0}")]
    Tab(#[from] guacagui_tabs::TabError),

    #[error("Injection error: {0}")]
    Inject(#[from] guacagui_palette::InjectError),

    #[error("Palette error: {0}")]
    Palette(#[from] guacagui_palette::PaletteError),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

impl CoreError {
    /// The target of the operation no longer exists, nothing to report
    pub fn is_stale(&self) -> bool {
        matches!(
            self,
            CoreError::Tab(guacagui_tabs::TabError::NotFound(_))
                | CoreError::Tab(guacagui_tabs::TabError::NoActiveSession)
        )
    }

    /// Configuration field at fault, if any
    pub fn config_field(&self) -> Option<&str> {
        match self {
            CoreError::Config(e) => e.field(),
            _ => None,
        }
    }
}
