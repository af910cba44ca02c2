//! Palette error types

use guacagui_tabs::{SessionId, ViewHostError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write failed: {0}")]
    Write(String),

    #[error("Clipboard read failed: {0}")]
    Read(String),
}

/// Why text could not be delivered
///
/// Everything except `NoActiveSession` is an injection failure proper.
#[derive(Error, Debug)]
pub enum InjectError {
    #[error("No active session")]
    NoActiveSession,

    #[error("Session {0} is not the active session")]
    InactiveTarget(SessionId),

    #[error("Delivery to the view failed: {0}")]
    Delivery(#[from] ViewHostError),
}

#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("No macro at index {0}")]
    UnknownIndex(usize),

    #[error("No macro named {0:?}")]
    UnknownName(String),

    #[error(transparent)]
    Inject(#[from] InjectError),
}
