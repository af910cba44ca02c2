//! Tab error types

use thiserror::Error;

use crate::session::SessionId;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("No active session")]
    NoActiveSession,

    #[error("View host error: {0}")]
    ViewHost(#[from] ViewHostError),
}

/// Failures reported by the embedded renderer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewHostError {
    #[error("View could not be created: {0}")]
    Creation(String),

    #[error("Operation not supported by this view: {0}")]
    Unsupported(String),

    #[error("Input delivery failed: {0}")]
    Delivery(String),

    #[error("View has been released")]
    Released,
}
