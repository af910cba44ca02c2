//! Configuration and notice commands
use guacagui_core::Notice;
use serde::Serialize;

use super::CommandResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ConfigSummary {
    pub source: Option<String>,
    pub generation: u64,
    pub home_url: String,
    pub macros: usize,
}

pub fn reload(state: &mut AppState) -> CommandResult<ConfigSummary> {
    state.with_shell(|shell| {
        if !shell.reload_config() {
            return None;
        }
        let config = shell.config();
        Some(ConfigSummary {
            source: config.source.as_ref().map(|p| p.display().to_string()),
            generation: config.generation,
            home_url: config.home_url.to_string(),
            macros: config.macros.len(),
        })
    })
}

/// Drain pending notices
pub fn notices(state: &mut AppState) -> CommandResult<Vec<Notice>> {
    state.with_shell(|shell| Some(shell.take_notices()))
}
