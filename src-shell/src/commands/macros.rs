//! Macro palette commands
use guacagui_core::{InjectionReport, SessionId};
use serde::Serialize;

use super::{CommandResult, MacroRef};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MacroInfo {
    pub index: usize,
    pub name: String,
    /// What the palette shows, including unsaved edits
    pub text: String,
    pub edited: bool,
}

pub fn list(state: &mut AppState) -> CommandResult<Vec<MacroInfo>> {
    let entries = state
        .shell()
        .palette()
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| MacroInfo {
            index,
            name: entry.name.clone(),
            text: entry.display_text().to_string(),
            edited: entry.is_edited(),
        })
        .collect();
    CommandResult::ok(entries)
}

pub fn run(state: &mut AppState, target: &MacroRef) -> CommandResult<InjectionReport> {
    state.with_shell(|shell| match target {
        MacroRef::Index(index) => shell.run_macro(*index),
        MacroRef::Name(name) => shell.run_named_macro(name),
    })
}

pub fn edit(state: &mut AppState, index: usize, text: String) -> CommandResult<MacroInfo> {
    state.with_shell(|shell| {
        if !shell.edit_macro(index, text) {
            return None;
        }
        let entry = shell.palette().get(index)?;
        Some(MacroInfo {
            index,
            name: entry.name.clone(),
            text: entry.display_text().to_string(),
            edited: entry.is_edited(),
        })
    })
}

/// Open or close the gateway's own menu in the active tab
pub fn sidebar(state: &mut AppState) -> CommandResult<SessionId> {
    state.with_shell(|shell| {
        if !shell.toggle_sidebar() {
            return None;
        }
        shell.active_id()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::harness;
    use guacagui_core::InjectionStrategy;

    const CONFIG: &str = r#"{
        "home_url": "https://gw.example/",
        "macros": [
            {"name": "1", "text": "sebastian.garcia"},
            {"name": "4", "text": "sudo apt update"}
        ]
    }"#;

    #[test]
    fn test_run_by_name() {
        let mut h = harness(CONFIG);

        let report = run(&mut h.state, &MacroRef::Name("4".to_string()))
            .data
            .unwrap();

        assert_eq!(report.strategy, InjectionStrategy::ClipboardPaste);
        assert_eq!(h.clipboard.contents().as_deref(), Some("sudo apt update"));
    }

    #[test]
    fn test_edit_shows_draft_but_runs_configured_text() {
        let mut h = harness(CONFIG);

        let info = edit(&mut h.state, 0, "root".to_string()).data.unwrap();
        assert_eq!(info.text, "root");
        assert!(info.edited);

        run(&mut h.state, &MacroRef::Index(0));
        assert_eq!(h.clipboard.contents().as_deref(), Some("sebastian.garcia"));

        let listed = list(&mut h.state).data.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].text, "sudo apt update");
        assert!(!listed[1].edited);
    }

    #[test]
    fn test_unknown_macro() {
        let mut h = harness(CONFIG);

        let result = run(&mut h.state, &MacroRef::Name("9".to_string()));

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("could not paste macro"));
    }

    #[test]
    fn test_sidebar() {
        let mut h = harness(CONFIG);
        let id = h.state.shell().active_id();

        assert_eq!(sidebar(&mut h.state).data, id);
    }
}
