//! Navigation commands
use guacagui_core::{resolve_address, Action, NavigationCommand, SessionInfo, Shell};

use super::tabs::resolve_tab;
use super::{CommandResult, PageReport};
use crate::state::AppState;

fn active_info(shell: &Shell) -> Option<SessionInfo> {
    shell.infos().into_iter().find(|info| info.is_active)
}

pub fn home(state: &mut AppState) -> CommandResult<SessionInfo> {
    state.with_shell(|shell| {
        if !shell.go_home() {
            return None;
        }
        active_info(shell)
    })
}

pub fn go(state: &mut AppState, address: &str) -> CommandResult<SessionInfo> {
    state.with_shell(|shell| {
        if !shell.navigate_active(address) {
            return None;
        }
        active_info(shell)
    })
}

pub fn command(state: &mut AppState, command: NavigationCommand) -> CommandResult<SessionInfo> {
    state.with_shell(|shell| {
        if !shell.navigation(command) {
            return None;
        }
        active_info(shell)
    })
}

/// Feed a page event from a view back into the shell
///
/// Answers with the tab the event touched, or the tab opened for a new window.
pub fn page(state: &mut AppState, tab: &str, report: PageReport) -> CommandResult<SessionInfo> {
    let Some(id) = resolve_tab(state.shell(), tab) else {
        return CommandResult::err(format!("no tab {}", tab));
    };

    let address = match &report {
        PageReport::Title(_) => None,
        PageReport::Url(address) | PageReport::Window(address) => Some(address.as_str()),
    };
    let url = match address.map(resolve_address).transpose() {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(error = %e, "Page reported an unusable address");
            return CommandResult::err(Action::OpenAddress.failure_message().to_string());
        }
    };

    state.with_shell(|shell| {
        let target = match (report, url) {
            (PageReport::Title(title), _) => {
                shell.page_title_changed(id, title);
                id
            }
            (PageReport::Url(_), Some(url)) => {
                shell.page_url_changed(id, url);
                id
            }
            (PageReport::Window(_), Some(url)) => shell.page_requested_window(id, url)?,
            (_, None) => return None,
        };
        shell.infos().into_iter().find(|info| info.id == target)
    })
}
