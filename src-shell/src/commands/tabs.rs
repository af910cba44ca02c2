//! Tab management commands
use std::str::FromStr;

use guacagui_core::{DragEvent, Point, Rect, SessionId, SessionInfo, Shell};

use super::CommandResult;
use crate::state::AppState;

/// Layout of the simulated tab strip used by `drag`
const TAB_WIDTH: f64 = 160.0;
const STRIP_HEIGHT: f64 = 32.0;

/// A tab named by its position or its id
pub fn resolve_tab(shell: &Shell, tab: &str) -> Option<SessionId> {
    match tab.parse::<usize>() {
        Ok(index) => shell.tabs().order().get(index).copied(),
        Err(_) => SessionId::from_str(tab)
            .ok()
            .filter(|id| shell.tabs().get(*id).is_some()),
    }
}

fn info_of(shell: &Shell, id: SessionId) -> Option<SessionInfo> {
    shell.infos().into_iter().find(|info| info.id == id)
}

pub fn open(state: &mut AppState, address: Option<&str>) -> CommandResult<SessionInfo> {
    state.with_shell(|shell| {
        let id = shell.open_session(address)?;
        info_of(shell, id)
    })
}

pub fn close(state: &mut AppState, tab: &str) -> CommandResult<Vec<SessionInfo>> {
    let Some(id) = resolve_tab(state.shell(), tab) else {
        return CommandResult::err(format!("no tab {}", tab));
    };

    state.with_shell(|shell| shell.close_session(id).then(|| shell.infos()))
}

pub fn activate(state: &mut AppState, tab: &str) -> CommandResult<SessionInfo> {
    let Some(id) = resolve_tab(state.shell(), tab) else {
        return CommandResult::err(format!("no tab {}", tab));
    };

    state.with_shell(|shell| {
        if !shell.activate(id) {
            return None;
        }
        info_of(shell, id)
    })
}

pub fn cycle(state: &mut AppState, offset: isize) -> CommandResult<SessionInfo> {
    state.with_shell(|shell| {
        let id = shell.activate_relative(offset)?;
        info_of(shell, id)
    })
}

pub fn move_tab(state: &mut AppState, tab: &str, index: usize) -> CommandResult<Vec<SessionInfo>> {
    let Some(id) = resolve_tab(state.shell(), tab) else {
        return CommandResult::err(format!("no tab {}", tab));
    };

    state.with_shell(|shell| {
        shell.reorder(id, index);
        Some(shell.infos())
    })
}

/// Replay a pointer drag from slot `from` to slot `to` on a uniform strip
pub fn drag(state: &mut AppState, from: usize, to: Option<usize>) -> CommandResult<Vec<SessionInfo>> {
    let count = state.shell().tabs().len();
    if from >= count {
        return CommandResult::err(format!("no tab {}", from));
    }

    state.with_shell(|shell| {
        let bounds = Rect::new(0.0, 0.0, TAB_WIDTH * count as f64, STRIP_HEIGHT);
        let y = STRIP_HEIGHT / 2.0;
        let strip = shell.tab_strip(bounds, TAB_WIDTH);

        let grab = Point::new(slot_left(from) + TAB_WIDTH / 2.0, y);
        let release = match to {
            Some(to) => Point::new(release_x(from, to.min(count - 1)), y),
            None => Point::new(grab.x, STRIP_HEIGHT * 3.0),
        };

        if let DragEvent::Ignored = shell.drag_start(&strip, grab) {
            return None;
        }
        shell.drag_move(&strip, release);
        shell.drag_drop(&strip, release);

        Some(shell.infos())
    })
}

fn slot_left(index: usize) -> f64 {
    index as f64 * TAB_WIDTH
}

/// A point inside slot `to` that is past its midpoint from `from`'s side
fn release_x(from: usize, to: usize) -> f64 {
    let left = slot_left(to);
    match to.cmp(&from) {
        std::cmp::Ordering::Less => left + TAB_WIDTH * 0.25,
        std::cmp::Ordering::Equal => left + TAB_WIDTH * 0.5,
        std::cmp::Ordering::Greater => left + TAB_WIDTH * 0.75,
    }
}

pub fn list(state: &mut AppState) -> CommandResult<Vec<SessionInfo>> {
    CommandResult::ok(state.shell().infos())
}
