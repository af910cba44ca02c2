//! Shell state container
//!
//! Owns every component and runs each user operation to completion. Errors
//! stop here: they are logged in full and surface as a [`Notice`] naming the
//! action, or are ignored when they only mean the target went away.

use std::sync::Arc;

use guacagui_config::{ConfigStore, Configuration};
use guacagui_palette::{Clipboard, InjectionReport, InputInjector, MacroPalette};
use guacagui_tabs::{
    DragController, DragEvent, DragState, Key, NavigationCommand, Point, Rect, SessionId,
    SessionInfo, TabManager, TabStrip, ViewHostFactory,
};
use url::Url;

use crate::address::resolve_address;
use crate::error::CoreError;
use crate::notice::{Action, Notice, NoticeLevel};

const MAX_NOTICES: usize = 50;

/// Opens the gateway's sidebar menu
pub const SIDEBAR_CHORD: [Key; 3] = [Key::Ctrl, Key::Alt, Key::Shift];

pub struct Shell {
    config: ConfigStore,
    tabs: TabManager,
    palette: MacroPalette,
    injector: InputInjector,
    drag: DragController,
    notices: Vec<Notice>,
    /// Notices raised since start, drained or not
    raised: u64,
}

impl Shell {
    pub fn new(
        config: ConfigStore,
        factory: Box<dyn ViewHostFactory>,
        clipboard: Option<Box<dyn Clipboard>>,
    ) -> Self {
        let snapshot = config.snapshot();
        let tabs = TabManager::new(factory, snapshot.home_url.clone());
        let palette = MacroPalette::from_config(&snapshot);

        Self {
            config,
            tabs,
            palette,
            injector: InputInjector::new(clipboard),
            drag: DragController::new(),
            notices: Vec::new(),
            raised: 0,
        }
    }

    /// Load the configuration and open the first session at the home URL
    pub fn start(&mut self) -> Option<SessionId> {
        self.reload_config();
        let id = self.open_session(None);

        tracing::info!(
            home_url = %self.tabs.home_url(),
            macros = self.palette.len(),
            clipboard = self.has_clipboard(),
            "Shell started"
        );

        id
    }

    // === Configuration ===

    pub fn config(&self) -> Arc<Configuration> {
        self.config.snapshot()
    }

    /// Re-read the configuration file; the palette and home URL follow it
    ///
    /// On failure everything stays on the previous snapshot.
    pub fn reload_config(&mut self) -> bool {
        match self.config.reload() {
            Ok(snapshot) => {
                self.apply_config(&snapshot);
                true
            }
            Err(e) => {
                self.fail(Action::ReloadConfig, e.into());
                false
            }
        }
    }

    fn apply_config(&mut self, snapshot: &Configuration) {
        self.palette.render(snapshot);
        if self.tabs.home_url() != &snapshot.home_url {
            self.tabs.set_home_url(snapshot.home_url.clone());
        }

        tracing::info!(
            generation = snapshot.generation,
            macros = snapshot.macros.len(),
            "Configuration applied"
        );
    }

    // === Tab operations ===

    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    pub fn infos(&self) -> Vec<SessionInfo> {
        self.tabs.infos()
    }

    pub fn active_id(&self) -> Option<SessionId> {
        self.tabs.active_id()
    }

    /// Open a tab at `address`, or at the home URL
    pub fn open_session(&mut self, address: Option<&str>) -> Option<SessionId> {
        let url = match address.map(resolve_address).transpose() {
            Ok(url) => url,
            Err(e) => {
                self.fail(Action::OpenAddress, e);
                return None;
            }
        };

        let result = self.tabs.open_session(url);
        self.settle(Action::OpenTab, result)
    }

    pub fn close_session(&mut self, id: SessionId) -> bool {
        // Slot geometry is about to change under any gesture in progress
        self.drag.cancel();
        self.tabs.close_session(id)
    }

    pub fn activate(&mut self, id: SessionId) -> bool {
        let result = self.tabs.activate(id);
        self.settle(Action::SwitchTab, result).is_some()
    }

    /// Cycle through tabs, wrapping at either end
    pub fn activate_relative(&mut self, offset: isize) -> Option<SessionId> {
        let result = self.tabs.activate_relative(offset);
        self.settle(Action::SwitchTab, result)
    }

    pub fn reorder(&mut self, id: SessionId, new_index: usize) -> bool {
        let result = self.tabs.reorder(id, new_index);
        self.settle(Action::MoveTab, result).unwrap_or(false)
    }

    /// Load typed address bar text in the active tab, opening one if needed
    pub fn navigate_active(&mut self, address: &str) -> bool {
        let url = match resolve_address(address) {
            Ok(url) => url,
            Err(e) => {
                self.fail(Action::OpenAddress, e);
                return false;
            }
        };

        let Some(id) = self.tabs.active_id() else {
            let result = self.tabs.open_session(Some(url));
            return self.settle(Action::OpenAddress, result).is_some();
        };

        let result = self.tabs.navigate(id, url);
        self.settle(Action::OpenAddress, result).is_some()
    }

    pub fn go_home(&mut self) -> bool {
        let result = self.tabs.navigate_home();
        self.settle(Action::GoHome, result).is_some()
    }

    /// Back, forward, reload or stop on the active tab
    pub fn navigation(&mut self, command: NavigationCommand) -> bool {
        let result = self.tabs.send_command(command);
        self.settle(Action::Navigate, result).is_some()
    }

    /// Page title reported by a view
    pub fn page_title_changed(&mut self, id: SessionId, title: String) {
        if let Err(e) = self.tabs.set_title(id, title) {
            tracing::debug!(session_id = %id, error = %e, "Title update dropped");
        }
    }

    /// Page URL reported by a view
    pub fn page_url_changed(&mut self, id: SessionId, url: Url) {
        if let Err(e) = self.tabs.record_url(id, url) {
            tracing::debug!(session_id = %id, error = %e, "URL update dropped");
        }
    }

    /// A page asked for a new window (`target="_blank"`, `window.open`)
    ///
    /// The new window becomes a tab at the end of the strip and is activated.
    pub fn page_requested_window(&mut self, opener: SessionId, url: Url) -> Option<SessionId> {
        tracing::debug!(session_id = %opener, url = %url, "Page requested a new window");
        let result = self.tabs.open_session(Some(url));
        self.settle(Action::OpenTab, result)
    }

    // === Macro palette ===

    pub fn palette(&self) -> &MacroPalette {
        &self.palette
    }

    /// Paste the macro at `index` into the active tab
    pub fn run_macro(&mut self, index: usize) -> Option<InjectionReport> {
        let result = self
            .palette
            .activate(index, &mut self.injector, &mut self.tabs);
        self.settle(Action::PasteMacro, result)
    }

    pub fn run_named_macro(&mut self, name: &str) -> Option<InjectionReport> {
        let result = self
            .palette
            .activate_named(name, &mut self.injector, &mut self.tabs);
        self.settle(Action::PasteMacro, result)
    }

    /// Change what a palette entry shows until the next reload
    pub fn edit_macro(&mut self, index: usize, text: String) -> bool {
        let result = self.palette.edit(index, text);
        self.settle(Action::EditMacro, result).is_some()
    }

    /// Whether macros can go through the clipboard or must be typed
    pub fn has_clipboard(&self) -> bool {
        self.injector.has_clipboard()
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        let result = self
            .injector
            .send_chord(&mut self.tabs, SIDEBAR_CHORD.to_vec());
        self.settle(Action::ToggleSidebar, result).is_some()
    }

    // === Drag reorder ===

    /// Strip geometry for the current tab order
    pub fn tab_strip(&self, bounds: Rect, tab_width: f64) -> TabStrip {
        TabStrip::uniform(bounds, self.tabs.order(), tab_width)
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    pub fn drag_start(&mut self, strip: &TabStrip, point: Point) -> DragEvent {
        self.drag.pointer_down(strip, point)
    }

    pub fn drag_move(&mut self, strip: &TabStrip, point: Point) -> DragEvent {
        self.drag.pointer_move(strip, point)
    }

    pub fn drag_drop(&mut self, strip: &TabStrip, point: Point) -> DragEvent {
        self.drag.pointer_up(strip, point, &mut self.tabs)
    }

    pub fn drag_cancel(&mut self) -> DragEvent {
        self.drag.cancel()
    }

    // === Notices ===

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hand pending notices to the front end
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn notices_raised(&self) -> u64 {
        self.raised
    }

    fn push_notice(&mut self, notice: Notice) {
        self.raised += 1;
        self.notices.push(notice);
        if self.notices.len() > MAX_NOTICES {
            let overflow = self.notices.len() - MAX_NOTICES;
            self.notices.drain(0..overflow);
        }
    }

    /// Unwrap an operation result, routing the error to the log and notices
    fn settle<T, E>(&mut self, action: Action, result: Result<T, E>) -> Option<T>
    where
        E: Into<CoreError>,
    {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.fail(action, e.into());
                None
            }
        }
    }

    fn fail(&mut self, action: Action, error: CoreError) {
        if error.is_stale() {
            tracing::debug!(action = action.as_str(), error = %error, "Operation skipped");
            return;
        }

        tracing::warn!(action = action.as_str(), error = %error, "Operation failed");

        let message = match error.config_field() {
            Some(field) => format!("{} ({})", action.failure_message(), field),
            None => action.failure_message().to_string(),
        };
        let level = match action {
            Action::ReloadConfig => NoticeLevel::Warning,
            _ => NoticeLevel::Error,
        };
        self.push_notice(Notice::new(level, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guacagui_config::ConfigSources;
    use guacagui_palette::{InjectionStrategy, MemoryClipboard};
    use guacagui_tabs::{HeadlessFactory, InputEvent, ViewEventKind, ViewJournal};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const SCENARIO: &str = r#"{
        "home_url": "https://gw.example/guacamole/",
        "macros": [
            {"name": "1", "text": "sebastian.garcia"},
            {"name": "4", "text": "sudo apt update"}
        ]
    }"#;

    struct Fixture {
        _dir: TempDir,
        path: PathBuf,
        shell: Shell,
        journal: ViewJournal,
        clipboard: MemoryClipboard,
    }

    fn write(path: &Path, contents: &str) {
        std::fs::write(path, contents).unwrap();
    }

    fn fixture(contents: Option<&str>) -> Fixture {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        if let Some(contents) = contents {
            write(&path, contents);
        }

        let factory = HeadlessFactory::new();
        let journal = factory.journal();
        let clipboard = MemoryClipboard::new();
        let mut shell = Shell::new(
            ConfigStore::new(ConfigSources::single(&path)),
            Box::new(factory),
            Some(Box::new(clipboard.clone())),
        );
        shell.start();

        Fixture {
            _dir: dir,
            path,
            shell,
            journal,
            clipboard,
        }
    }

    fn order_titles(shell: &Shell, names: &[(SessionId, &str)]) -> Vec<String> {
        shell
            .tabs()
            .order()
            .into_iter()
            .map(|id| {
                names
                    .iter()
                    .find(|(n, _)| *n == id)
                    .map(|(_, name)| name.to_string())
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_start_opens_home_session() {
        let f = fixture(Some(SCENARIO));

        let infos = f.shell.infos();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].url, "https://gw.example/guacamole/");
        assert!(infos[0].is_active);
        assert_eq!(f.shell.palette().len(), 2);
        assert!(f.shell.notices().is_empty());
    }

    #[test]
    fn test_first_run_defaults() {
        let f = fixture(None);

        assert_eq!(f.shell.infos()[0].url, "about:blank");
        assert!(f.shell.palette().is_empty());
        assert!(f.shell.notices().is_empty());
    }

    #[test]
    fn test_macro_scenario() {
        let mut f = fixture(Some(SCENARIO));
        let id = f.shell.active_id().unwrap();

        let report = f.shell.run_named_macro("4").unwrap();

        assert_eq!(report.strategy, InjectionStrategy::ClipboardPaste);
        assert_eq!(f.clipboard.contents().as_deref(), Some("sudo apt update"));
        let pastes = f
            .journal
            .for_session(id)
            .into_iter()
            .filter(|kind| *kind == ViewEventKind::Input(InputEvent::Paste))
            .count();
        assert_eq!(pastes, 1);
        assert!(f.shell.notices().is_empty());
    }

    #[test]
    fn test_macro_without_session_becomes_notice() {
        let mut f = fixture(Some(SCENARIO));
        let id = f.shell.active_id().unwrap();
        f.shell.close_session(id);

        assert!(f.shell.run_macro(0).is_none());

        let notices = f.shell.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "could not paste macro");
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(f.shell.notices().is_empty());
    }

    #[test]
    fn test_failed_reload_keeps_palette_and_sessions() {
        let mut f = fixture(Some(SCENARIO));
        f.shell.open_session(None);
        let before = f.shell.infos();

        write(&f.path, r#"{"macros": [{"name": "x", "text": "exit"}]}"#);
        assert!(!f.shell.reload_config());

        assert_eq!(f.shell.infos(), before);
        let names: Vec<_> = f
            .shell
            .palette()
            .entries()
            .iter()
            .map(|e| e.name.clone())
            .collect();
        assert_eq!(names, vec!["1", "4"]);
        assert_eq!(
            f.shell.config().home_url.as_str(),
            "https://gw.example/guacamole/"
        );

        let notices = f.shell.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warning);
        assert_eq!(notices[0].message, "could not reload configuration (home_url)");
    }

    #[test]
    fn test_reload_updates_palette_and_home() {
        let mut f = fixture(Some(SCENARIO));
        f.shell.edit_macro(0, "draft".to_string());

        write(
            &f.path,
            r#"{"home_url": "gw2.example", "macros": [{"label": "x", "macro": "exit"}]}"#,
        );
        assert!(f.shell.reload_config());

        assert_eq!(f.shell.palette().len(), 1);
        assert_eq!(f.shell.palette().get(0).unwrap().display_text(), "exit");
        assert_eq!(f.shell.tabs().home_url().as_str(), "https://gw2.example/");

        // Existing tabs stay where they are until sent home
        assert_eq!(f.shell.infos()[0].url, "https://gw.example/guacamole/");
        assert!(f.shell.go_home());
        assert_eq!(f.shell.infos()[0].url, "https://gw2.example/");
    }

    #[test]
    fn test_drag_scenario() {
        let mut f = fixture(Some(SCENARIO));
        let a = f.shell.active_id().unwrap();
        let b = f.shell.open_session(None).unwrap();
        let c = f.shell.open_session(None).unwrap();
        let names = [(a, "A"), (b, "B"), (c, "C")];
        let bounds = Rect::new(0.0, 0.0, 300.0, 30.0);

        // Released outside the strip
        let strip = f.shell.tab_strip(bounds, 100.0);
        f.shell.drag_start(&strip, Point::new(250.0, 10.0));
        assert!(matches!(
            f.shell.drag_drop(&strip, Point::new(10.0, 80.0)),
            DragEvent::Cancelled
        ));
        assert_eq!(order_titles(&f.shell, &names), vec!["A", "B", "C"]);

        // C onto the first slot
        let strip = f.shell.tab_strip(bounds, 100.0);
        f.shell.drag_start(&strip, Point::new(250.0, 10.0));
        f.shell.drag_move(&strip, Point::new(10.0, 10.0));
        assert!(matches!(
            f.shell.drag_drop(&strip, Point::new(10.0, 10.0)),
            DragEvent::Dropped { index: 0, .. }
        ));
        assert_eq!(order_titles(&f.shell, &names), vec!["C", "A", "B"]);
        assert_eq!(*f.shell.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_closing_cancels_drag() {
        let mut f = fixture(Some(SCENARIO));
        let a = f.shell.active_id().unwrap();
        f.shell.open_session(None);
        let strip = f.shell.tab_strip(Rect::new(0.0, 0.0, 200.0, 30.0), 100.0);

        f.shell.drag_start(&strip, Point::new(50.0, 10.0));
        f.shell.close_session(a);

        assert_eq!(*f.shell.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_unknown_session_is_silent() {
        let mut f = fixture(Some(SCENARIO));

        assert!(!f.shell.activate(SessionId::new()));
        assert!(!f.shell.close_session(SessionId::new()));
        assert!(!f.shell.reorder(SessionId::new(), 0));
        assert!(f.shell.notices().is_empty());
    }

    #[test]
    fn test_bad_address_becomes_notice() {
        let mut f = fixture(Some(SCENARIO));

        assert!(!f.shell.navigate_active("not a url"));
        assert!(f.shell.open_session(Some("")).is_none());

        let messages: Vec<_> = f
            .shell
            .take_notices()
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(
            messages,
            vec!["could not open address", "could not open address"]
        );
    }

    #[test]
    fn test_navigate_active_and_cycle() {
        let mut f = fixture(Some(SCENARIO));
        let first = f.shell.active_id().unwrap();
        let second = f.shell.open_session(Some("10.0.0.5:8080")).unwrap();

        assert_eq!(f.shell.infos()[1].url, "http://10.0.0.5:8080/");
        assert_eq!(f.shell.activate_relative(1), Some(first));
        assert_eq!(f.shell.activate_relative(-1), Some(second));

        assert!(f.shell.navigate_active("https://gw.example/other"));
        assert_eq!(f.shell.infos()[1].url, "https://gw.example/other");
        assert!(f.shell.navigation(NavigationCommand::Back));
    }

    #[test]
    fn test_sidebar_chord() {
        let mut f = fixture(Some(SCENARIO));
        let id = f.shell.active_id().unwrap();

        assert!(f.shell.toggle_sidebar());

        assert!(f
            .journal
            .for_session(id)
            .contains(&ViewEventKind::Input(InputEvent::Chord(SIDEBAR_CHORD.to_vec()))));
    }

    #[test]
    fn test_page_events_update_tab_list() {
        let mut f = fixture(Some(SCENARIO));
        let id = f.shell.active_id().unwrap();

        assert_eq!(f.shell.infos()[0].title, "");
        f.shell.page_title_changed(id, "Guacamole".to_string());
        f.shell
            .page_url_changed(id, Url::parse("https://gw.example/guacamole/#/client/c1").unwrap());

        let info = &f.shell.infos()[0];
        assert_eq!(info.title, "Guacamole");
        assert_eq!(info.url, "https://gw.example/guacamole/#/client/c1");
        assert_eq!(
            f.shell.tabs().get(id).unwrap().display_title(),
            "Guacamole"
        );
    }

    #[test]
    fn test_page_events_for_closed_tab_are_dropped() {
        let mut f = fixture(Some(SCENARIO));
        let closed = f.shell.active_id().unwrap();
        let open = f.shell.open_session(None).unwrap();
        f.shell.close_session(closed);
        let before = f.shell.infos();

        f.shell.page_title_changed(closed, "Gone".to_string());
        f.shell
            .page_url_changed(closed, Url::parse("https://elsewhere.example/").unwrap());

        assert_eq!(f.shell.infos(), before);
        assert_eq!(f.shell.infos()[0].id, open);
        assert!(f.shell.notices().is_empty());
    }

    #[test]
    fn test_new_window_request_appends_and_activates() {
        let mut f = fixture(Some(SCENARIO));
        let a = f.shell.active_id().unwrap();
        let b = f.shell.open_session(None).unwrap();
        f.shell.activate(a);

        let popup = f
            .shell
            .page_requested_window(a, Url::parse("https://gw.example/guacamole/#/client/c2").unwrap())
            .unwrap();

        assert_eq!(f.shell.tabs().order(), vec![a, b, popup]);
        assert_eq!(f.shell.active_id(), Some(popup));
        let info = &f.shell.infos()[2];
        assert_eq!(info.position, 2);
        assert!(info.is_active);
        assert_eq!(info.url, "https://gw.example/guacamole/#/client/c2");
    }

    #[test]
    fn test_has_clipboard() {
        let f = fixture(Some(SCENARIO));
        assert!(f.shell.has_clipboard());

        let shell = Shell::new(
            ConfigStore::new(ConfigSources::single(&f.path)),
            Box::new(HeadlessFactory::new()),
            None,
        );
        assert!(!shell.has_clipboard());
    }

    #[test]
    fn test_notices_are_bounded() {
        let mut f = fixture(Some(SCENARIO));

        for _ in 0..MAX_NOTICES + 5 {
            f.shell.edit_macro(99, String::new());
        }

        assert_eq!(f.shell.notices().len(), MAX_NOTICES);
        assert_eq!(f.shell.notices_raised(), MAX_NOTICES as u64 + 5);
    }
}
