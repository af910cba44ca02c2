//! Application state management
use guacagui_core::{
    Clipboard, ConfigSources, ConfigStore, HeadlessFactory, Shell, SystemClipboard,
};

use crate::commands::CommandResult;

pub struct AppState {
    shell: Shell,
}

impl AppState {
    pub fn new() -> Self {
        let config = ConfigStore::new(ConfigSources::default());
        Self::with_parts(config, HeadlessFactory::new(), system_clipboard())
    }

    pub fn with_parts(
        config: ConfigStore,
        factory: HeadlessFactory,
        clipboard: Option<Box<dyn Clipboard>>,
    ) -> Self {
        Self {
            shell: Shell::new(config, Box::new(factory), clipboard),
        }
    }

    /// Load configuration and open the first tab
    pub fn initialize(&mut self) {
        self.shell.start();
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Run a shell operation; a `None` result is reported with the notice it raised
    pub fn with_shell<F, T>(&mut self, f: F) -> CommandResult<T>
    where
        F: FnOnce(&mut Shell) -> Option<T>,
    {
        let raised = self.shell.notices_raised();
        match f(&mut self.shell) {
            Some(data) => CommandResult::ok(data),
            None => {
                let message = if self.shell.notices_raised() > raised {
                    self.shell.notices().last().map(|n| n.message.clone())
                } else {
                    None
                };
                CommandResult::err(message.unwrap_or_else(|| "nothing to do".to_string()))
            }
        }
    }
}

fn system_clipboard() -> Option<Box<dyn Clipboard>> {
    match SystemClipboard::new() {
        Ok(clipboard) => Some(Box::new(clipboard)),
        Err(e) => {
            tracing::warn!(error = %e, "System clipboard unavailable, macros will be typed");
            None
        }
    }
}
