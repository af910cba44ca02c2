//! ViewHost capability
//!
//! The rendering engine is external. The core only asks a view to navigate,
//! take focus, accept synthetic input and run browser navigation commands.

use url::Url;

use crate::error::ViewHostError;
use crate::session::SessionId;

/// A key as delivered to the remote console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    /// Any other control character, delivered as-is
    Control(char),
    Ctrl,
    Alt,
    Shift,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Press and release of a single key
    Key(Key),
    /// Keys pressed in order, released in reverse order
    Chord(Vec<Key>),
    /// Paste the system clipboard into the focused element
    Paste,
}

/// Toolbar navigation actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCommand {
    Back,
    Forward,
    Reload,
    Stop,
}

impl NavigationCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationCommand::Back => "back",
            NavigationCommand::Forward => "forward",
            NavigationCommand::Reload => "reload",
            NavigationCommand::Stop => "stop",
        }
    }
}

impl std::fmt::Display for NavigationCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One embedded renderer, exclusively owned by a [`Session`](crate::Session)
pub trait ViewHost {
    /// Start loading `url`; completion is the renderer's business
    fn navigate(&mut self, url: &Url) -> Result<(), ViewHostError>;

    fn focus(&mut self) -> Result<(), ViewHostError>;

    fn dispatch(&mut self, event: &InputEvent) -> Result<(), ViewHostError>;

    fn command(&mut self, command: NavigationCommand) -> Result<(), ViewHostError>;

    /// Type `text` one key at a time
    fn inject_text(&mut self, text: &str) -> Result<(), ViewHostError> {
        for key in keystrokes(text) {
            self.dispatch(&InputEvent::Key(key))?;
        }
        Ok(())
    }

    /// Tear down the renderer. Called once, when the tab closes.
    fn release(&mut self) {}
}

/// Creates one view per new session
pub trait ViewHostFactory {
    fn create(&mut self, session_id: SessionId) -> Result<Box<dyn ViewHost>, ViewHostError>;
}

/// Translate text into the key sequence that reproduces it
///
/// Character order is preserved. `\r\n` collapses into a single Enter.
pub fn keystrokes(text: &str) -> Vec<Key> {
    let mut keys = Vec::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let key = match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                Key::Enter
            }
            '\n' => Key::Enter,
            '\t' => Key::Tab,
            '\u{8}' => Key::Backspace,
            '\u{1b}' => Key::Escape,
            c if c.is_control() => Key::Control(c),
            c => Key::Char(c),
        };
        keys.push(key);
    }

    keys
}
