//! Guacagui Tab Management
//!
//! Every tab is a [`Session`]: one remote console view plus its title, URL and
//! position. The [`TabManager`] is the only owner of the tab order and of the
//! active-session pointer; the drag controller and the macro palette request
//! changes through it.

mod drag;
mod error;
mod headless;
mod manager;
mod session;
mod view;

pub use drag::{
    ActiveDrag, DragController, DragEvent, DragFeedback, DragState, Point, Rect, ReorderTarget,
    TabSlot, TabStrip,
};
pub use error::{TabError, ViewHostError};
pub use headless::{HeadlessFactory, HeadlessViewHost, ViewEvent, ViewEventKind, ViewJournal};
pub use manager::TabManager;
pub use session::{Session, SessionId, SessionInfo};
pub use view::{keystrokes, InputEvent, Key, NavigationCommand, ViewHost, ViewHostFactory};

pub type Result<T> = std::result::Result<T, TabError>;
