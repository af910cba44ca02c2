//! Guacagui Macro Palette
//!
//! Renders the configured macros and pushes a macro's text into the active
//! session, through the clipboard and a paste when possible and by typing it
//! otherwise.

mod clipboard;
mod error;
mod injector;
mod palette;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use error::{ClipboardError, InjectError, PaletteError};
pub use injector::{InjectionReport, InjectionStrategy, InputInjector};
pub use palette::{MacroPalette, PaletteEntry};

pub type Result<T> = std::result::Result<T, PaletteError>;
