//! Guacagui Core
//!
//! Central coordination layer for the remote console shell. The [`Shell`]
//! owns the configuration store, the tabs, the macro palette and the drag
//! controller, and is the boundary where failures become user notices.

mod address;
mod error;
mod notice;
mod shell;

pub use address::resolve_address;
pub use error::CoreError;
pub use notice::{Action, Notice, NoticeLevel};
pub use shell::{Shell, SIDEBAR_CHORD};

// Re-export core components
pub use guacagui_config::{ConfigError, ConfigSources, ConfigStore, Configuration, MacroDef};
pub use guacagui_palette::{
    Clipboard, ClipboardError, InjectError, InjectionReport, InjectionStrategy, InputInjector,
    MacroPalette, MemoryClipboard, PaletteEntry, PaletteError, SystemClipboard,
};
pub use guacagui_tabs::{
    DragEvent, DragState, HeadlessFactory, InputEvent, Key, NavigationCommand, Point, Rect,
    SessionId, SessionInfo, TabError, TabManager, TabStrip, ViewEvent, ViewEventKind, ViewHost,
    ViewHostError, ViewHostFactory, ViewJournal,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` with `verbose`.
pub fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let fallback = if verbose { "debug" } else { "info" };
    let filter = if verbose {
        EnvFilter::new(fallback)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
}
