//! Where the configuration file lives
//!
//! The installation path is fixed; a user-specific file takes precedence when
//! it exists.

use std::path::{Path, PathBuf};

/// File name shared by the system and user locations
pub const CONFIG_FILE: &str = "config.json";

const APP_DIR: &str = "guacagui";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSources {
    /// Installation-wide configuration
    pub system: PathBuf,
    /// Per-user override
    pub user: Option<PathBuf>,
}

impl ConfigSources {
    pub fn new(system: PathBuf, user: Option<PathBuf>) -> Self {
        Self { system, user }
    }

    /// A single fixed file, no user override
    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self {
            system: path.into(),
            user: None,
        }
    }

    /// The file to read right now, if any exists
    pub fn resolve(&self) -> Option<PathBuf> {
        self.user
            .as_deref()
            .filter(|path| path.is_file())
            .or_else(|| Some(self.system.as_path()).filter(|path| path.is_file()))
            .map(Path::to_path_buf)
    }

    pub fn system_path() -> PathBuf {
        #[cfg(unix)]
        {
            PathBuf::from("/etc").join(APP_DIR).join(CONFIG_FILE)
        }
        #[cfg(not(unix))]
        {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from("."))
                .join(CONFIG_FILE)
        }
    }

    pub fn user_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self::new(Self::system_path(), Self::user_path())
    }
}
