//! Guacagui Configuration
//!
//! Loads the `config.json` document that names the gateway home URL and the
//! macro palette. The store hands out immutable snapshots and swaps them
//! wholesale on reload; a failed reload never replaces the last good one.

mod config;
mod error;
mod sources;
mod store;

pub use config::{Configuration, MacroDef, DEFAULT_HOME_URL};
pub use error::ConfigError;
pub use sources::{ConfigSources, CONFIG_FILE};
pub use store::ConfigStore;

pub type Result<T> = std::result::Result<T, ConfigError>;
