//! Configuration Store
//!
//! Holds the current snapshot behind a lock and replaces it in one write.
//! Readers clone the `Arc` and never observe a half-applied document.

use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;

use crate::config::Configuration;
use crate::error::ConfigError;
use crate::sources::ConfigSources;
use crate::Result;

pub struct ConfigStore {
    sources: ConfigSources,
    current: Arc<RwLock<Arc<Configuration>>>,
}

impl ConfigStore {
    /// Create a store holding the first-run defaults; call [`reload`](Self::reload)
    /// to read the file
    pub fn new(sources: ConfigSources) -> Self {
        Self {
            sources,
            current: Arc::new(RwLock::new(Arc::new(Configuration::defaults()))),
        }
    }

    /// Read a single configuration file without touching any store
    pub fn load(path: &Path) -> Result<Configuration> {
        Configuration::load(path)
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<Configuration> {
        Arc::clone(&self.current.read())
    }

    pub fn sources(&self) -> &ConfigSources {
        &self.sources
    }

    /// Re-read the configuration and swap it in
    ///
    /// On failure the previous snapshot stays active. A missing file is only
    /// treated as first run while no file has ever been loaded.
    pub fn reload(&self) -> Result<Arc<Configuration>> {
        let Some(path) = self.sources.resolve() else {
            let current = self.snapshot();
            if let Some(previous) = &current.source {
                tracing::warn!(
                    path = %previous.display(),
                    "Configuration file disappeared, keeping previous snapshot"
                );
                return Err(ConfigError::Missing(previous.clone()));
            }
            tracing::info!("No configuration file found, using defaults");
            return Ok(current);
        };

        let mut next = match Configuration::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Configuration reload failed, keeping previous snapshot"
                );
                return Err(e);
            }
        };

        let next = {
            let mut guard = self.current.write();
            next.generation = guard.generation + 1;
            let next = Arc::new(next);
            *guard = Arc::clone(&next);
            next
        };

        tracing::info!(
            path = %path.display(),
            generation = next.generation,
            home_url = %next.home_url,
            macro_count = next.macros.len(),
            "Configuration loaded"
        );

        Ok(next)
    }
}

impl Clone for ConfigStore {
    fn clone(&self) -> Self {
        Self {
            sources: self.sources.clone(),
            current: Arc::clone(&self.current),
        }
    }
}
