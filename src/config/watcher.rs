//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::loader::load_config;
use crate::settings::ServerSettings;

/// Monitors the configuration file and applies changes to live settings.
pub struct ConfigWatcher {
    path: PathBuf,
    settings: Arc<ServerSettings>,
}

impl ConfigWatcher {
    pub fn new(path: &Path, settings: Arc<ServerSettings>) -> Self {
        Self {
            path: path.to_path_buf(),
            settings,
        }
    }

    /// Re-read the file and apply it. Returns false if the current
    /// settings were kept because the file could not be loaded.
    pub fn reload(&self) -> bool {
        reload_into(&self.path, &self.settings)
    }

    /// Start watching. Changes are applied until the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let settings = Arc::clone(&self.settings);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Config file change detected, reloading...");
                        reload_into(&path, &settings);
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

fn reload_into(path: &Path, settings: &ServerSettings) -> bool {
    match load_config(path) {
        Ok(config) => {
            settings.apply_config(&config);
            true
        }
        Err(e) => {
            tracing::error!("Failed to reload config: {}. Keeping current configuration.", e);
            false
        }
    }
}
