//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use stockroom_console::InventoryStore;
use stockroom_fetch::{FetchClient, HttpInventoryApi, InventoryApi, MemoryInventoryApi};
use tracing::debug;

use crate::config::{CliConfig, BASE_URL_ENV, CONFIG_NAMES};
use crate::output::Output;

/// Store over whichever backend the context selected.
pub type Store = InventoryStore<Arc<dyn InventoryApi>>;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration, overrides applied.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Use the in-memory example backend.
    pub offline: bool,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, offline: bool, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve_path(&cwd, path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            match find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };
        let config = config.with_base_url_override(std::env::var(BASE_URL_ENV).ok());

        debug!(
            config = ?config_path,
            base_url = %config.server.base_url,
            offline,
            "context loaded"
        );

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            offline,
        })
    }

    /// Build the backend: example data when offline, HTTP otherwise.
    pub fn api(&self) -> Result<Arc<dyn InventoryApi>> {
        if self.offline {
            return Ok(Arc::new(MemoryInventoryApi::with_example_data()));
        }

        let client = FetchClient::with_timeouts(self.config.http.timeouts())
            .context("Failed to build HTTP client")?
            .with_base_url(self.config.server.base_url.clone());
        Ok(Arc::new(HttpInventoryApi::new(client)))
    }

    /// A fresh store over [`Context::api`]. Nothing is loaded yet.
    pub fn store(&self) -> Result<Store> {
        Ok(InventoryStore::new(self.api()?))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve_path(&self.cwd, path)
    }

    /// Where `config init` writes when no path is given.
    pub fn default_config_path(&self) -> PathBuf {
        self.cwd.join(CONFIG_NAMES[0])
    }
}

/// Find a config file in the directory tree, starting at `start`.
pub fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                if let Ok(config) = CliConfig::load(&config_path) {
                    return Some((config, config_path));
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
