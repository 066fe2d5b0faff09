//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use luxe_cache::FileStore;
use luxe_commerce::checkout::PaymentWidget;
use luxe_commerce::CartManager;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;
use crate::presenter::TerminalPresenter;
use crate::sandbox::SandboxWidget;

/// Cart manager as wired up by the CLI.
pub type Storefront = CartManager<FileStore, TerminalPresenter>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&Path>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => (CliConfig::load(path)?, Some(path.to_path_buf())),
            None => match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory the cart file lives in.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Open the persisted cart and wire it to the terminal.
    pub fn storefront(&self) -> Result<Storefront> {
        let dir = self.storage_dir();
        let store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart storage at {}", dir.display()))?;

        let widget: Option<Arc<dyn PaymentWidget>> = if self.config.sandbox.enabled {
            Some(Arc::new(SandboxWidget::new(Duration::from_millis(
                self.config.sandbox.latency_ms,
            ))))
        } else {
            None
        };

        Ok(CartManager::load(
            self.config.store.clone(),
            store,
            TerminalPresenter::new(self.output.clone()),
            widget,
        ))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a config file, walking up from `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("luxe.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(root.path().join("luxe.toml")));
    }

    #[test]
    fn test_find_config_prefers_toml() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("luxe.json"), "{}").unwrap();
        std::fs::write(root.path().join(".luxe.toml"), "").unwrap();

        assert_eq!(
            find_config(root.path()),
            Some(root.path().join(".luxe.toml"))
        );
    }
}
