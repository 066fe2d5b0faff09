//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use luxe_commerce::catalog::ProductCard;
use luxe_commerce::StoreConfig;
use luxe_observability::LoggingConfig;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["luxe.toml", ".luxe.toml", "luxe.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where the cart is persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Payment sandbox behavior.
    #[serde(default)]
    pub sandbox: SandboxConfig,

    /// Products listed on the storefront.
    #[serde(default)]
    pub catalog: Vec<ProductCard>,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        config
            .store
            .validate()
            .with_context(|| format!("Invalid [store] section in {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Storage location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per storage key. Relative paths are
    /// resolved against the working directory.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".luxe")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

/// Payment sandbox configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxConfig {
    /// Disable to run without a payment widget.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Simulated provider latency in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_latency_ms() -> u64 {
    600
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            latency_ms: default_latency_ms(),
        }
    }
}

/// Generate a default luxe.toml config file.
pub fn generate_default_config(name: &str) -> String {
    format!(
        r#"# Luxe Nails storefront configuration

[store]
display_name = "{name}"
currency = "USD"
free_shipping_threshold = 50.00
flat_shipping_cost = 5.99
storage_key = "luxe-nails:cart"

[store.button]
layout = "vertical"
color = "gold"
shape = "pill"
label = "checkout"

[logging]
level = "warn"
format = "pretty"

[storage]
dir = ".luxe"

[sandbox]
enabled = true
latency_ms = 600

[[catalog]]
id = "gel-crimson"
name = "Crimson Gel Polish"
category = "Gel Polish"
price = 18.50

[[catalog]]
id = "gel-nude"
name = "Bare Nude Gel Polish"
category = "Gel Polish"
price = 18.50

[[catalog]]
id = "press-almond"
name = "Almond Press-On Set"
category = "Press-On Nails"
price = 24.00

[[catalog]]
id = "care-cuticle-oil"
name = "Cuticle Oil"
category = "Nail Care"
price = 12.00

[[catalog]]
id = "art-chrome"
name = "Chrome Powder Kit"
category = "Nail Art"
price = 32.00
"#,
        name = name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use luxe_commerce::Currency;
    use luxe_observability::LogLevel;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config("Luxe Nails")).unwrap();

        assert_eq!(config.store.display_name, "Luxe Nails");
        assert_eq!(config.store.currency, Currency::USD);
        assert_eq!(config.store.flat_shipping_cents, 599);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(config.storage.dir, PathBuf::from(".luxe"));
        assert_eq!(config.catalog.len(), 5);
        assert_eq!(config.catalog[2].price, 24.0);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.store, StoreConfig::default());
        assert!(config.sandbox.enabled);
        assert!(config.catalog.is_empty());
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("luxe.json");

        let mut config = CliConfig::default();
        config.store.display_name = "Luxe Nails Lyon".to_string();
        config.save(&path).unwrap();

        let loaded = CliConfig::load(&path).unwrap();
        assert_eq!(loaded.store.display_name, "Luxe Nails Lyon");
    }

    #[test]
    fn test_load_rejects_invalid_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("luxe.toml");
        std::fs::write(&path, "[store]\nflat_shipping_cost = -2.0\n").unwrap();

        assert!(CliConfig::load(&path).is_err());
    }
}
