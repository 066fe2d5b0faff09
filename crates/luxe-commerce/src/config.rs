//! Static store configuration.
//!
//! Supplied once at initialization and never mutated by the cart. Amounts
//! are written as decimals in TOML/JSON (`flat_shipping_cost = 5.99`) and
//! held as minor units.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::checkout::{ButtonStyle, ShippingPolicy};
use crate::error::CommerceError;
use crate::money::{Currency, Money};

/// Store-wide settings used to price the cart and configure checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoreConfigFile", into = "StoreConfigFile")]
pub struct StoreConfig {
    /// Name shown to shoppers and passed to the payment widget.
    pub display_name: String,

    /// Currency every price is expressed in.
    pub currency: Currency,

    /// Subtotal at or above which shipping is free, in minor units.
    pub free_shipping_threshold_cents: i64,

    /// Shipping charged below the threshold, in minor units.
    pub flat_shipping_cents: i64,

    /// Storage key holding the persisted cart.
    pub storage_key: String,

    /// Style options handed to the payment widget's button.
    pub button: ButtonStyle,
}

/// File form of [`StoreConfig`]. Amounts are decimals in major units of
/// `currency` and are scaled once the currency is known.
#[derive(Serialize, Deserialize)]
struct StoreConfigFile {
    #[serde(default = "default_display_name")]
    display_name: String,
    #[serde(default, with = "currency_code")]
    currency: Currency,
    #[serde(default = "default_free_shipping_threshold")]
    free_shipping_threshold: f64,
    #[serde(default = "default_flat_shipping_cost")]
    flat_shipping_cost: f64,
    #[serde(default = "default_storage_key")]
    storage_key: String,
    #[serde(default)]
    button: ButtonStyle,
}

fn default_display_name() -> String {
    "Luxe Nails".to_string()
}

fn default_free_shipping_threshold() -> f64 {
    50.0
}

fn default_flat_shipping_cost() -> f64 {
    5.99
}

fn default_storage_key() -> String {
    luxe_cache::cache_key!("luxe-nails", "cart")
}

fn minor_units(field: &str, amount: f64, currency: Currency) -> Result<i64, CommerceError> {
    if !amount.is_finite() {
        return Err(CommerceError::Config(format!(
            "{} must be a finite number",
            field
        )));
    }
    Ok(Money::from_decimal(amount, currency).amount_cents)
}

impl TryFrom<StoreConfigFile> for StoreConfig {
    type Error = CommerceError;

    fn try_from(file: StoreConfigFile) -> Result<Self, Self::Error> {
        let currency = file.currency;
        Ok(Self {
            free_shipping_threshold_cents: minor_units(
                "free_shipping_threshold",
                file.free_shipping_threshold,
                currency,
            )?,
            flat_shipping_cents: minor_units("flat_shipping_cost", file.flat_shipping_cost, currency)?,
            display_name: file.display_name,
            currency,
            storage_key: file.storage_key,
            button: file.button,
        })
    }
}

impl From<StoreConfig> for StoreConfigFile {
    fn from(config: StoreConfig) -> Self {
        Self {
            free_shipping_threshold: config.free_shipping_threshold().to_decimal(),
            flat_shipping_cost: config.flat_shipping_cost().to_decimal(),
            display_name: config.display_name,
            currency: config.currency,
            storage_key: config.storage_key,
            button: config.button,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            display_name: default_display_name(),
            currency: Currency::default(),
            free_shipping_threshold_cents: 5000,
            flat_shipping_cents: 599,
            storage_key: default_storage_key(),
            button: ButtonStyle::default(),
        }
    }
}

impl StoreConfig {
    /// Parse from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, CommerceError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, CommerceError> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| CommerceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CommerceError::Config(format!("{}: {}", path.display(), e)))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Reject settings that would make totals meaningless.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.free_shipping_threshold_cents < 0 {
            return Err(CommerceError::Config(
                "free_shipping_threshold must not be negative".to_string(),
            ));
        }
        if self.flat_shipping_cents < 0 {
            return Err(CommerceError::Config(
                "flat_shipping_cost must not be negative".to_string(),
            ));
        }
        if self.storage_key.trim().is_empty() {
            return Err(CommerceError::Config(
                "storage_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn free_shipping_threshold(&self) -> Money {
        Money::new(self.free_shipping_threshold_cents, self.currency)
    }

    pub fn flat_shipping_cost(&self) -> Money {
        Money::new(self.flat_shipping_cents, self.currency)
    }

    /// Shipping rule derived from the threshold and flat cost.
    pub fn shipping_policy(&self) -> ShippingPolicy {
        ShippingPolicy::new(self.free_shipping_threshold(), self.flat_shipping_cost())
    }
}

/// Serde adapter for currencies written as ISO codes in any case.
mod currency_code {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    use crate::money::Currency;

    pub fn serialize<S: Serializer>(currency: &Currency, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(currency.code())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Currency, D::Error> {
        let code = String::deserialize(deserializer)?;
        Currency::from_code(&code)
            .ok_or_else(|| D::Error::custom(format!("unknown currency code '{}'", code)))
    }
}
