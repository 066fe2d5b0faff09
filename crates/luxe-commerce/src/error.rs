//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Cart mutations themselves never fail; these surface from loading,
/// configuration and serialization.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Persisted cart violates a cart invariant.
    #[error("Invalid cart data: {0}")]
    InvalidCart(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Unknown currency code.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Store configuration could not be read or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Durable storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<luxe_cache::CacheError> for CommerceError {
    fn from(e: luxe_cache::CacheError) -> Self {
        CommerceError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for CommerceError {
    fn from(e: toml::de::Error) -> Self {
        CommerceError::Config(e.to_string())
    }
}
