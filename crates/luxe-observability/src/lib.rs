//! Observability setup for the Luxe Nails storefront.
//!
//! Library crates log through `tracing` macros only; binaries call
//! [`LoggingConfig::init`] once at startup to install a subscriber.

mod logging;

pub use logging::*;
