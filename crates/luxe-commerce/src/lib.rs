//! Cart, checkout and catalog logic for the Luxe Nails storefront.
//!
//! This crate holds everything on the page that is more than presentation:
//!
//! - **Cart**: line items, derived totals, and the [`CartManager`] that
//!   persists the cart and keeps the presentation layer in sync
//! - **Checkout**: shipping rule, order descriptor, payment widget traits,
//!   checkout events
//! - **Catalog**: product cards and the category filter
//! - **Newsletter**: email address validation
//!
//! # Example
//!
//! ```rust,ignore
//! use luxe_commerce::prelude::*;
//! use luxe_cache::MemoryStore;
//!
//! let mut manager = CartManager::load(
//!     StoreConfig::default(),
//!     MemoryStore::new(),
//!     my_presenter,
//!     Some(my_widget),
//! );
//!
//! manager.add("gel-red", "Crimson Gel", Money::new(1850, Currency::USD));
//! let totals = manager.compute_totals();
//! println!("Total: {}", totals.total.display());
//!
//! let handle = manager.create_order().await?;
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod money;
pub mod presentation;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod newsletter;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use cart::CartManager;
pub use config::StoreConfig;
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::StoreConfig;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::presentation::{Notification, NotificationKind, Presenter};

    // Cart
    pub use crate::cart::{Cart, CartItem, CartManager, QuantityChange, StoredLine, Totals};

    // Checkout
    pub use crate::checkout::{
        ApprovedOrder, ButtonStyle, CaptureReceipt, CheckoutControl, CheckoutEvent,
        CheckoutStatus, OrderDescriptor, OrderHandle, PaymentError, PaymentWidget,
        ShippingPolicy,
    };

    // Catalog
    pub use crate::catalog::{CategoryFilter, ProductCard};

    // Newsletter
    pub use crate::newsletter::{EmailAddress, EmailError};
}
