//! Derived cart totals.

use crate::cart::CartItem;
use crate::config::StoreConfig;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Subtotal, shipping and grand total for a set of lines.
///
/// Never stored; always recomputed from the lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of price times quantity.
    pub subtotal: Money,
    /// Zero at or above the free-shipping threshold, flat cost below it.
    pub shipping: Money,
    /// Subtotal plus shipping.
    pub total: Money,
}

impl Totals {
    /// Compute totals from scratch.
    pub fn compute(items: &[CartItem], config: &StoreConfig) -> Self {
        let currency = config.currency;
        let subtotal = items
            .iter()
            .fold(Money::zero(currency), |acc, item| {
                acc.saturating_add(&item.line_total(currency))
            });
        let shipping = config.shipping_policy().quote(&subtotal);
        let total = subtotal.saturating_add(&shipping);

        Self {
            subtotal,
            shipping,
            total,
        }
    }
}
