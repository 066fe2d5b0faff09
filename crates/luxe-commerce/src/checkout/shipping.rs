//! Shipping rule.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Flat-rate shipping that becomes free at a subtotal threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    /// Subtotal at or above which shipping is free.
    pub free_threshold: Money,
    /// Shipping charged below the threshold.
    pub flat_cost: Money,
}

impl ShippingPolicy {
    /// Create a new shipping policy.
    pub fn new(free_threshold: Money, flat_cost: Money) -> Self {
        Self {
            free_threshold,
            flat_cost,
        }
    }

    /// Shipping charged for a given subtotal. Reaching the threshold exactly
    /// qualifies for free shipping.
    pub fn quote(&self, subtotal: &Money) -> Money {
        if self.qualifies_for_free(subtotal) {
            Money::zero(self.flat_cost.currency)
        } else {
            self.flat_cost
        }
    }

    /// Check if a subtotal ships free.
    pub fn qualifies_for_free(&self, subtotal: &Money) -> bool {
        subtotal.amount_cents >= self.free_threshold.amount_cents
    }

    /// Amount still needed to reach free shipping, if any.
    pub fn remaining_for_free(&self, subtotal: &Money) -> Option<Money> {
        if self.qualifies_for_free(subtotal) {
            None
        } else {
            Some(Money::new(
                self.free_threshold.amount_cents - subtotal.amount_cents,
                self.free_threshold.currency,
            ))
        }
    }
}
