//! Cart and line item types.

use std::collections::HashSet;

use crate::cart::Totals;
use crate::config::StoreConfig;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    /// Product/variant identity; unique within a cart.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price at the time the item was first added, in minor units.
    pub price_cents: i64,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// Create a new line with quantity 1.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price_cents: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price_cents,
            quantity: 1,
        }
    }

    /// Unit price in the store currency.
    pub fn unit_price(&self, currency: Currency) -> Money {
        Money::new(self.price_cents, currency)
    }

    /// Unit price times quantity.
    pub fn line_total(&self, currency: Currency) -> Money {
        self.unit_price(currency)
            .saturating_multiply(i64::from(self.quantity))
    }
}

/// Result of [`Cart::update_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// Item kept with the new quantity.
    Updated(u32),
    /// Quantity dropped to zero or below; item removed.
    Removed,
    /// No item with that ID.
    NotFound,
}

/// A cart line as written to storage.
///
/// Persisted as `{"id", "name", "price", "quantity"}` with `price` as a
/// decimal number in major units of the store currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLine {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

/// A shopping cart: ordered line items, at most one per product ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from existing lines, checking cart invariants.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, CommerceError> {
        let cart = Self { items };
        cart.validate()?;
        Ok(cart)
    }

    /// Rebuild a cart from stored lines, converting prices with the store
    /// currency. Fails on any line that breaks a cart invariant.
    pub fn from_stored(lines: Vec<StoredLine>, currency: Currency) -> Result<Self, CommerceError> {
        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            if !line.price.is_finite() {
                return Err(CommerceError::InvalidCart(format!(
                    "item {} has a non-numeric price",
                    line.id
                )));
            }
            items.push(CartItem {
                price_cents: Money::from_decimal(line.price, currency).amount_cents,
                id: line.id,
                name: line.name,
                quantity: line.quantity,
            });
        }
        Self::from_items(items)
    }

    /// Lines in storage form, prices in major units of `currency`.
    pub fn to_stored(&self, currency: Currency) -> Vec<StoredLine> {
        self.items
            .iter()
            .map(|item| StoredLine {
                id: item.id.clone(),
                name: item.name.clone(),
                price: item.unit_price(currency).to_decimal(),
                quantity: item.quantity,
            })
            .collect()
    }

    /// Check that IDs are unique, every quantity is positive and no price
    /// is negative.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if item.price_cents < 0 {
                return Err(CommerceError::InvalidCart(format!(
                    "item {} has a negative price",
                    item.id
                )));
            }
            if item.quantity == 0 {
                return Err(CommerceError::InvalidCart(format!(
                    "item {} has zero quantity",
                    item.id
                )));
            }
            if !seen.insert(&item.id) {
                return Err(CommerceError::InvalidCart(format!(
                    "duplicate item {}",
                    item.id
                )));
            }
        }
        Ok(())
    }

    /// Add one unit of a product.
    ///
    /// An existing line is incremented (keeping its original name and price);
    /// otherwise a new line with quantity 1 is appended. Returns the line's
    /// quantity after the add.
    pub fn add(
        &mut self,
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price_cents: i64,
    ) -> u32 {
        let id = id.into();
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return existing.quantity;
        }

        self.items.push(CartItem::new(id, name, price_cents));
        1
    }

    /// Remove a line. Returns whether anything was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() < len_before
    }

    /// Adjust a line's quantity by `delta`, removing it at zero or below.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) -> QuantityChange {
        let Some(item) = self.items.iter_mut().find(|i| &i.id == id) else {
            return QuantityChange::NotFound;
        };

        let new_quantity = i64::from(item.quantity).saturating_add(delta);
        if new_quantity <= 0 {
            self.remove(id);
            return QuantityChange::Removed;
        }

        item.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        QuantityChange::Updated(item.quantity)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all quantities.
    pub fn count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Get a line by product ID.
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Derived totals under the given store settings.
    pub fn totals(&self, config: &StoreConfig) -> Totals {
        Totals::compute(&self.items, config)
    }
}
