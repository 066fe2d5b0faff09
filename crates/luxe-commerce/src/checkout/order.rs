//! Order descriptor handed to the payment widget.

use crate::cart::{Cart, Totals};
use crate::config::StoreConfig;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// One line of the order breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: u32,
}

/// Snapshot of the cart in the shape the payment provider needs.
///
/// Rebuilt from the current cart whenever the widget asks for an order, so
/// it always reflects the latest state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDescriptor {
    /// Store display name.
    pub store_name: String,
    /// Order currency.
    pub currency: Currency,
    /// Sum of line totals.
    pub subtotal: Money,
    /// Shipping charge.
    pub shipping: Money,
    /// Amount to charge.
    pub total: Money,
    /// Per-line breakdown.
    pub items: Vec<OrderLine>,
}

impl OrderDescriptor {
    /// Build from a cart under the given store settings.
    pub fn from_cart(cart: &Cart, config: &StoreConfig) -> Self {
        let Totals {
            subtotal,
            shipping,
            total,
        } = cart.totals(config);

        let items = cart
            .items()
            .iter()
            .map(|item| OrderLine {
                id: item.id.clone(),
                name: item.name.clone(),
                unit_price: item.unit_price(config.currency),
                quantity: item.quantity,
            })
            .collect();

        Self {
            store_name: config.display_name.clone(),
            currency: config.currency,
            subtotal,
            shipping,
            total,
            items,
        }
    }

    /// Check if there is nothing to pay for.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Purchase-unit payload in the string-amount format payment SDKs expect.
    pub fn to_provider_payload(&self) -> serde_json::Value {
        let code = self.currency.code();
        let amount = |money: &Money| {
            json!({
                "currency_code": code,
                "value": money.display_amount(),
            })
        };

        json!({
            "description": format!("{} order", self.store_name),
            "amount": {
                "currency_code": code,
                "value": self.total.display_amount(),
                "breakdown": {
                    "item_total": amount(&self.subtotal),
                    "shipping": amount(&self.shipping),
                },
            },
            "items": self.items.iter().map(|line| json!({
                "name": line.name,
                "sku": line.id.as_str(),
                "unit_amount": amount(&line.unit_price),
                "quantity": line.quantity.to_string(),
            })).collect::<Vec<_>>(),
        })
    }
}
