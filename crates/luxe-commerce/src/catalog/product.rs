//! Product cards shown on the storefront.

use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A product as listed on the storefront grid.
///
/// Catalog files write `price` as a decimal in major units of the store
/// currency (`price = 24.99`, or `price = 2400` for a yen store).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCard {
    /// Identity used when the card is added to the cart.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category caption, e.g. "Gel Polish". Cards without one are never
    /// hidden by a category filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Listed unit price, as written in the catalog.
    pub price: f64,
}

impl ProductCard {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: Some(category.into()),
            price,
        }
    }

    pub fn price(&self, currency: Currency) -> Money {
        Money::from_decimal(self.price, currency)
    }
}

/// Look up a card by ID.
pub fn find<'a>(cards: &'a [ProductCard], id: &ProductId) -> Option<&'a ProductCard> {
    cards.iter().find(|card| &card.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_from_toml() {
        let card: ProductCard = toml::from_str(
            r#"
id = "gel-red"
name = "Crimson Gel"
category = "Gel Polish"
price = 18.5
"#,
        )
        .unwrap();
        assert_eq!(card.price(Currency::USD).display(), "$18.50");
        assert_eq!(card.category.as_deref(), Some("Gel Polish"));
    }

    #[test]
    fn test_price_in_zero_decimal_currency() {
        let card = ProductCard::new("set", "Almond Set", "Press-On Nails", 2400.0);
        assert_eq!(card.price(Currency::JPY).amount_cents, 2400);
        assert_eq!(card.price(Currency::USD).amount_cents, 240_000);
    }

    #[test]
    fn test_find() {
        let cards = vec![
            ProductCard::new("a", "Base Coat", "Care", 9.0),
            ProductCard::new("b", "Top Coat", "Care", 9.5),
        ];
        assert_eq!(find(&cards, &ProductId::new("b")).unwrap().name, "Top Coat");
        assert!(find(&cards, &ProductId::new("z")).is_none());
    }
}
