//! Category filter for the product grid.

use crate::catalog::ProductCard;
use serde::{Deserialize, Serialize};

/// Which product cards a filter button shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    /// Show every card.
    #[default]
    All,
    /// Show cards whose category caption contains this text (lowercase).
    Category(String),
}

impl CategoryFilter {
    /// Build from a filter button label. `"All"` in any case means no filtering.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        if label == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(label)
        }
    }

    /// Check if a category caption passes the filter.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(needle) => category.to_lowercase().contains(needle.as_str()),
        }
    }

    /// Check if a card is visible. Cards without a category are always shown.
    pub fn shows(&self, card: &ProductCard) -> bool {
        card.category
            .as_deref()
            .map_or(true, |category| self.matches(category))
    }

    /// Visible cards, in their original order.
    pub fn apply<'a>(&self, cards: &'a [ProductCard]) -> Vec<&'a ProductCard> {
        cards.iter().filter(|card| self.shows(card)).collect()
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Category(label) => label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> Vec<ProductCard> {
        vec![
            ProductCard::new("1", "Crimson Gel", "Gel Polish", 18.5),
            ProductCard::new("2", "Almond Tips", "Press-On Nails", 24.0),
            ProductCard::new("3", "Nude Gel", "Gel Polish", 18.5),
            ProductCard::new("4", "Cuticle Oil", "Nail Care", 12.0),
        ]
    }

    #[test]
    fn test_from_label() {
        assert_eq!(CategoryFilter::from_label(" All "), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_label("Gel"),
            CategoryFilter::Category("gel".into())
        );
    }

    #[test]
    fn test_all_shows_everything() {
        let cards = cards();
        assert_eq!(CategoryFilter::All.apply(&cards).len(), 4);
    }

    #[test]
    fn test_substring_match_keeps_order() {
        let cards = cards();
        let visible = CategoryFilter::from_label("GEL").apply(&cards);
        let ids: Vec<&str> = visible.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_shared_word_matches_several_categories() {
        let cards = cards();
        assert_eq!(CategoryFilter::from_label("nail").apply(&cards).len(), 2);
    }

    #[test]
    fn test_no_match() {
        let cards = cards();
        assert!(CategoryFilter::from_label("glitter").apply(&cards).is_empty());
    }

    #[test]
    fn test_uncategorized_cards_always_shown() {
        let card = ProductCard {
            category: None,
            ..ProductCard::new("5", "Gift Card", "", 50.0)
        };
        assert!(CategoryFilter::from_label("gel").shows(&card));
    }
}
