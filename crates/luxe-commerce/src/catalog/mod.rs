//! Product catalog module.
//!
//! Contains the product cards listed on the storefront and the category
//! filter applied by the filter buttons.

mod filter;
mod product;

pub use filter::CategoryFilter;
pub use product::{find, ProductCard};
