//! Shopping cart module.
//!
//! Contains the cart and its lines, derived totals, and the manager that
//! keeps the cart persisted and the presentation layer in sync.

mod cart;
mod manager;
mod totals;

pub use cart::{Cart, CartItem, QuantityChange, StoredLine};
pub use manager::CartManager;
pub use totals::Totals;
