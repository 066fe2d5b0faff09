//! Durable key-value storage for the Luxe Nails storefront.
//!
//! Plays the role browser local storage plays for the original page: a flat
//! namespace of string keys holding JSON documents, read and written
//! synchronously.
//!
//! # Example
//!
//! ```rust
//! use luxe_cache::{cache_key, Cache, MemoryStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Line {
//!     id: String,
//!     quantity: u32,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! let key = cache_key!("luxe-nails", "cart");
//!
//! cache.set(&key, &vec![Line { id: "sku1".into(), quantity: 2 }]).unwrap();
//! let lines: Option<Vec<Line>> = cache.get(&key).unwrap();
//! assert_eq!(lines.unwrap()[0].quantity, 2);
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
