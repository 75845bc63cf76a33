//! Storefront demo built on the Shopfront reducer architecture.
//!
//! - [`cart`]: the session cart, persisted under the `shopping-cart` key
//! - [`catalog`]: product records, client-side filters and the catalog loader
//! - [`api`]: HTTP client for the json-server product API
//! - [`search`]: debounced product search
//! - [`users`]: HTML table of the public user list
//! - [`card`]: reusable card component
//!
//! # Quick Start
//!
//! ```no_run
//! use shopfront::cart::{CartStore, MemoryStorage};
//! use shopfront::catalog::Product;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cart = CartStore::open(Arc::new(MemoryStorage::new())).await?;
//!
//! cart.add(Product::new(1_u64, "Teclado", 100.0)).await?;
//! cart.add(Product::new(1_u64, "Teclado", 100.0)).await?;
//!
//! let state = cart.snapshot().await;
//! assert_eq!(state.item_count(), 2);
//! assert_eq!(state.total(), 200.0);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod card;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod search;
pub mod users;

pub use config::{ConfigError, ShopConfig};
