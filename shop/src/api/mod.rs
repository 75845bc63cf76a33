//! Product API access.
//!
//! [`ApiClient`] talks HTTP to the json-server mock API. Reducers reach the
//! API through the [`ProductSource`] trait so tests can substitute
//! [`mock::MockProductSource`].

mod client;
mod error;
pub mod mock;

pub use client::{ApiClient, DEFAULT_BASE_URL, Page};
pub use error::{ApiError, DEFAULT_ERROR_MESSAGE};

use crate::catalog::Product;
use futures::future::BoxFuture;

/// Source of product listings
///
/// Uses explicit boxed-future returns so it can be stored as
/// `Arc<dyn ProductSource>` in reducer environments.
pub trait ProductSource: Send + Sync {
    /// Every product in the catalog
    fn all_products(&self) -> BoxFuture<'_, Result<Vec<Product>, ApiError>>;

    /// Products whose name matches `query`
    fn search_products<'a>(&'a self, query: &'a str)
    -> BoxFuture<'a, Result<Vec<Product>, ApiError>>;
}

impl ProductSource for ApiClient {
    fn all_products(&self) -> BoxFuture<'_, Result<Vec<Product>, ApiError>> {
        Box::pin(Self::all_products(self))
    }

    fn search_products<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Product>, ApiError>> {
        Box::pin(Self::search_products(self, query))
    }
}
