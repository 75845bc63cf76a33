//! In-memory product source for tests and offline demos.

use super::{ApiError, ProductSource};
use crate::catalog::Product;
use futures::future::BoxFuture;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock product source.
///
/// Serves a fixed product list, optionally failing every call, and records
/// the search queries it receives.
#[derive(Debug, Clone, Default)]
pub struct MockProductSource {
    products: Vec<Product>,
    failure: Option<ApiError>,
    latency: Option<Duration>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockProductSource {
    /// Create a source serving `products`
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    /// Create a source whose every call fails with `error`
    #[must_use]
    pub fn failing(error: ApiError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Delay every response by `latency`
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Search queries received so far, in order
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }

    async fn respond(&self, products: Vec<Product>) -> Result<Vec<Product>, ApiError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(products),
        }
    }
}

impl ProductSource for MockProductSource {
    fn all_products(&self) -> BoxFuture<'_, Result<Vec<Product>, ApiError>> {
        Box::pin(self.respond(self.products.clone()))
    }

    fn search_products<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Product>, ApiError>> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_string());
        }
        let needle = query.to_lowercase();
        let matches = self
            .products
            .iter()
            .filter(|product| product.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Box::pin(self.respond(matches))
    }
}
