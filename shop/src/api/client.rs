//! HTTP client for the json-server product API

use super::error::{ApiError, DEFAULT_ERROR_MESSAGE};
use crate::catalog::{Product, ProductId};
use crate::users::User;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Base URL of the local json-server
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// One page of the product listing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number
    pub number: u32,
    /// Products per page
    pub size: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self { number: 1, size: 12 }
    }
}

/// Product API client
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiClient {
    /// Create a client for the API at `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List every product
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures, error statuses, or bad JSON
    pub async fn all_products(&self) -> Result<Vec<Product>, ApiError> {
        self.fetch_json(self.get("/productos")).await
    }

    /// Fetch one product
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with status 404 when the product does not exist
    pub async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.fetch_json(self.get(&format!("/productos/{id}"))).await
    }

    /// List the products of one category
    ///
    /// # Errors
    ///
    /// See [`ApiClient::all_products`]
    pub async fn products_by_category(&self, category: &str) -> Result<Vec<Product>, ApiError> {
        self.fetch_json(self.get("/productos").query(&[("categoria", category)]))
            .await
    }

    /// Products whose name matches `query`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::all_products`]
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        self.fetch_json(self.get("/productos").query(&[("nombre_like", query)]))
            .await
    }

    /// One page of the product listing
    ///
    /// # Errors
    ///
    /// See [`ApiClient::all_products`]
    pub async fn products_page(&self, page: Page) -> Result<Vec<Product>, ApiError> {
        self.fetch_json(
            self.get("/productos")
                .query(&[("_page", page.number), ("_limit", page.size)]),
        )
        .await
    }

    /// List the users registered in the local API
    ///
    /// # Errors
    ///
    /// See [`ApiClient::all_products`]
    pub async fn all_users(&self) -> Result<Vec<User>, ApiError> {
        self.fetch_json(self.get("/usuarios")).await
    }

    /// Fetch one user of the local API
    ///
    /// # Errors
    ///
    /// See [`ApiClient::product`]
    pub async fn user(&self, id: u64) -> Result<User, ApiError> {
        self.fetch_json(self.get(&format!("/usuarios/{id}"))).await
    }

    /// Fetch the user list from an absolute URL, such as the public
    /// placeholder API
    ///
    /// # Errors
    ///
    /// See [`ApiClient::all_products`]
    pub async fn fetch_users(&self, url: &str) -> Result<Vec<User>, ApiError> {
        self.fetch_json(self.client.get(url)).await
    }

    /// Whether the API answers a minimal listing request
    ///
    /// Never fails: any error counts as unhealthy.
    pub async fn check_health(&self) -> bool {
        let result = self
            .get("/productos")
            .query(&[("_limit", 1)])
            .send()
            .await;

        match result {
            Ok(response) => response.status().is_success(),
            Err(error) => {
                tracing::debug!(%error, "Health check failed");
                false
            },
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(format!("{}{path}", self.base_url))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        let status = response.status();
        let url = response.url().clone();

        if !status.is_success() {
            let body = response
                .bytes()
                .await
                .map_err(|e| ApiError::Connection(e.to_string()))?;
            let message = error_message(&body);
            tracing::debug!(%url, status = status.as_u16(), %message, "API request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        tracing::trace!(%url, "API response received");
        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                ApiError::Decode(e.to_string())
            } else {
                ApiError::Connection(e.to_string())
            }
        })
    }
}

/// `message` field of an error body, or the generic message
fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| value.get("message"))
        .and_then(serde_json::Value::as_str)
        .filter(|message| !message.is_empty())
        .map_or_else(|| DEFAULT_ERROR_MESSAGE.to_string(), str::to_string)
}
