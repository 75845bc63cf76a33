//! Storefront configuration.
//!
//! Defaults suit a json-server running locally on port 3001. Every value can
//! be overridden from the environment.

use crate::api::DEFAULT_BASE_URL;
use crate::search::DEFAULT_DEBOUNCE;
use crate::users::DEFAULT_USERS_URL;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Overrides [`ShopConfig::api_base_url`]
pub const ENV_API_URL: &str = "SHOPFRONT_API_URL";
/// Overrides [`ShopConfig::users_url`]
pub const ENV_USERS_URL: &str = "SHOPFRONT_USERS_URL";
/// Overrides [`ShopConfig::cart_dir`]
pub const ENV_CART_DIR: &str = "SHOPFRONT_CART_DIR";
/// Overrides [`ShopConfig::search_debounce`], in milliseconds
pub const ENV_SEARCH_DEBOUNCE_MS: &str = "SHOPFRONT_SEARCH_DEBOUNCE_MS";

/// Errors raised while reading configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds something that is not a number of milliseconds
    #[error("{name} must be a whole number of milliseconds, got {value:?}")]
    InvalidDuration {
        /// Variable name
        name: &'static str,
        /// Offending value
        value: String,
    },
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    /// Base URL of the product API.
    ///
    /// Default: `http://localhost:3001`
    pub api_base_url: String,

    /// URL of the public user list.
    pub users_url: String,

    /// Directory holding the persisted cart.
    ///
    /// Default: `.shopfront`
    pub cart_dir: PathBuf,

    /// Quiet period before a search query is sent.
    ///
    /// Default: 300 ms
    pub search_debounce: Duration,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            users_url: DEFAULT_USERS_URL.to_string(),
            cart_dir: PathBuf::from(".shopfront"),
            search_debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl ShopConfig {
    /// Reads overrides from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDuration`] if the debounce variable is
    /// set but not a whole number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads overrides through `lookup`, which maps a variable name to its value
    ///
    /// Unset and empty variables keep the default.
    ///
    /// # Errors
    ///
    /// See [`ShopConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_API_URL) {
            config.api_base_url = url;
        }
        if let Some(url) = get(ENV_USERS_URL) {
            config.users_url = url;
        }
        if let Some(dir) = get(ENV_CART_DIR) {
            config.cart_dir = PathBuf::from(dir);
        }
        if let Some(value) = get(ENV_SEARCH_DEBOUNCE_MS) {
            let millis = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidDuration {
                    name: ENV_SEARCH_DEBOUNCE_MS,
                    value: value.clone(),
                })?;
            config.search_debounce = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// Set the product API base URL.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the cart directory.
    #[must_use]
    pub fn with_cart_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cart_dir = dir.into();
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = ShopConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ShopConfig::default());
        assert_eq!(config.api_base_url, "http://localhost:3001");
        assert_eq!(config.search_debounce, Duration::from_millis(300));
    }

    #[test]
    fn variables_override_defaults() {
        let config = ShopConfig::from_lookup(lookup(&[
            (ENV_API_URL, "http://api.test"),
            (ENV_CART_DIR, "/tmp/cart"),
            (ENV_SEARCH_DEBOUNCE_MS, " 50 "),
            (ENV_USERS_URL, ""),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "http://api.test");
        assert_eq!(config.cart_dir, PathBuf::from("/tmp/cart"));
        assert_eq!(config.search_debounce, Duration::from_millis(50));
        assert_eq!(config.users_url, DEFAULT_USERS_URL);
    }

    #[test]
    fn invalid_debounce_is_rejected() {
        let error =
            ShopConfig::from_lookup(lookup(&[(ENV_SEARCH_DEBOUNCE_MS, "fast")])).unwrap_err();
        assert_eq!(
            error,
            ConfigError::InvalidDuration {
                name: ENV_SEARCH_DEBOUNCE_MS,
                value: "fast".into(),
            }
        );
    }
}
