//! Product records as served by the mock REST API.
//!
//! The mock API speaks Spanish on the wire (`nombre`, `precio`, ...); the
//! Rust side uses English field names and maps them with serde renames.

use serde::{Deserialize, Serialize};

/// Identifier of a product
///
/// The mock API hands out numeric ids, but some json-server versions use
/// string ids. Both forms are accepted and serialized back unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric id (`"id": 3`)
    Number(u64),
    /// String id (`"id": "3a9f"`)
    Text(String),
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// A product from the catalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,
    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,
    /// Unit price
    #[serde(rename = "precio")]
    pub price: f64,
    /// Free-text description
    #[serde(rename = "descripcion", default)]
    pub description: String,
    /// Category label
    #[serde(rename = "categoria", default)]
    pub category: String,
    /// Image URL
    #[serde(rename = "imagen", default)]
    pub image: String,
    /// Units available
    #[serde(default)]
    pub stock: u32,
}

impl Product {
    /// Creates a product with the fields the cart needs; the rest default
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            description: String::new(),
            category: String::new(),
            image: String::new(),
            stock: 0,
        }
    }

    /// Sets the category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the image URL
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Sets the stock
    #[must_use]
    pub const fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Whether the product is running out (the UI shows a "last units" badge)
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.stock < 10
    }
}
