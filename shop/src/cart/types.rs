//! Domain types for the shopping cart.
//!
//! The cart is an ordered list of line items plus two derived totals. The
//! totals are private and recomputed after every change to the list, so they
//! can never drift from the items.

use crate::catalog::{Product, ProductId};
use serde::{Deserialize, Serialize};

/// Storage key under which the cart's item list is persisted
pub const CART_STORAGE_KEY: &str = "shopping-cart";

/// One product line in the cart
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier (unique within the cart)
    pub id: ProductId,
    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,
    /// Unit price
    #[serde(rename = "precio")]
    pub price: f64,
    /// Image URL
    #[serde(rename = "imagen", default)]
    pub image: String,
    /// Number of units, at least 1
    pub quantity: u32,
}

impl CartItem {
    /// Creates a line for `product` with a quantity of 1
    #[must_use]
    pub fn from_product(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            quantity: 1,
        }
    }

    /// Price times quantity
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Rounds a money amount to two decimal places
///
/// Negative zero comes back as `0.0`; the float sum of an empty list is `-0.0`.
#[must_use]
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0 + 0.0
}

/// State of the shopping cart
///
/// `item_count` and `total` are derived from `items`. `revision` counts
/// item-list changes and orders persistence writes; it is not part of the
/// cart's value and is ignored by equality.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CartState {
    items: Vec<CartItem>,
    item_count: u64,
    total: f64,
    #[serde(skip)]
    revision: u64,
}

impl PartialEq for CartState {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
            && self.item_count == other.item_count
            && self.total.to_bits() == other.total.to_bits()
    }
}

impl CartState {
    /// Creates an empty cart
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cart holding `items`, with totals computed
    #[must_use]
    pub fn with_items(items: Vec<CartItem>) -> Self {
        let mut state = Self::default();
        state.replace(items);
        state
    }

    /// Line items in the order they were first added
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of all quantities
    #[must_use]
    pub const fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Sum of price × quantity, rounded to cents
    #[must_use]
    pub const fn total(&self) -> f64 {
        self.total
    }

    /// Number of item-list changes applied so far
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the cart has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the line for `id`
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Whether a line for `id` exists
    #[must_use]
    pub fn is_in_cart(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Quantity of `id` in the cart, 0 when absent
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.get(id).map_or(0, |item| item.quantity)
    }

    /// Serializes the item list as it is persisted
    ///
    /// # Errors
    ///
    /// Returns the serializer error; plain data cannot fail in practice.
    pub fn items_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.items)
    }

    /// Adds one unit of `product`; returns whether the item list changed
    ///
    /// A product without a finite price is refused, since the persisted
    /// JSON could not represent it.
    pub(crate) fn add(&mut self, product: Product) -> bool {
        if !product.price.is_finite() {
            return false;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem::from_product(product));
        }
        self.changed();
        true
    }

    /// Removes the line for `id`; returns whether anything was removed
    pub(crate) fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.changed();
        }
        removed
    }

    /// Sets the quantity of `id`; non-positive quantities remove the line
    ///
    /// Returns whether the item list changed.
    pub(crate) fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        if quantity == 0 {
            return self.remove(id);
        }
        match self.items.iter_mut().find(|item| &item.id == id) {
            Some(item) => {
                item.quantity = quantity;
                self.changed();
                true
            },
            None => false,
        }
    }

    /// Empties the cart
    pub(crate) fn clear(&mut self) {
        self.items.clear();
        self.changed();
    }

    /// Replaces the whole item list
    ///
    /// Lines with a zero quantity are dropped. A repeated id overwrites the
    /// earlier line in place, so the last record wins.
    pub(crate) fn replace(&mut self, items: Vec<CartItem>) {
        self.items.clear();
        for item in items.into_iter().filter(|item| item.quantity > 0) {
            match self.items.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => *existing = item,
                None => self.items.push(item),
            }
        }
        self.changed();
    }

    fn changed(&mut self) {
        self.item_count = self.items.iter().map(|item| u64::from(item.quantity)).sum();
        self.total = round_cents(self.items.iter().map(CartItem::subtotal).sum());
        self.revision += 1;
    }
}

/// Parses a persisted item list
///
/// # Errors
///
/// Returns the parse error for syntax errors, non-array JSON, or records
/// missing required fields.
pub fn parse_items(payload: &str) -> Result<Vec<CartItem>, serde_json::Error> {
    serde_json::from_str(payload)
}

/// Actions handled by the cart reducer
#[derive(Clone, Debug, PartialEq)]
pub enum CartAction {
    /// Add one unit of a product
    Add {
        /// Product to add
        product: Product,
    },

    /// Remove a product's line, if present
    Remove {
        /// Product to remove
        id: ProductId,
    },

    /// Set a product's quantity; zero or less removes the line
    SetQuantity {
        /// Product to update
        id: ProductId,
        /// New quantity
        quantity: i64,
    },

    /// Empty the cart
    Clear,

    /// Replace the item list with previously persisted items
    Load {
        /// Items read from storage
        items: Vec<CartItem>,
    },
}
