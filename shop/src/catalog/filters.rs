//! Client-side filtering and sorting of the product list.

use super::product::Product;

/// Inclusive price bounds; `max` of `None` means unbounded
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceRange {
    /// Lowest accepted price
    pub min: f64,
    /// Highest accepted price
    pub max: Option<f64>,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl PriceRange {
    /// Accepts every price
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { min: 0.0, max: None }
    }

    /// Parses a preset key from the price select box
    ///
    /// Unknown keys, including the empty "all prices" option, yield
    /// [`PriceRange::unbounded`].
    #[must_use]
    pub fn from_preset(key: &str) -> Self {
        match key {
            "under-100" => Self {
                min: 0.0,
                max: Some(100.0),
            },
            "100-500" => Self {
                min: 100.0,
                max: Some(500.0),
            },
            "500-1000" => Self {
                min: 500.0,
                max: Some(1000.0),
            },
            "over-1000" => Self {
                min: 1000.0,
                max: None,
            },
            _ => Self::unbounded(),
        }
    }

    /// Whether `price` lies within the bounds
    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.max.is_none_or(|max| price <= max)
    }

    /// Whether the range narrows anything
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.min > 0.0 || self.max.is_some()
    }
}

/// Sort order for the product grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Name, A to Z, ignoring case
    #[default]
    Name,
    /// Cheapest first
    PriceLow,
    /// Most expensive first
    PriceHigh,
}

impl SortBy {
    /// Parses a select-box key; unknown keys sort by name
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            _ => Self::Name,
        }
    }

    /// Select-box key for this order
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
        }
    }
}

/// A change to one filter field
#[derive(Clone, Debug, PartialEq)]
pub enum FilterUpdate {
    /// Restrict to a category; an empty string means all categories
    Category(String),
    /// Restrict by price
    PriceRange(PriceRange),
    /// Change the sort order
    SortBy(SortBy),
    /// Free-text match on name or description
    SearchTerm(String),
}

/// Current filter selection
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductFilters {
    /// Exact category to keep, all when `None`
    pub category: Option<String>,
    /// Price bounds
    pub price_range: PriceRange,
    /// Sort order
    pub sort_by: SortBy,
    /// Case-insensitive substring of name or description
    pub search_term: String,
}

impl ProductFilters {
    /// Applies a single field change
    pub fn update(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Category(category) => {
                self.category = Some(category).filter(|c| !c.is_empty());
            },
            FilterUpdate::PriceRange(range) => self.price_range = range,
            FilterUpdate::SortBy(sort_by) => self.sort_by = sort_by,
            FilterUpdate::SearchTerm(term) => self.search_term = term,
        }
    }

    /// Back to the defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether any field differs from its default
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.category.is_some()
            || !self.search_term.is_empty()
            || self.price_range.is_bounded()
            || self.sort_by != SortBy::Name
    }

    /// Whether `product` passes the category, price and search filters
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if self
            .category
            .as_ref()
            .is_some_and(|category| &product.category != category)
        {
            return false;
        }

        if !self.price_range.contains(product.price) {
            return false;
        }

        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        product.name.to_lowercase().contains(&needle)
            || product.description.to_lowercase().contains(&needle)
    }

    /// Filters and sorts `products`
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut visible: Vec<Product> = products
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect();

        match self.sort_by {
            SortBy::Name => visible.sort_by_cached_key(|product| product.name.to_lowercase()),
            SortBy::PriceLow => visible.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortBy::PriceHigh => visible.sort_by(|a, b| b.price.total_cmp(&a.price)),
        }
        visible
    }
}

/// Distinct categories of `products`, sorted
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> = products
        .iter()
        .map(|product| product.category.clone())
        .collect();
    categories.sort();
    categories.dedup();
    categories
}
