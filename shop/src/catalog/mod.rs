//! Product catalog: records, filters and the loader.

mod filters;
mod product;
mod reducer;

pub use filters::{FilterUpdate, PriceRange, ProductFilters, SortBy, categories};
pub use product::{Product, ProductId};
pub use reducer::{CatalogAction, CatalogEnvironment, CatalogReducer, CatalogState};
