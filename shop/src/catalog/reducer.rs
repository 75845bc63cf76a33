//! Reducer for loading and filtering the product catalog.

use super::filters::{FilterUpdate, ProductFilters, categories};
use super::product::Product;
use crate::api::ProductSource;
use chrono::{DateTime, Utc};
use shopfront_core::{SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec};
use std::sync::Arc;

/// Catalog screen state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogState {
    /// Last successfully loaded product list
    pub products: Vec<Product>,
    /// Whether a fetch is in flight
    pub loading: bool,
    /// Message of the last failed fetch
    pub error: Option<String>,
    /// When `products` was loaded
    pub loaded_at: Option<DateTime<Utc>>,
    /// Current filter selection
    pub filters: ProductFilters,
    /// Id of the latest fetch; results of older fetches are dropped
    pub request: u64,
}

impl CatalogState {
    /// Products passing the current filters, sorted
    #[must_use]
    pub fn visible_products(&self) -> Vec<Product> {
        self.filters.apply(&self.products)
    }

    /// Distinct categories of the loaded products
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        categories(&self.products)
    }
}

/// Actions handled by the catalog reducer
#[derive(Clone, Debug, PartialEq)]
pub enum CatalogAction {
    /// Load (or reload) the product list
    Fetch,

    /// A fetch succeeded
    Loaded {
        /// Fetch this result belongs to
        request: u64,
        /// Products returned by the API
        products: Vec<Product>,
    },

    /// A fetch failed
    Failed {
        /// Fetch this result belongs to
        request: u64,
        /// Message for the error banner
        message: String,
    },

    /// Change one filter field
    UpdateFilter(FilterUpdate),

    /// Restore the default filters
    ResetFilters,
}

/// Environment dependencies for the catalog reducer
#[derive(Clone)]
pub struct CatalogEnvironment {
    /// Where products come from
    pub source: Arc<dyn ProductSource>,
    /// Clock for load timestamps
    pub clock: Arc<dyn Clock>,
}

impl CatalogEnvironment {
    /// Creates a new `CatalogEnvironment`
    #[must_use]
    pub fn new(source: Arc<dyn ProductSource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }
}

/// Reducer for the catalog screen
#[derive(Clone, Debug, Default)]
pub struct CatalogReducer;

impl CatalogReducer {
    /// Creates a new `CatalogReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CatalogReducer {
    type State = CatalogState;
    type Action = CatalogAction;
    type Environment = CatalogEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CatalogAction::Fetch => {
                state.request += 1;
                state.loading = true;
                state.error = None;

                let request = state.request;
                let source = Arc::clone(&env.source);
                smallvec![Effect::future(async move {
                    Some(match source.all_products().await {
                        Ok(products) => CatalogAction::Loaded { request, products },
                        Err(error) => {
                            tracing::warn!(%error, "Failed to load products");
                            CatalogAction::Failed {
                                request,
                                message: error.user_message(),
                            }
                        },
                    })
                })]
            },

            CatalogAction::Loaded { request, products } => {
                if request != state.request {
                    tracing::debug!(request, current = state.request, "Dropping stale catalog");
                    return SmallVec::new();
                }
                tracing::debug!(products = products.len(), "Catalog loaded");
                state.products = products;
                state.loading = false;
                state.loaded_at = Some(env.clock.now());
                SmallVec::new()
            },

            CatalogAction::Failed { request, message } => {
                if request != state.request {
                    return SmallVec::new();
                }
                state.loading = false;
                state.error = Some(message);
                SmallVec::new()
            },

            CatalogAction::UpdateFilter(update) => {
                state.filters.update(update);
                SmallVec::new()
            },

            CatalogAction::ResetFilters => {
                state.filters.reset();
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::mock::MockProductSource;
    use crate::catalog::SortBy;
    use shopfront_testing::{ReducerTest, assertions, test_clock};

    fn test_env() -> CatalogEnvironment {
        CatalogEnvironment::new(
            Arc::new(MockProductSource::new(Vec::new())),
            Arc::new(test_clock()),
        )
    }

    #[test]
    fn fetch_sets_loading_and_clears_error() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState {
                error: Some("boom".into()),
                ..CatalogState::default()
            })
            .when_action(CatalogAction::Fetch)
            .then_state(|state| {
                assert!(state.loading);
                assert_eq!(state.error, None);
                assert_eq!(state.request, 1);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn loaded_records_time_from_clock() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState::default())
            .when_actions([
                CatalogAction::Fetch,
                CatalogAction::Loaded {
                    request: 1,
                    products: vec![Product::new(1_u64, "Mouse", 10.0)],
                },
            ])
            .then_state(|state| {
                assert!(!state.loading);
                assert_eq!(state.products.len(), 1);
                assert_eq!(state.loaded_at, Some(test_clock().now()));
            })
            .run();
    }

    #[test]
    fn stale_results_are_dropped() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState::default())
            .when_actions([
                CatalogAction::Fetch,
                CatalogAction::Fetch,
                CatalogAction::Failed {
                    request: 1,
                    message: "old".into(),
                },
            ])
            .then_state(|state| {
                assert!(state.loading);
                assert_eq!(state.error, None);
            })
            .run();
    }

    #[test]
    fn failure_keeps_previous_products() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState {
                products: vec![Product::new(1_u64, "Mouse", 10.0)],
                ..CatalogState::default()
            })
            .when_actions([
                CatalogAction::Fetch,
                CatalogAction::Failed {
                    request: 1,
                    message: "Error de conexión con el servidor".into(),
                },
            ])
            .then_state(|state| {
                assert!(!state.loading);
                assert_eq!(
                    state.error.as_deref(),
                    Some("Error de conexión con el servidor")
                );
                assert_eq!(state.products.len(), 1);
            })
            .run();
    }

    #[test]
    fn filters_update_and_reset_without_effects() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState::default())
            .when_actions([
                CatalogAction::UpdateFilter(FilterUpdate::SortBy(SortBy::PriceHigh)),
                CatalogAction::ResetFilters,
            ])
            .then_state(|state| assert!(!state.filters.has_active_filters()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }
}
