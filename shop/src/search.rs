//! Debounced product search.
//!
//! Each keystroke bumps a generation counter and schedules a delayed
//! `Debounced` action carrying that generation. Only the action matching
//! the latest generation triggers a request, and only results tagged with
//! the latest generation are kept.

use crate::api::ProductSource;
use crate::catalog::Product;
use shopfront_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;
use std::time::Duration;

/// Wait after the last keystroke before searching
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Search box state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
    /// Text currently in the search box
    pub query: String,
    /// Results for the latest completed search
    pub results: Vec<Product>,
    /// Whether a search request is in flight
    pub loading: bool,
    /// Message of the last failed search
    pub error: Option<String>,
    /// Incremented on every query change
    pub generation: u64,
}

/// Actions handled by the search reducer
#[derive(Clone, Debug, PartialEq)]
pub enum SearchAction {
    /// The search box text changed
    QueryChanged(String),

    /// The debounce delay for `generation` elapsed
    Debounced {
        /// Query generation the timer was started for
        generation: u64,
    },

    /// A search request succeeded
    ResultsLoaded {
        /// Query generation the request was made for
        generation: u64,
        /// Matching products
        results: Vec<Product>,
    },

    /// A search request failed
    SearchFailed {
        /// Query generation the request was made for
        generation: u64,
        /// Message for the error banner
        message: String,
    },
}

/// Environment dependencies for the search reducer
#[derive(Clone)]
pub struct SearchEnvironment {
    /// Where search results come from
    pub source: Arc<dyn ProductSource>,
    /// Quiet period before a query is sent
    pub debounce: Duration,
}

impl SearchEnvironment {
    /// Creates an environment with the default debounce
    #[must_use]
    pub fn new(source: Arc<dyn ProductSource>) -> Self {
        Self {
            source,
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Overrides the debounce delay
    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

/// Reducer for the search box
#[derive(Clone, Debug, Default)]
pub struct SearchReducer;

impl SearchReducer {
    /// Creates a new `SearchReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for SearchReducer {
    type State = SearchState;
    type Action = SearchAction;
    type Environment = SearchEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SearchAction::QueryChanged(query) => {
                state.generation += 1;
                state.query = query;

                if state.query.trim().is_empty() {
                    state.results.clear();
                    state.loading = false;
                    return SmallVec::new();
                }

                smallvec![Effect::delay(
                    env.debounce,
                    SearchAction::Debounced {
                        generation: state.generation,
                    },
                )]
            },

            SearchAction::Debounced { generation } => {
                if generation != state.generation {
                    tracing::trace!(generation, "Superseded search timer");
                    return SmallVec::new();
                }

                state.loading = true;
                state.error = None;

                let query = state.query.clone();
                let source = Arc::clone(&env.source);
                smallvec![Effect::future(async move {
                    Some(match source.search_products(&query).await {
                        Ok(results) => SearchAction::ResultsLoaded {
                            generation,
                            results,
                        },
                        Err(error) => {
                            tracing::warn!(%error, %query, "Product search failed");
                            SearchAction::SearchFailed {
                                generation,
                                message: error.user_message(),
                            }
                        },
                    })
                })]
            },

            SearchAction::ResultsLoaded {
                generation,
                results,
            } => {
                if generation == state.generation {
                    state.results = results;
                    state.loading = false;
                }
                SmallVec::new()
            },

            SearchAction::SearchFailed {
                generation,
                message,
            } => {
                if generation == state.generation {
                    state.results.clear();
                    state.error = Some(message);
                    state.loading = false;
                }
                SmallVec::new()
            },
        }
    }
}
