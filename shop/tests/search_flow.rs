//! Integration tests for debounced search running in a Store

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use shopfront::api::mock::MockProductSource;
use shopfront::api::{ApiError, ProductSource};
use shopfront::catalog::Product;
use shopfront::search::{SearchAction, SearchEnvironment, SearchReducer, SearchState};
use shopfront_runtime::Store;
use std::sync::Arc;
use std::time::Duration;

type SearchStore = Store<SearchState, SearchAction, SearchEnvironment, SearchReducer>;

const DEBOUNCE: Duration = Duration::from_millis(20);
const TIMEOUT: Duration = Duration::from_secs(2);

fn products() -> Vec<Product> {
    vec![
        Product::new(1_u64, "Teclado", 120.0),
        Product::new(2_u64, "Monitor", 950.0),
        Product::new(3_u64, "Mouse", 25.0),
    ]
}

fn search_store(source: Arc<dyn ProductSource>) -> SearchStore {
    Store::new(
        SearchState::default(),
        SearchReducer::new(),
        SearchEnvironment::new(source).with_debounce(DEBOUNCE),
    )
}

fn is_result(action: &SearchAction) -> bool {
    matches!(
        action,
        SearchAction::ResultsLoaded { .. } | SearchAction::SearchFailed { .. }
    )
}

#[tokio::test]
async fn rapid_typing_sends_one_request() {
    let source = MockProductSource::new(products());
    let store = search_store(Arc::new(source.clone()));

    store
        .send(SearchAction::QueryChanged("m".into()))
        .await
        .unwrap();
    store
        .send(SearchAction::QueryChanged("mo".into()))
        .await
        .unwrap();
    store
        .send_and_wait_for(SearchAction::QueryChanged("mou".into()), is_result, TIMEOUT)
        .await
        .unwrap();

    assert_eq!(source.queries(), vec!["mou".to_string()]);
    let state = store.state(Clone::clone).await;
    assert!(!state.loading);
    assert_eq!(state.results.len(), 1);
    assert_eq!(state.results[0].name, "Mouse");
}

#[tokio::test]
async fn slow_response_for_old_query_is_discarded() {
    let source = MockProductSource::new(products()).with_latency(Duration::from_millis(100));
    let store = search_store(Arc::new(source.clone()));

    store
        .send(SearchAction::QueryChanged("tec".into()))
        .await
        .unwrap();
    // Let the first request start before typing again
    tokio::time::sleep(DEBOUNCE * 3).await;

    store
        .send_and_wait_for(
            SearchAction::QueryChanged("mon".into()),
            |action| matches!(action, SearchAction::ResultsLoaded { generation: 2, .. }),
            TIMEOUT,
        )
        .await
        .unwrap();

    assert_eq!(source.queries(), vec!["tec".to_string(), "mon".to_string()]);
    let state = store.state(Clone::clone).await;
    assert_eq!(state.query, "mon");
    let names: Vec<_> = state.results.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Monitor"]);
}

#[tokio::test]
async fn clearing_the_box_drops_results() {
    let store = search_store(Arc::new(MockProductSource::new(products())));
    store
        .send_and_wait_for(SearchAction::QueryChanged("m".into()), is_result, TIMEOUT)
        .await
        .unwrap();
    assert_eq!(store.state(|s| s.results.len()).await, 2);

    store
        .send(SearchAction::QueryChanged(String::new()))
        .await
        .unwrap();

    assert!(store.state(|s| s.results.is_empty()).await);
}

#[tokio::test]
async fn failed_search_shows_message() {
    let store = search_store(Arc::new(MockProductSource::failing(ApiError::Connection(
        "refused".into(),
    ))));

    let action = store
        .send_and_wait_for(SearchAction::QueryChanged("mouse".into()), is_result, TIMEOUT)
        .await
        .unwrap();

    assert!(matches!(action, SearchAction::SearchFailed { .. }));
    let state = store.state(Clone::clone).await;
    assert_eq!(
        state.error.as_deref(),
        Some("Error de conexión con el servidor")
    );
    assert!(state.results.is_empty());
}
