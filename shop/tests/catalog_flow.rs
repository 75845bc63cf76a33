//! Integration tests for the catalog loader running in a Store

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use shopfront::api::mock::MockProductSource;
use shopfront::api::{ApiError, ProductSource};
use shopfront::catalog::{
    CatalogAction, CatalogEnvironment, CatalogReducer, CatalogState, FilterUpdate, PriceRange,
    Product,
};
use shopfront_runtime::Store;
use shopfront_testing::test_clock;
use std::sync::Arc;
use std::time::Duration;

type CatalogStore = Store<CatalogState, CatalogAction, CatalogEnvironment, CatalogReducer>;

const TIMEOUT: Duration = Duration::from_secs(2);

fn catalog_store(source: Arc<dyn ProductSource>) -> CatalogStore {
    Store::new(
        CatalogState::default(),
        CatalogReducer::new(),
        CatalogEnvironment::new(source, Arc::new(test_clock())),
    )
}

fn is_outcome(action: &CatalogAction) -> bool {
    matches!(
        action,
        CatalogAction::Loaded { .. } | CatalogAction::Failed { .. }
    )
}

#[tokio::test]
async fn fetch_then_filter() {
    let store = catalog_store(Arc::new(MockProductSource::new(vec![
        Product::new(1_u64, "Notebook", 1500.0).with_category("Computadoras"),
        Product::new(2_u64, "Mouse", 25.0).with_category("Periféricos"),
        Product::new(3_u64, "Teclado", 120.0).with_category("Periféricos"),
    ])));

    store
        .send_and_wait_for(CatalogAction::Fetch, is_outcome, TIMEOUT)
        .await
        .unwrap();
    store
        .send(CatalogAction::UpdateFilter(FilterUpdate::PriceRange(
            PriceRange::from_preset("under-100"),
        )))
        .await
        .unwrap();

    let state = store.state(Clone::clone).await;
    assert!(!state.loading);
    assert!(state.loaded_at.is_some());
    assert_eq!(state.categories(), vec!["Computadoras", "Periféricos"]);
    let visible: Vec<_> = state
        .visible_products()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(visible, vec!["Mouse"]);
}

#[tokio::test]
async fn failure_then_retry() {
    let source = MockProductSource::failing(ApiError::Status {
        status: 503,
        message: "Servicio no disponible".into(),
    })
    .with_latency(Duration::from_millis(50));
    let store = catalog_store(Arc::new(source));

    store
        .send_and_wait_for(CatalogAction::Fetch, is_outcome, TIMEOUT)
        .await
        .unwrap();
    assert_eq!(
        store.state(|s| s.error.clone()).await.as_deref(),
        Some("Servicio no disponible")
    );

    // Retrying clears the banner while the request is in flight
    store.send(CatalogAction::Fetch).await.unwrap();
    let state = store.state(Clone::clone).await;
    assert!(state.loading);
    assert_eq!(state.error, None);
}
