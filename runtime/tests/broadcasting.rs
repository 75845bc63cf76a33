//! Integration tests for Store action broadcasting
//!
//! A small stock-lookup feature: asking for a product's stock starts an
//! async lookup whose result is fed back into the store and broadcast to
//! observers.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use shopfront_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use shopfront_runtime::{Store, StoreError};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
enum StockAction {
    Lookup { sku: u32 },
    Found { sku: u32, units: u32 },
    Missing { sku: u32 },
}

#[derive(Debug, Clone, Default)]
struct StockState {
    known: HashMap<u32, u32>,
    lookups: u32,
}

#[derive(Clone)]
struct StockEnvironment {
    warehouse: Arc<HashMap<u32, u32>>,
}

#[derive(Clone)]
struct StockReducer;

impl Reducer for StockReducer {
    type State = StockState;
    type Action = StockAction;
    type Environment = StockEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            StockAction::Lookup { sku } => {
                state.lookups += 1;
                let warehouse = Arc::clone(&env.warehouse);
                smallvec![Effect::future(async move {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    Some(warehouse.get(&sku).map_or(
                        StockAction::Missing { sku },
                        |&units| StockAction::Found { sku, units },
                    ))
                })]
            },
            StockAction::Found { sku, units } => {
                state.known.insert(sku, units);
                SmallVec::new()
            },
            StockAction::Missing { .. } => SmallVec::new(),
        }
    }
}

fn store() -> Store<StockState, StockAction, StockEnvironment, StockReducer> {
    let warehouse = HashMap::from([(1, 12), (2, 0)]);
    Store::new(
        StockState::default(),
        StockReducer,
        StockEnvironment {
            warehouse: Arc::new(warehouse),
        },
    )
}

#[tokio::test]
async fn send_and_wait_for_returns_effect_result() {
    let store = store();

    let result = store
        .send_and_wait_for(
            StockAction::Lookup { sku: 1 },
            |a| matches!(a, StockAction::Found { .. } | StockAction::Missing { .. }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(result, StockAction::Found { sku: 1, units: 12 });
    assert_eq!(store.state(|s| s.known.get(&1).copied()).await, Some(12));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn observed_actions_are_already_applied() {
    for round in 0..20 {
        let store = store();
        store
            .send_and_wait_for(
                StockAction::Lookup { sku: 1 },
                |a| matches!(a, StockAction::Found { .. }),
                Duration::from_secs(1),
            )
            .await
            .unwrap();

        assert_eq!(
            store.state(|s| s.known.get(&1).copied()).await,
            Some(12),
            "round {round}"
        );
        assert_eq!(store.state(|s| s.lookups).await, 1);
    }
}

#[tokio::test]
async fn missing_sku_is_reported() {
    let store = store();

    let result = store
        .send_and_wait_for(
            StockAction::Lookup { sku: 99 },
            |a| matches!(a, StockAction::Found { .. } | StockAction::Missing { .. }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(result, StockAction::Missing { sku: 99 });
    assert!(store.state(|s| s.known.is_empty()).await);
}

#[tokio::test]
async fn concurrent_lookups_filter_by_sku() {
    let store = store();

    let first = {
        let store = store.clone();
        tokio::spawn(async move {
            store
                .send_and_wait_for(
                    StockAction::Lookup { sku: 1 },
                    |a| matches!(a, StockAction::Found { sku: 1, .. }),
                    Duration::from_secs(1),
                )
                .await
        })
    };
    let second = {
        let store = store.clone();
        tokio::spawn(async move {
            store
                .send_and_wait_for(
                    StockAction::Lookup { sku: 2 },
                    |a| matches!(a, StockAction::Found { sku: 2, .. }),
                    Duration::from_secs(1),
                )
                .await
        })
    };

    assert_eq!(
        first.await.expect("task panicked").unwrap(),
        StockAction::Found { sku: 1, units: 12 }
    );
    assert_eq!(
        second.await.expect("task panicked").unwrap(),
        StockAction::Found { sku: 2, units: 0 }
    );
    assert_eq!(store.state(|s| s.lookups).await, 2);
}

#[tokio::test]
async fn subscribers_only_see_effect_actions() {
    let store = store();
    let mut rx = store.subscribe_actions();

    let mut handle = store.send(StockAction::Lookup { sku: 1 }).await.unwrap();
    handle
        .wait_with_timeout(Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(
        rx.recv().await.unwrap(),
        StockAction::Found { sku: 1, units: 12 }
    );
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn wait_for_unmatched_action_times_out() {
    let store = store();

    let result = store
        .send_and_wait_for(
            StockAction::Lookup { sku: 1 },
            |a| matches!(a, StockAction::Missing { .. }),
            Duration::from_millis(50),
        )
        .await;

    assert!(matches!(result, Err(StoreError::Timeout)));
}
