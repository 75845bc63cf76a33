//! Reducer logic for the shopping cart.
//!
//! Every action that changes the item list is followed by a write of the
//! full list to storage. The snapshot is serialized inside the reducer,
//! while the state lock is held, and tagged with the cart revision so the
//! persister can discard snapshots that finish writing out of order.

use super::storage::CartPersister;
use super::types::{CartAction, CartState};
use shopfront_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;

/// Environment dependencies for the cart reducer
#[derive(Clone, Debug)]
pub struct CartEnvironment {
    /// Where item-list snapshots are written
    pub persister: Arc<CartPersister>,
}

impl CartEnvironment {
    /// Creates a new `CartEnvironment`
    #[must_use]
    pub const fn new(persister: Arc<CartPersister>) -> Self {
        Self { persister }
    }
}

/// Reducer for the shopping cart
#[derive(Clone, Debug, Default)]
pub struct CartReducer;

impl CartReducer {
    /// Creates a new `CartReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the effect persisting the current item list
    fn persist(state: &CartState, env: &CartEnvironment) -> SmallVec<[Effect<CartAction>; 4]> {
        let payload = match state.items_json() {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!(%error, "Failed to serialize cart");
                return SmallVec::new();
            },
        };

        let revision = state.revision();
        let persister = Arc::clone(&env.persister);
        smallvec![Effect::future(async move {
            persister.save(revision, payload).await;
            None
        })]
    }
}

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;
    type Environment = CartEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CartAction::Add { product } => {
                tracing::debug!(id = %product.id, "Adding product to cart");
                let id = product.id.clone();
                if !state.add(product) {
                    tracing::warn!(%id, "Add refused: price is not a finite number");
                    return SmallVec::new();
                }
                Self::persist(state, env)
            },

            CartAction::Remove { id } => {
                if !state.remove(&id) {
                    tracing::trace!(%id, "Remove ignored: product not in cart");
                    return SmallVec::new();
                }
                Self::persist(state, env)
            },

            CartAction::SetQuantity { id, quantity } => {
                if !state.set_quantity(&id, quantity) {
                    tracing::trace!(%id, quantity, "Quantity change ignored: product not in cart");
                    return SmallVec::new();
                }
                Self::persist(state, env)
            },

            CartAction::Clear => {
                state.clear();
                Self::persist(state, env)
            },

            CartAction::Load { items } => {
                state.replace(items);
                tracing::debug!(
                    items = state.items().len(),
                    item_count = state.item_count(),
                    "Cart loaded"
                );
                Self::persist(state, env)
            },
        }
    }
}
