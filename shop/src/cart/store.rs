//! The cart as an explicitly owned object.
//!
//! [`CartStore`] wraps the runtime [`Store`] so callers use plain async
//! methods instead of dispatching actions. Clones share the same cart.

use super::reducer::{CartEnvironment, CartReducer};
use super::storage::{CartPersister, CartStorage};
use super::types::{CART_STORAGE_KEY, CartAction, CartState};
use crate::catalog::{Product, ProductId};
use shopfront_runtime::{Store, StoreError};
use std::sync::Arc;
use std::time::Duration;

/// Runtime store specialized for the cart
pub type CartRuntime = Store<CartState, CartAction, CartEnvironment, CartReducer>;

/// Session cart backed by durable storage
#[derive(Clone)]
pub struct CartStore {
    runtime: CartRuntime,
}

impl CartStore {
    /// Opens the cart, restoring whatever was saved under `shopping-cart`
    ///
    /// A missing or unreadable payload yields an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if the freshly built store rejects the
    /// initial load, which does not happen unless it is shutting down.
    #[tracing::instrument(skip(storage), name = "cart_open")]
    pub async fn open(storage: Arc<dyn CartStorage>) -> Result<Self, StoreError> {
        let persister = Arc::new(CartPersister::new(storage, CART_STORAGE_KEY));
        let saved = persister.restore().await;

        let runtime = Store::new(
            CartState::new(),
            CartReducer::new(),
            CartEnvironment::new(persister),
        );

        if let Some(items) = saved {
            runtime.send(CartAction::Load { items }).await?;
        }

        Ok(Self { runtime })
    }

    /// Adds one unit of `product`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`CartStore::close`]
    /// has shut the cart down.
    pub async fn add(&self, product: Product) -> Result<(), StoreError> {
        self.runtime.send(CartAction::Add { product }).await?;
        Ok(())
    }

    /// Removes the line for `id`, if present
    ///
    /// # Errors
    ///
    /// See [`CartStore::add`].
    pub async fn remove(&self, id: impl Into<ProductId>) -> Result<(), StoreError> {
        self.runtime.send(CartAction::Remove { id: id.into() }).await?;
        Ok(())
    }

    /// Sets the quantity of `id`; zero or less removes the line
    ///
    /// # Errors
    ///
    /// See [`CartStore::add`].
    pub async fn set_quantity(
        &self,
        id: impl Into<ProductId>,
        quantity: i64,
    ) -> Result<(), StoreError> {
        self.runtime
            .send(CartAction::SetQuantity {
                id: id.into(),
                quantity,
            })
            .await?;
        Ok(())
    }

    /// Empties the cart
    ///
    /// # Errors
    ///
    /// See [`CartStore::add`].
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.runtime.send(CartAction::Clear).await?;
        Ok(())
    }

    /// Copy of the current cart
    pub async fn snapshot(&self) -> CartState {
        self.runtime.state(Clone::clone).await
    }

    /// Whether `id` is in the cart
    pub async fn is_in_cart(&self, id: impl Into<ProductId>) -> bool {
        let id = id.into();
        self.runtime.state(|state| state.is_in_cart(&id)).await
    }

    /// Quantity of `id`, 0 when absent
    pub async fn quantity_of(&self, id: impl Into<ProductId>) -> u32 {
        let id = id.into();
        self.runtime.state(|state| state.quantity_of(&id)).await
    }

    /// Waits for outstanding writes; the cart stays open
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if writes are still running after
    /// `timeout`.
    pub async fn flush(&self, timeout: Duration) -> Result<(), StoreError> {
        self.runtime.settle(timeout).await
    }

    /// Stops accepting changes and waits for outstanding writes
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if writes are still running
    /// after `timeout`.
    pub async fn close(&self, timeout: Duration) -> Result<(), StoreError> {
        self.runtime.shutdown(timeout).await
    }

    /// Underlying runtime store, for subscribing or dispatching directly
    #[must_use]
    pub const fn runtime(&self) -> &CartRuntime {
        &self.runtime
    }
}
