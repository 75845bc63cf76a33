//! Persistent shopping cart.

mod reducer;
mod storage;
mod store;
mod types;

pub use reducer::{CartEnvironment, CartReducer};
pub use storage::{CartPersister, CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{CartRuntime, CartStore};
pub use types::{CART_STORAGE_KEY, CartAction, CartItem, CartState, parse_items, round_cents};
