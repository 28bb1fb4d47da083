//! Cart persistence
//!
//! The cart is written to a durable key-value backend after every mutation
//! and restored once when a store is opened. Both directions are best effort:
//! a backend that cannot be read yields an empty cart and a backend that
//! cannot be written only loses durability, never the in-memory cart.

use mockall::automock;
use thiserror::Error;

use crate::cart::Cart;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Slot the cart is stored under unless configured otherwise.
pub const DEFAULT_CART_SLOT: &str = "cart";

/// Errors raised by key-value backends.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backend could not be read or written.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used with this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The cart could not be encoded or decoded.
    #[error("cart encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The backend refused the request.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable key-value storage.
#[automock]
pub trait KeyValueStore {
    /// Reads the value stored under `key`, or `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] when the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// Loads and saves a whole cart.
///
/// Implementations must not fail: problems are logged and the caller carries
/// on with whatever is in memory.
pub trait CartPersistence {
    /// Restores the saved cart, or an empty cart when there is none.
    fn load(&self) -> Cart;

    /// Saves the cart, replacing the previously saved state.
    fn save(&mut self, cart: &Cart);
}

/// Stores the cart as a JSON list under a single named slot.
#[derive(Debug)]
pub struct SlotPersistence<S> {
    storage: S,
    slot: String,
}

impl<S: KeyValueStore> SlotPersistence<S> {
    /// Persist under [`DEFAULT_CART_SLOT`].
    pub fn new(storage: S) -> Self {
        Self::with_slot(storage, DEFAULT_CART_SLOT)
    }

    /// Persist under a custom slot name.
    pub fn with_slot(storage: S, slot: impl Into<String>) -> Self {
        Self {
            storage,
            slot: slot.into(),
        }
    }

    /// Slot name the cart is stored under.
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// The underlying backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Releases the underlying backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Reads and decodes the stored cart.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the slot cannot be read or decoded.
    pub fn try_load(&self) -> Result<Option<Cart>, PersistenceError> {
        let Some(raw) = self.storage.get(&self.slot)? else {
            return Ok(None);
        };

        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Encodes and writes the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the cart cannot be encoded or written.
    pub fn try_save(&mut self, cart: &Cart) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string(cart)?;

        self.storage.set(&self.slot, &raw)
    }
}

impl<S: KeyValueStore> CartPersistence for SlotPersistence<S> {
    fn load(&self) -> Cart {
        match self.try_load() {
            Ok(Some(cart)) => {
                tracing::debug!(slot = %self.slot, lines = cart.len(), "restored cart");
                cart
            }
            Ok(None) => Cart::new(),
            Err(error) => {
                tracing::warn!(slot = %self.slot, %error, "discarding unreadable saved cart");
                Cart::new()
            }
        }
    }

    fn save(&mut self, cart: &Cart) {
        if let Err(error) = self.try_save(cart) {
            tracing::warn!(slot = %self.slot, %error, "failed to persist cart; keeping it in memory");
        }
    }
}
