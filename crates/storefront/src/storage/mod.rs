//! Persistent key-value storage for container state.
//!
//! Each state container owns a disjoint namespace and writes whole serialized
//! values, so no locking is needed across containers. Two adapters are
//! provided: [`FileStore`] (one JSON file per namespace under a directory)
//! and [`MemoryStore`] (tests and ephemeral sessions).

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Namespace keys for persisted container state.
///
/// The string values match the original web storage keys so persisted state
/// remains portable across clients.
pub mod namespaces {
    /// Cart line items.
    pub const CART: &str = "cart-storage";
    /// Wishlist product ids.
    pub const WISHLIST: &str = "wishlist-storage";
    /// Bearer token for the auth session.
    pub const AUTH_TOKEN: &str = "token";
}

/// Errors that can occur when reading or writing persisted state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable client-side storage keyed by string namespace.
///
/// Writes are whole-value overwrites; readers never observe partial values.
pub trait KeyValueStore: Send + Sync {
    /// Read the serialized state stored under `namespace`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read. A missing
    /// namespace is `Ok(None)`, not an error.
    fn get(&self, namespace: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `namespace`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn set(&self, namespace: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the value stored under `namespace`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written. Removing
    /// an absent namespace is a no-op.
    fn remove(&self, namespace: &str) -> Result<(), StoreError>;
}
