//! Wishlist state container.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use bazaar_core::ProductId;

use crate::storage::{KeyValueStore, namespaces};

/// Saved product ids with set semantics.
///
/// Ids are kept unique and in insertion order, though order carries no
/// meaning. Cheap to clone; clones share the same underlying state.
#[derive(Clone)]
pub struct WishlistStore {
    inner: Arc<WishlistInner>,
}

struct WishlistInner {
    items: Mutex<Vec<ProductId>>,
    storage: Arc<dyn KeyValueStore>,
}

impl WishlistStore {
    /// Restore the wishlist from persisted state, or start empty.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let items = restore_items(storage.as_ref());
        Self {
            inner: Arc::new(WishlistInner {
                items: Mutex::new(items),
                storage,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ProductId>> {
        self.inner.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, items: &[ProductId]) {
        let serialized = match serde_json::to_string(items) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "Failed to serialize wishlist state");
                return;
            }
        };
        if let Err(e) = self.inner.storage.set(namespaces::WISHLIST, &serialized) {
            warn!(error = %e, "Failed to persist wishlist state");
        }
    }

    /// Add a product id. Idempotent: adding twice is the same as adding once.
    pub fn add_item(&self, product_id: ProductId) {
        let mut items = self.lock();
        if !items.contains(&product_id) {
            items.push(product_id);
        }
        self.persist(&items);
    }

    /// Remove a product id. No-op if absent.
    pub fn remove_item(&self, product_id: ProductId) {
        let mut items = self.lock();
        items.retain(|id| *id != product_id);
        self.persist(&items);
    }

    /// Add the id if absent, remove it if present (the heart button).
    pub fn toggle(&self, product_id: ProductId) {
        let mut items = self.lock();
        if items.contains(&product_id) {
            items.retain(|id| *id != product_id);
        } else {
            items.push(product_id);
        }
        self.persist(&items);
    }

    /// Pure membership check; no side effects.
    #[must_use]
    pub fn has_item(&self, product_id: ProductId) -> bool {
        self.lock().contains(&product_id)
    }

    /// Snapshot of the saved ids.
    #[must_use]
    pub fn items(&self) -> Vec<ProductId> {
        self.lock().clone()
    }
}

/// Read ids back from storage; anything unexpected restores as empty.
fn restore_items(storage: &dyn KeyValueStore) -> Vec<ProductId> {
    let serialized = match storage.get(namespaces::WISHLIST) {
        Ok(Some(s)) => s,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read persisted wishlist state, starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<ProductId>>(&serialized) {
        Ok(ids) => {
            // Older clients persisted duplicates; membership must still hold.
            let mut seen = Vec::with_capacity(ids.len());
            for id in ids {
                if !seen.contains(&id) {
                    seen.push(id);
                }
            }
            seen
        }
        Err(e) => {
            warn!(error = %e, "Malformed persisted wishlist state, starting empty");
            Vec::new()
        }
    }
}
