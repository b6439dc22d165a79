//! Cart state container.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use bazaar_core::{CartItem, Product, ProductId};

use crate::storage::{KeyValueStore, namespaces};

/// The shopping cart: an ordered list of line items, one per product id.
///
/// Invariants:
/// - at most one line item per product id; adding an already-present product
///   increments its quantity instead of duplicating the line
/// - quantities are always at least 1
/// - insertion order is preserved
///
/// The total is derived from the items on every read, never stored.
/// Cheap to clone; clones share the same underlying state.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartInner>,
}

struct CartInner {
    items: Mutex<Vec<CartItem>>,
    storage: Arc<dyn KeyValueStore>,
}

impl CartStore {
    /// Restore the cart from persisted state, or start empty.
    ///
    /// Malformed or unreadable persisted state is treated as an empty cart,
    /// never an error.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let items = restore_items(storage.as_ref());
        Self {
            inner: Arc::new(CartInner {
                items: Mutex::new(items),
                storage,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CartItem>> {
        self.inner.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Persist the current items. Failures are logged, not surfaced; the
    /// in-memory state stays authoritative for the session.
    fn persist(&self, items: &[CartItem]) {
        let serialized = match serde_json::to_string(items) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart state");
                return;
            }
        };
        if let Err(e) = self.inner.storage.set(namespaces::CART, &serialized) {
            warn!(error = %e, "Failed to persist cart state");
        }
    }

    /// Add one unit of `product` to the cart.
    ///
    /// Increments the quantity if a line for this product already exists,
    /// otherwise appends a new line with quantity 1. Always succeeds.
    pub fn add_item(&self, product: &Product) {
        let mut items = self.lock();
        if let Some(item) = items.iter_mut().find(|i| i.product_id() == product.id) {
            item.quantity += 1;
        } else {
            items.push(CartItem::new(product.clone()));
        }
        self.persist(&items);
    }

    /// Remove the line item for `product_id`. No-op if absent.
    pub fn remove_item(&self, product_id: ProductId) {
        let mut items = self.lock();
        items.retain(|i| i.product_id() != product_id);
        self.persist(&items);
    }

    /// Set the quantity for `product_id`.
    ///
    /// A quantity of 0 removes the line. A missing id is a no-op.
    pub fn update_quantity(&self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
            return;
        }
        let mut items = self.lock();
        if let Some(item) = items.iter_mut().find(|i| i.product_id() == product_id) {
            item.quantity = quantity;
        }
        self.persist(&items);
    }

    /// Empty the cart.
    pub fn clear(&self) {
        let mut items = self.lock();
        items.clear();
        self.persist(&items);
    }

    /// Snapshot of the current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.lock().clone()
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Total number of units across all lines (the navbar badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lock().iter().map(|i| i.quantity).sum()
    }

    /// Sum of price times quantity over all lines, rounded to 2 decimal
    /// places. Recomputed on every read.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lock()
            .iter()
            .map(CartItem::line_total)
            .sum::<Decimal>()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Read items back from storage; anything unexpected restores as empty.
fn restore_items(storage: &dyn KeyValueStore) -> Vec<CartItem> {
    let serialized = match storage.get(namespaces::CART) {
        Ok(Some(s)) => s,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read persisted cart state, starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str(&serialized) {
        Ok(items) => items,
        Err(e) => {
            warn!(error = %e, "Malformed persisted cart state, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use bazaar_core::{Category, CategoryId};

    fn product(id: i64, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price,
            description: String::new(),
            category: Category {
                id: CategoryId::new(1),
                name: "Test".to_string(),
                image: String::new(),
            },
            images: vec![],
        }
    }

    fn empty_cart() -> CartStore {
        CartStore::load(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_add_aggregates_by_product_id() {
        let cart = empty_cart();
        let shirt = product(5, Decimal::new(10_00, 2));

        cart.add_item(&shirt);
        cart.add_item(&shirt);

        let items = cart.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn test_example_scenario_total() {
        // addItem(5, $10) x2 then addItem(7, $3) => [(5, qty 2), (7, qty 1)], $23.00
        let cart = empty_cart();
        let shirt = product(5, Decimal::new(10_00, 2));
        let socks = product(7, Decimal::new(3_00, 2));

        cart.add_item(&shirt);
        cart.add_item(&shirt);
        cart.add_item(&socks);

        let items = cart.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_id(), ProductId::new(5));
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[1].product_id(), ProductId::new(7));
        assert_eq!(items[1].quantity, 1);
        assert_eq!(cart.total(), Decimal::new(23_00, 2));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_quantity_counts_adds() {
        let cart = empty_cart();
        let ids = [1_i64, 2, 1, 3, 1, 2];
        for id in ids {
            cart.add_item(&product(id, Decimal::ONE));
        }

        let items = cart.items();
        assert_eq!(items.len(), 3);
        let quantity_of = |id: i64| {
            items
                .iter()
                .find(|i| i.product_id() == ProductId::new(id))
                .unwrap()
                .quantity
        };
        assert_eq!(quantity_of(1), 3);
        assert_eq!(quantity_of(2), 2);
        assert_eq!(quantity_of(3), 1);
    }

    #[test]
    fn test_total_matches_recomputation() {
        let cart = empty_cart();
        cart.add_item(&product(1, Decimal::new(19_99, 2)));
        cart.add_item(&product(2, Decimal::new(5_25, 2)));
        cart.update_quantity(ProductId::new(1), 3);
        cart.remove_item(ProductId::new(2));
        cart.add_item(&product(3, Decimal::new(0_01, 2)));

        let expected: Decimal = cart
            .items()
            .iter()
            .map(CartItem::line_total)
            .sum::<Decimal>()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        assert_eq!(cart.total(), expected);
        // Stable across repeated reads.
        assert_eq!(cart.total(), cart.total());
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let cart = empty_cart();
        cart.add_item(&product(5, Decimal::TEN));
        cart.update_quantity(ProductId::new(5), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_missing_id_is_noop() {
        let cart = empty_cart();
        cart.add_item(&product(5, Decimal::TEN));
        cart.update_quantity(ProductId::new(99), 4);

        let items = cart.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 1);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let cart = empty_cart();
        cart.add_item(&product(5, Decimal::TEN));
        cart.remove_item(ProductId::new(99));
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_clear() {
        let cart = empty_cart();
        cart.add_item(&product(5, Decimal::TEN));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_persists_and_restores() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        let cart = CartStore::load(Arc::clone(&storage));
        cart.add_item(&product(5, Decimal::new(10_00, 2)));
        cart.add_item(&product(5, Decimal::new(10_00, 2)));

        // A fresh container over the same storage sees the same state.
        let restored = CartStore::load(storage);
        let items = restored.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(restored.total(), Decimal::new(20_00, 2));
    }

    #[test]
    fn test_malformed_persisted_state_restores_empty() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        storage.set(namespaces::CART, "not json at all").unwrap();

        let cart = CartStore::load(storage);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_rounds_half_up() {
        let cart = empty_cart();
        // 3 x 1.115 = 3.345, rounds to 3.35 away from zero.
        let odd = product(1, Decimal::new(1_115, 3));
        cart.add_item(&odd);
        cart.update_quantity(ProductId::new(1), 3);
        assert_eq!(cart.total(), Decimal::new(3_35, 2));
    }
}
