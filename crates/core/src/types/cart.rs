//! Cart line item type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::catalog::Product;
use crate::types::id::ProductId;

/// One product-quantity pairing within the cart.
///
/// Serializes as the product's fields plus `quantity`, matching the persisted
/// cart shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product this line refers to.
    #[serde(flatten)]
    pub product: Product,
    /// Number of this product in the cart. Always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// Create a line item with an initial quantity of 1.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// The product identifier this line is keyed by.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Price times quantity for this line, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}
