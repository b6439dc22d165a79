//! Catalog domain types sourced from the remote storefront API.
//!
//! These types mirror the JSON shapes returned by the API. Fields the client
//! does not use (creation timestamps and the like) are ignored during
//! deserialization.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::{CategoryId, ProductId};

/// A product grouping (e.g., "Clothes", "Electronics").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL of the category's image.
    pub image: String,
}

/// A product as served by the remote catalog.
///
/// Immutable from the client's perspective; the storefront never mutates
/// products, only references them from carts and wishlists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Name or title of the product.
    pub title: String,
    /// Unit price in the store currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Detailed description.
    pub description: String,
    /// Category the product belongs to.
    pub category: Category,
    /// Ordered image URLs. At least one is expected for display, but the
    /// model tolerates an empty list.
    #[serde(default)]
    pub images: Vec<String>,
}
