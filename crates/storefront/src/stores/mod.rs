//! Persisted state containers for the storefront session.
//!
//! Each container pairs in-memory state with an injected [`KeyValueStore`]
//! namespace: mutations apply in memory as whole-state replacements, then the
//! new state is saved. A persistence failure is logged and never corrupts or
//! rolls back the in-memory state, and malformed persisted state restores as
//! the container's default.
//!
//! [`KeyValueStore`]: crate::storage::KeyValueStore

mod auth;
mod cart;
mod wishlist;

pub use auth::AuthStore;
pub use cart::CartStore;
pub use wishlist::WishlistStore;
