//! Bazaar Storefront - headless e-commerce state SDK.
//!
//! This crate provides everything a storefront UI needs short of rendering:
//! a client for the remote catalog/auth REST API, persisted cart/wishlist/
//! session state containers, and an in-memory catalog filter layer.
//!
//! # Architecture
//!
//! - [`api`] - REST client for products, categories, and authentication
//! - [`storage`] - Key-value persistence (file-backed or in-memory)
//! - [`stores`] - Cart, wishlist, and auth session state containers
//! - [`catalog`] - Filtering, search, and pagination over fetched products
//! - [`state`] - The composition root wiring one of each per session
//!
//! State containers are cheap-clone handles; every mutation is applied as a
//! whole-state replacement and persisted under the container's own namespace.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod stores;
pub mod telemetry;

pub use api::ApiClient;
pub use catalog::CatalogBrowser;
pub use config::StorefrontConfig;
pub use error::{AppError, Result};
pub use state::AppState;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use stores::{AuthStore, CartStore, WishlistStore};
