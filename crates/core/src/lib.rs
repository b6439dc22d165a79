//! Bazaar Core - Shared types library.
//!
//! This crate provides the domain types used across all Bazaar components:
//! - `storefront` - The headless storefront SDK (catalog, cart, auth)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs and the catalog/cart/user domain model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
