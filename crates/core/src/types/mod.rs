//! Core types for Bazaar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod catalog;
pub mod id;
pub mod user;

pub use cart::CartItem;
pub use catalog::{Category, Product};
pub use id::*;
pub use user::{Role, User};
