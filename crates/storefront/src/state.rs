//! Application state shared across the UI layer.
//!
//! The composition root: wires one API client, one storage backend, and one
//! instance of each state container per session. UI code receives this via
//! dependency passing instead of reaching for ambient globals.

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::catalog::CatalogBrowser;
use crate::config::StorefrontConfig;
use crate::storage::{FileStore, KeyValueStore, MemoryStore, StoreError};
use crate::stores::{AuthStore, CartStore, WishlistStore};

/// Application state shared across all UI handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// API client and the session's state containers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    api: ApiClient,
    cart: CartStore,
    wishlist: WishlistStore,
    auth: AuthStore,
}

impl AppState {
    /// Create application state over an explicit storage backend.
    ///
    /// Cart and wishlist state is restored from storage immediately; the
    /// auth session is restored by [`AppState::restore`].
    #[must_use]
    pub fn with_storage(config: StorefrontConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let api = ApiClient::new(&config);
        let cart = CartStore::load(Arc::clone(&storage));
        let wishlist = WishlistStore::load(Arc::clone(&storage));
        let auth = AuthStore::new(api.clone(), storage);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                cart,
                wishlist,
                auth,
            }),
        }
    }

    /// Create application state using the storage the configuration names:
    /// a [`FileStore`] under `state_dir` when set, a [`MemoryStore`]
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the state directory cannot be created.
    pub fn new(config: StorefrontConfig) -> Result<Self, StoreError> {
        let storage: Arc<dyn KeyValueStore> = match &config.state_dir {
            Some(dir) => Arc::new(FileStore::new(dir.clone())?),
            None => Arc::new(MemoryStore::new()),
        };
        Ok(Self::with_storage(config, storage))
    }

    /// Restore the auth session from a persisted token, if any.
    ///
    /// Resolves silently to unauthenticated on any failure; call once at
    /// startup.
    pub async fn restore(&self) {
        self.inner.auth.load_user().await;
    }

    /// Fetch the product collection and categories and return a ready
    /// catalog browser.
    ///
    /// # Errors
    ///
    /// Returns an error if either fetch fails.
    pub async fn load_catalog(&self) -> Result<CatalogBrowser, ApiError> {
        let products = self
            .inner
            .api
            .get_products(0, self.inner.config.catalog_fetch_limit)
            .await?;
        let categories = self.inner.api.get_categories().await?;
        Ok(CatalogBrowser::new(
            products,
            categories,
            self.inner.config.page_size,
        ))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the remote API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Get a reference to the cart state container.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the wishlist state container.
    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.inner.wishlist
    }

    /// Get a reference to the auth session container.
    #[must_use]
    pub fn auth(&self) -> &AuthStore {
        &self.inner.auth
    }
}
