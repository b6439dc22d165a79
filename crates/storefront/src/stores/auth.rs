//! Auth session state container.
//!
//! Owns the current user and authenticated flag, both derived from a bearer
//! token persisted under its own namespace. The committed session state only
//! ever moves through whole-state replacements:
//!
//! - `login`/`register` succeed fully (token stored, profile loaded) or reset
//!   to unauthenticated and re-signal the error
//! - `logout` always resets, without a remote call
//! - `load_user` silently resolves to unauthenticated on any failure
//!
//! A logout bumps the session epoch; async flows capture the epoch before
//! their first await and only commit if it is unchanged, so an in-flight
//! login or profile fetch completing after a logout can never resurrect an
//! authenticated session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use bazaar_core::User;

use crate::api::{ApiClient, ApiError};
use crate::storage::{KeyValueStore, namespaces};

/// The auth session: current user plus authenticated flag.
///
/// Cheap to clone; clones share the same underlying state.
#[derive(Clone)]
pub struct AuthStore {
    inner: Arc<AuthInner>,
}

struct AuthInner {
    client: ApiClient,
    storage: Arc<dyn KeyValueStore>,
    state: Mutex<SessionState>,
}

#[derive(Default)]
struct SessionState {
    user: Option<User>,
    authenticated: bool,
    /// Bumped on every logout; stale async completions check it and discard
    /// their result instead of committing.
    epoch: u64,
}

impl AuthStore {
    /// Create an unauthenticated session container.
    ///
    /// Call [`AuthStore::load_user`] afterwards to restore a persisted
    /// session from a stored token.
    #[must_use]
    pub fn new(client: ApiClient, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: Arc::new(AuthInner {
                client,
                storage,
                state: Mutex::new(SessionState::default()),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The current user, if authenticated.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.lock().user.clone()
    }

    /// Whether a valid session is established.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().authenticated
    }

    /// Authenticate with credentials.
    ///
    /// On success the bearer token is persisted and the session becomes
    /// authenticated. On any failure the stored token is discarded, the
    /// session resets to unauthenticated, and the error is re-signaled.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ApiError`], or [`ApiError::Unauthorized`] if
    /// a logout happened while the request was in flight.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let epoch = self.lock().epoch;

        match self.authenticate(email, password).await {
            Ok(user) => {
                if self.commit(epoch, user.clone()) {
                    info!(user_id = %user.id, "Login succeeded");
                    Ok(user)
                } else {
                    // Logged out while the request was in flight.
                    debug!("Discarding login result from a superseded session");
                    self.discard_token();
                    Err(ApiError::Unauthorized)
                }
            }
            Err(e) => {
                self.discard_token();
                self.reset_if_current(epoch);
                Err(e)
            }
        }
    }

    /// Register a new account, then log in with the same credentials.
    ///
    /// Failure semantics are identical to [`AuthStore::login`].
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ApiError`] from either the registration or
    /// the follow-up login.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, ApiError> {
        self.inner
            .client
            .register(name, email, password, None)
            .await?;
        self.login(email, password).await
    }

    /// Discard the stored token and reset to unauthenticated.
    ///
    /// Always succeeds and makes no remote call. Any in-flight login or
    /// profile fetch becomes stale and will not be applied when it completes.
    pub fn logout(&self) {
        {
            let mut state = self.lock();
            state.epoch += 1;
            state.user = None;
            state.authenticated = false;
        }
        self.discard_token();
        info!("Logged out");
    }

    /// Restore the session from a persisted token at startup.
    ///
    /// Missing token: stays unauthenticated, not an error. Present but
    /// rejected token: the token is discarded and the session resolves to
    /// unauthenticated. This path never surfaces an error to the caller.
    pub async fn load_user(&self) {
        let epoch = self.lock().epoch;

        let Some(token) = self.stored_token() else {
            self.reset_if_current(epoch);
            return;
        };

        match self.inner.client.profile(&token).await {
            Ok(user) => {
                if self.commit(epoch, user) {
                    debug!("Session restored from stored token");
                } else {
                    self.discard_token();
                }
            }
            Err(e) => {
                debug!(error = %e, "Stored token rejected, resolving to unauthenticated");
                self.discard_token();
                self.reset_if_current(epoch);
            }
        }
    }

    /// Run the token-then-profile exchange, persisting the token in between.
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let token = self.inner.client.login(email, password).await?;
        self.store_token(&token);
        self.inner.client.profile(&token).await
    }

    /// Apply an authenticated user if the session epoch is still `epoch`.
    fn commit(&self, epoch: u64, user: User) -> bool {
        let mut state = self.lock();
        if state.epoch != epoch {
            return false;
        }
        state.user = Some(user);
        state.authenticated = true;
        true
    }

    /// Reset to unauthenticated unless a newer flow already took over.
    fn reset_if_current(&self, epoch: u64) {
        let mut state = self.lock();
        if state.epoch == epoch {
            state.user = None;
            state.authenticated = false;
        }
    }

    fn store_token(&self, token: &SecretString) {
        if let Err(e) = self
            .inner
            .storage
            .set(namespaces::AUTH_TOKEN, token.expose_secret())
        {
            // The in-memory session still works; only restore-on-startup is lost.
            warn!(error = %e, "Failed to persist auth token");
        }
    }

    fn discard_token(&self) {
        if let Err(e) = self.inner.storage.remove(namespaces::AUTH_TOKEN) {
            warn!(error = %e, "Failed to discard auth token");
        }
    }

    fn stored_token(&self) -> Option<SecretString> {
        match self.inner.storage.get(namespaces::AUTH_TOKEN) {
            Ok(token) => token.map(SecretString::from),
            Err(e) => {
                warn!(error = %e, "Failed to read stored auth token");
                None
            }
        }
    }
}
