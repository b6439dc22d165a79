//! REST client for the remote catalog/auth API.
//!
//! Consumes a fixed third-party contract:
//!
//! - `GET /products?offset&limit` - paginated products
//! - `GET /products/{id}` - single product
//! - `GET /categories` - all categories
//! - `POST /auth/login` - credentials in, bearer token out
//! - `POST /users` - registration
//! - `GET /auth/profile` - profile for a bearer token
//!
//! Catalog reads are cached with `moka` (5-minute TTL); auth calls never are.

mod cache;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, instrument};

use bazaar_core::{Category, Product, ProductId, User};

use crate::config::StorefrontConfig;
use cache::CacheValue;

/// Avatar assigned to registrations that do not supply one.
pub const DEFAULT_AVATAR_URL: &str = "https://api.lorem.space/image/face?w=640&h=480";

const CACHE_CAPACITY: u64 = 1000;
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Errors that can occur when talking to the remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credentials or token rejected by the API.
    #[error("Unauthorized")]
    Unauthorized,

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Any other non-success response.
    #[error("API returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        message: String,
    },
}

/// Response body of `POST /auth/login`.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    avatar: &'a str,
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the remote catalog/auth REST API.
///
/// Provides typed access to products, categories, and authentication.
/// Products and categories are cached for 5 minutes.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl ApiClient {
    /// Create a new API client from configuration.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url: config.api_base_url.as_str().trim_end_matches('/').to_string(),
                cache,
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Issue a GET request and decode the JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&SecretString>,
    ) -> Result<T, ApiError> {
        let mut request = self.inner.client.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token.expose_secret());
        }
        let response = request.send().await?;
        decode_response(response).await
    }

    /// Issue a POST request with a JSON body and decode the JSON response.
    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await?;
        decode_response(response).await
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// Get a page of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self, offset: u32, limit: u32) -> Result<Vec<Product>, ApiError> {
        let cache_key = format!("products:{offset}:{limit}");

        // Check cache
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products: Vec<Product> = self
            .get_json(&format!("/products?offset={offset}&limit={limit}"), None)
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a single product by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the product does not exist, or
    /// another error if the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        let cache_key = format!("product:{id}");

        // Check cache
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = match self.get_json(&format!("/products/{id}"), None).await {
            Ok(product) => product,
            Err(ApiError::NotFound(_)) => {
                return Err(ApiError::NotFound(format!("Product not found: {id}")));
            }
            Err(e) => return Err(e),
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        let cache_key = "categories".to_string();

        // Check cache
        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.get_json("/categories", None).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    // =========================================================================
    // Auth Methods (never cached)
    // =========================================================================

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for rejected credentials, or
    /// another error if the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<SecretString, ApiError> {
        let response: LoginResponse = self
            .post_json("/auth/login", &LoginRequest { email, password })
            .await?;
        Ok(SecretString::from(response.access_token))
    }

    /// Register a new user.
    ///
    /// The API requires an avatar URL; [`DEFAULT_AVATAR_URL`] is used when
    /// the caller does not supply one.
    ///
    /// # Errors
    ///
    /// Returns an error if registration is rejected or the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        avatar: Option<&str>,
    ) -> Result<User, ApiError> {
        self.post_json(
            "/users",
            &RegisterRequest {
                name,
                email,
                password,
                avatar: avatar.unwrap_or(DEFAULT_AVATAR_URL),
            },
        )
        .await
    }

    /// Fetch the profile belonging to a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for a missing/expired/rejected
    /// token, or another error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn profile(&self, token: &SecretString) -> Result<User, ApiError> {
        self.get_json("/auth/profile", Some(token)).await
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate all cached catalog data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

/// Map a response to a typed value or an [`ApiError`].
///
/// The body is read as text first so parse failures can be logged with a
/// snippet of what the API actually returned.
async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1);
        return Err(ApiError::RateLimited(retry_after));
    }

    let response_text = response.text().await?;

    if !status.is_success() {
        return Err(match status {
            reqwest::StatusCode::NOT_FOUND => ApiError::NotFound(truncate(&response_text)),
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                ApiError::Unauthorized
            }
            _ => {
                tracing::error!(
                    status = %status,
                    body = %truncate(&response_text),
                    "API returned non-success status"
                );
                ApiError::Status {
                    status: status.as_u16(),
                    message: truncate(&response_text),
                }
            }
        });
    }

    match serde_json::from_str(&response_text) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::error!(
                error = %e,
                body = %truncate(&response_text),
                "Failed to parse API response"
            );
            Err(ApiError::Parse(e))
        }
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}
