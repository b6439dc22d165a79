//! Unified error handling.
//!
//! Provides a single `AppError` that host applications can match on at the
//! view layer. Container operations that the design defines as infallible
//! (cart/wishlist mutations, logout, `load_user`) never return it.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::storage::StoreError;

/// Application-level error type for the storefront SDK.
#[derive(Debug, Error)]
pub enum AppError {
    /// Remote API operation failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Persistent storage operation failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Whether this error should be rendered as "absent" rather than as a
    /// failure (e.g., a product page for an unknown id).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Api(ApiError::NotFound(_)))
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");
    }

    #[test]
    fn test_not_found_detection() {
        assert!(AppError::NotFound("x".to_string()).is_not_found());
        assert!(AppError::from(ApiError::NotFound("x".to_string())).is_not_found());
        assert!(!AppError::from(ApiError::Unauthorized).is_not_found());
    }
}
