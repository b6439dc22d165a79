//! User and role types for the auth session.

use serde::{Deserialize, Serialize};

use crate::types::id::UserId;

/// Role assigned to a user by the remote API.
///
/// The API currently issues `admin` and `customer`; anything else maps to
/// [`Role::Other`] so an unexpected role never fails profile deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
    #[serde(other)]
    Other,
}

/// An authenticated user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Email address used for login.
    pub email: String,
    /// Full name.
    pub name: String,
    /// Role of the user.
    pub role: Role,
    /// URL of the user's profile picture.
    pub avatar: String,
}
