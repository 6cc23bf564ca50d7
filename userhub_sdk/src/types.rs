//! Typed models for the UserHub API.
//!
//! The API speaks camelCase on the wire; every model declares
//! `rename_all = "camelCase"` plus snake_case aliases so responses written
//! either way deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique numeric identifier for a user.
pub type UserId = i64;

/// A user record returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "user_id")]
    pub user_id: UserId,

    #[serde(alias = "full_name")]
    pub full_name: String,

    #[serde(alias = "email_address")]
    pub email_address: String,

    /// Whether the account is active. Deactivated users are retained but
    /// excluded from default listings.
    #[serde(alias = "is_active")]
    pub is_active: bool,

    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// Payload for creating or replacing a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub full_name: String,
    pub email_address: String,
    pub is_active: bool,
}

/// One page of a user listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPage {
    pub meta: PageMeta,
    pub data: Vec<User>,
}

/// Pagination metadata attached to every listing response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: i64,
    pub size: i64,
    #[serde(alias = "total_items")]
    pub total_items: i64,
    #[serde(alias = "total_pages")]
    pub total_pages: i64,
}
