//! Database models for users.

use crate::api::models::users::Role;
use crate::types::UserId;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A user row. `password_hash` never leaves the crate; API responses are
/// built from the other fields.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: UserId,
    pub login_id: String,
    pub password_hash: String,
    pub role: Role,
    pub fcm_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for creating a new user
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub login_id: String,
    pub password_hash: String,
    pub role: Role,
}
