//! Database models for device token registrations.

use crate::types::UserId;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One registration of a device token. The table is append-only history;
/// `users.fcm_token` always mirrors the latest row per user.
#[derive(Debug, Clone, FromRow)]
pub struct DeviceToken {
    pub id: i64,
    pub user_id: UserId,
    pub fcm_token: String,
    pub created_at: DateTime<Utc>,
}
