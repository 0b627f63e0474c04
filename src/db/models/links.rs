//! Database models for guardian links.

use crate::types::UserId;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One row of the tracked-user/guardian many-to-many relation.
#[derive(Debug, Clone, FromRow)]
pub struct GuardianLink {
    pub tracked_user_id: UserId,
    pub guardian_user_id: UserId,
    pub created_at: DateTime<Utc>,
}
