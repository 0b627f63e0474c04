//! Database models for location events.

use crate::types::{EventId, UserId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One persisted coordinate sample. Rows are never mutated or deleted.
#[derive(Debug, Clone, FromRow)]
pub struct LocationEvent {
    pub id: EventId,
    pub user_id: UserId,
    pub latitude: f64,
    pub longitude: f64,
    pub motion_type: String,
    pub recorded_at: DateTime<Utc>,
}

/// Database request for appending a location event. The timestamp is
/// assigned by the server, never taken from the client.
#[derive(Debug, Clone)]
pub struct LocationEventCreateDBRequest {
    pub user_id: UserId,
    pub latitude: f64,
    pub longitude: f64,
}
