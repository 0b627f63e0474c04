//! Database repository for the append-only location event log.

use crate::db::errors::Result;
use crate::db::models::events::{LocationEvent, LocationEventCreateDBRequest};
use crate::types::{UserId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;

/// Only rows with this motion type participate in position queries; the
/// column leaves room for other sample kinds sharing the event stream.
const MOTION_LOCATION: &str = "location";

pub struct LocationEvents<'c> {
    db: &'c mut PgConnection,
}

impl<'c> LocationEvents<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Append one sample. No dedup, no rate limiting: every validated report
    /// becomes a row with a server-assigned timestamp.
    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id)), err)]
    pub async fn record(&mut self, request: &LocationEventCreateDBRequest) -> Result<LocationEvent> {
        let event = sqlx::query_as::<_, LocationEvent>(
            r#"
            INSERT INTO location_events (user_id, latitude, longitude, motion_type)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(request.user_id)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(MOTION_LOCATION)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(event)
    }

    /// The single most recent sample for a user, if any.
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn latest(&mut self, user_id: UserId) -> Result<Option<LocationEvent>> {
        let event = sqlx::query_as::<_, LocationEvent>(
            r#"
            SELECT * FROM location_events
            WHERE user_id = $1 AND motion_type = $2
            ORDER BY recorded_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(MOTION_LOCATION)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(event)
    }

    /// Up to `limit` most recent samples for a user, newest first.
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id), limit), err)]
    pub async fn history(&mut self, user_id: UserId, limit: i64) -> Result<Vec<LocationEvent>> {
        let events = sqlx::query_as::<_, LocationEvent>(
            r#"
            SELECT * FROM location_events
            WHERE user_id = $1 AND motion_type = $2
            ORDER BY recorded_at DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(MOTION_LOCATION)
        .bind(limit)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(events)
    }

    /// Most recent samples across every tracked user linked to a guardian,
    /// newest first. The limit bounds the combined result set, not the rows
    /// per tracked user, so a chatty device can crowd out the others.
    #[instrument(skip(self), fields(guardian = %abbrev_uuid(&guardian_user_id), limit), err)]
    pub async fn latest_for_guardian(&mut self, guardian_user_id: UserId, limit: i64) -> Result<Vec<LocationEvent>> {
        let events = sqlx::query_as::<_, LocationEvent>(
            r#"
            SELECT e.*
            FROM location_events e
            JOIN guardian_links gl ON gl.tracked_user_id = e.user_id
            WHERE gl.guardian_user_id = $1 AND e.motion_type = $2
            ORDER BY e.recorded_at DESC, e.id DESC
            LIMIT $3
            "#,
        )
        .bind(guardian_user_id)
        .bind(MOTION_LOCATION)
        .bind(limit)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(events)
    }
}
