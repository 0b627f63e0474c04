//! Database repository for device token registration history.

use crate::db::errors::Result;
use crate::db::models::tokens::DeviceToken;
use crate::types::{UserId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;

pub struct DeviceTokens<'c> {
    db: &'c mut PgConnection,
}

impl<'c> DeviceTokens<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Append one registration record. Every re-registration adds a row; the
    /// latest token per user is mirrored on `users.fcm_token`.
    #[instrument(skip(self, token), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn record(&mut self, user_id: UserId, token: &str) -> Result<DeviceToken> {
        let row = sqlx::query_as::<_, DeviceToken>(
            r#"
            INSERT INTO device_tokens (user_id, fcm_token)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(token)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::users::Role;
    use crate::test_utils::create_test_user;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_record_keeps_history(pool: PgPool) {
        let user = create_test_user(&pool, Role::Guardian).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = DeviceTokens::new(&mut conn);

        let first = repo.record(user.id, "token-1").await.unwrap();
        let second = repo.record(user.id, "token-2").await.unwrap();

        assert_eq!(first.user_id, user.id);
        assert!(second.id > first.id);

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM device_tokens WHERE user_id = $1")
            .bind(user.id)
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }
}
