//! Database repository for the tracked-user/guardian relation.

use crate::db::errors::Result;
use crate::types::{UserId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;

pub struct GuardianLinks<'c> {
    db: &'c mut PgConnection,
}

impl<'c> GuardianLinks<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Link a guardian to a tracked user. Idempotent: linking the same pair
    /// twice leaves exactly one row. Returns whether a row was inserted.
    #[instrument(
        skip(self),
        fields(tracked = %abbrev_uuid(&tracked_user_id), guardian = %abbrev_uuid(&guardian_user_id)),
        err
    )]
    pub async fn link(&mut self, tracked_user_id: UserId, guardian_user_id: UserId) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO guardian_links (tracked_user_id, guardian_user_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(tracked_user_id)
        .bind(guardian_user_id)
        .execute(&mut *self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All guardians linked to a tracked user.
    #[instrument(skip(self), fields(tracked = %abbrev_uuid(&tracked_user_id)), err)]
    pub async fn guardians_of(&mut self, tracked_user_id: UserId) -> Result<Vec<UserId>> {
        let ids = sqlx::query_scalar::<_, UserId>(
            "SELECT guardian_user_id FROM guardian_links WHERE tracked_user_id = $1 ORDER BY created_at",
        )
        .bind(tracked_user_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(ids)
    }

    /// Inverse lookup: all tracked users linked to a guardian. Used to build
    /// per-guardian dashboards.
    #[instrument(skip(self), fields(guardian = %abbrev_uuid(&guardian_user_id)), err)]
    pub async fn tracked_users_of(&mut self, guardian_user_id: UserId) -> Result<Vec<UserId>> {
        let ids = sqlx::query_scalar::<_, UserId>(
            "SELECT tracked_user_id FROM guardian_links WHERE guardian_user_id = $1 ORDER BY created_at",
        )
        .bind(guardian_user_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(ids)
    }

    /// Device tokens of every guardian linked to a tracked user, skipping
    /// guardians that never registered a token.
    #[instrument(skip(self), fields(tracked = %abbrev_uuid(&tracked_user_id)), err)]
    pub async fn guardian_tokens_of(&mut self, tracked_user_id: UserId) -> Result<Vec<String>> {
        let tokens = sqlx::query_scalar::<_, String>(
            r#"
            SELECT u.fcm_token
            FROM guardian_links gl
            JOIN users u ON u.id = gl.guardian_user_id
            WHERE gl.tracked_user_id = $1
              AND u.fcm_token IS NOT NULL
              AND u.fcm_token <> ''
            "#,
        )
        .bind(tracked_user_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::users::Role;
    use crate::db::errors::DbError;
    use crate::db::handlers::Users;
    use crate::test_utils::create_test_user;
    use sqlx::PgPool;
    use uuid::Uuid;

    #[sqlx::test]
    #[test_log::test]
    async fn test_link_is_idempotent(pool: PgPool) {
        let tracked = create_test_user(&pool, Role::TrackedUser).await;
        let guardian = create_test_user(&pool, Role::Guardian).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = GuardianLinks::new(&mut conn);

        assert!(repo.link(tracked.id, guardian.id).await.unwrap());
        // Second call is a no-op, not an error
        assert!(!repo.link(tracked.id, guardian.id).await.unwrap());

        let guardians = repo.guardians_of(tracked.id).await.unwrap();
        assert_eq!(guardians, vec![guardian.id]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_link_unknown_user_is_fk_violation(pool: PgPool) {
        let tracked = create_test_user(&pool, Role::TrackedUser).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = GuardianLinks::new(&mut conn);

        let err = repo.link(tracked.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_inverse_lookup(pool: PgPool) {
        let tracked_a = create_test_user(&pool, Role::TrackedUser).await;
        let tracked_b = create_test_user(&pool, Role::TrackedUser).await;
        let guardian = create_test_user(&pool, Role::Guardian).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = GuardianLinks::new(&mut conn);
        repo.link(tracked_a.id, guardian.id).await.unwrap();
        repo.link(tracked_b.id, guardian.id).await.unwrap();

        let tracked = repo.tracked_users_of(guardian.id).await.unwrap();
        assert_eq!(tracked.len(), 2);
        assert!(tracked.contains(&tracked_a.id));
        assert!(tracked.contains(&tracked_b.id));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_guardian_tokens_skip_missing_and_empty(pool: PgPool) {
        let tracked = create_test_user(&pool, Role::TrackedUser).await;
        let with_token = create_test_user(&pool, Role::Guardian).await;
        let without_token = create_test_user(&pool, Role::Guardian).await;
        let empty_token = create_test_user(&pool, Role::Guardian).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut users = Users::new(&mut conn);
        users.set_fcm_token(with_token.id, "guardian-token").await.unwrap();
        users.set_fcm_token(empty_token.id, "").await.unwrap();

        let mut repo = GuardianLinks::new(&mut conn);
        repo.link(tracked.id, with_token.id).await.unwrap();
        repo.link(tracked.id, without_token.id).await.unwrap();
        repo.link(tracked.id, empty_token.id).await.unwrap();

        let tokens = repo.guardian_tokens_of(tracked.id).await.unwrap();
        assert_eq!(tokens, vec!["guardian-token".to_string()]);
    }
}
