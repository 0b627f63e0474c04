//! Database repository for users.

use crate::db::errors::Result;
use crate::db::models::users::{User, UserCreateDBRequest};
use crate::types::{UserId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

pub struct Users<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Users<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(login_id = %request.login_id), err)]
    pub async fn create(&mut self, request: &UserCreateDBRequest) -> Result<User> {
        // Always generate a new ID for users
        let user_id = Uuid::new_v4();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, login_id, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&request.login_id)
        .bind(&request.password_hash)
        .bind(&request.role)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&id)), err)]
    pub async fn get_by_id(&mut self, id: UserId) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(user)
    }

    #[instrument(skip(self, login_id), err)]
    pub async fn get_by_login_id(&mut self, login_id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE login_id = $1")
            .bind(login_id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(user)
    }

    /// Overwrite the latest device token for a user. Returns false when the
    /// user does not exist.
    #[instrument(skip(self, token), fields(user_id = %abbrev_uuid(&id)), err)]
    pub async fn set_fcm_token(&mut self, id: UserId, token: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET fcm_token = $1, updated_at = NOW() WHERE id = $2")
            .bind(token)
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::users::Role;
    use crate::db::errors::DbError;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_user(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        let request = UserCreateDBRequest {
            login_id: "alice".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role: Role::TrackedUser,
        };

        let user = repo.create(&request).await.unwrap();
        assert_eq!(user.login_id, "alice");
        assert_eq!(user.role, Role::TrackedUser);
        assert!(user.fcm_token.is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_duplicate_login_id_is_unique_violation(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        let request = UserCreateDBRequest {
            login_id: "alice".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role: Role::TrackedUser,
        };

        repo.create(&request).await.unwrap();
        let err = repo.create(&request).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_by_login_id(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        let created = repo
            .create(&UserCreateDBRequest {
                login_id: "bob".to_string(),
                password_hash: "$argon2id$fake".to_string(),
                role: Role::Guardian,
            })
            .await
            .unwrap();

        let found = repo.get_by_login_id("bob").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.role, Role::Guardian);

        assert!(repo.get_by_login_id("nobody").await.unwrap().is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_set_fcm_token(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        let user = repo
            .create(&UserCreateDBRequest {
                login_id: "carol".to_string(),
                password_hash: "$argon2id$fake".to_string(),
                role: Role::Guardian,
            })
            .await
            .unwrap();

        assert!(repo.set_fcm_token(user.id, "token-1").await.unwrap());
        let reloaded = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.fcm_token.as_deref(), Some("token-1"));

        // Re-registration replaces the latest token
        assert!(repo.set_fcm_token(user.id, "token-2").await.unwrap());
        let reloaded = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.fcm_token.as_deref(), Some("token-2"));

        // Unknown user affects no rows
        assert!(!repo.set_fcm_token(Uuid::new_v4(), "token-3").await.unwrap());
    }
}
