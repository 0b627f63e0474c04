//! Shared fixtures for unit and endpoint tests.

use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::api::models::users::Role;
use crate::config::Config;
use crate::db::handlers::{GuardianLinks, Users};
use crate::db::models::users::{User, UserCreateDBRequest};
use crate::imaging::DescriptionService;
use crate::push::PushService;
use crate::types::UserId;
use crate::AppState;

/// Install the process-global rustls crypto provider exactly once so tests
/// that build a reqwest client (via `rustls-no-provider`) don't panic. The
/// production binary does this in `main`; tests need the same bootstrap.
pub fn install_crypto_provider() {
    use std::sync::Once;
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    });
}

/// Config with unroutable outbound endpoints and cheap password hashing.
pub fn create_test_config() -> Config {
    install_crypto_provider();
    let mut config = Config::default();
    config.host = "127.0.0.1".to_string();
    config.port = 0;
    config.push.endpoint = "http://127.0.0.1:1".parse().unwrap();
    config.push.project_id = "test-project".to_string();
    config.push.auth_token = Some("test-bearer".to_string());
    config.vision.endpoint = "http://127.0.0.1:1".parse().unwrap();
    config.translation.endpoint = "http://127.0.0.1:1".parse().unwrap();
    // Keep endpoint tests fast; production cost parameters are irrelevant here
    config.auth.password.argon2_memory_kib = 1024;
    config.auth.password.argon2_iterations = 1;
    config
}

pub fn create_test_state(pool: PgPool, config: Config) -> AppState {
    install_crypto_provider();
    AppState::builder()
        .db(pool)
        .config(config.clone())
        .push(Arc::new(PushService::new(&config.push)))
        .describer(Arc::new(DescriptionService::new(&config.vision, &config.translation)))
        .build()
}

/// Insert a user directly. The password hash is a placeholder; tests that
/// exercise login go through the register endpoint instead.
pub async fn create_test_user(pool: &PgPool, role: Role) -> User {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut users = Users::new(&mut conn);

    let login_id = format!("testuser_{}", Uuid::new_v4().simple());
    users
        .create(&UserCreateDBRequest {
            login_id,
            password_hash: "$argon2id$unused".to_string(),
            role,
        })
        .await
        .expect("Failed to create test user")
}

pub async fn link_users(pool: &PgPool, tracked_user_id: UserId, guardian_user_id: UserId) {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    GuardianLinks::new(&mut conn)
        .link(tracked_user_id, guardian_user_id)
        .await
        .expect("Failed to link users");
}
