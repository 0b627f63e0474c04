use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    api::models::{
        MessageResponse,
        auth::{LoginRequest, LoginResponse, RegisterRequest},
    },
    auth::password,
    db::{handlers::Users, models::users::UserCreateDBRequest},
    errors::Error,
};

/// Register a new user account
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    tag = "auth",
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Missing or invalid input"),
        (status = 409, description = "Login ID already taken"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), Error> {
    if !state.config.auth.allow_registration {
        return Err(Error::BadRequest {
            message: "User registration is disabled".to_string(),
        });
    }

    let (Some(login_id), Some(password), Some(role)) = (request.login_id, request.password, request.role) else {
        return Err(Error::BadRequest {
            message: "login_id, password and role are required".to_string(),
        });
    };

    // Validate password length
    let password_config = &state.config.auth.password;
    if password.len() < password_config.min_length {
        return Err(Error::BadRequest {
            message: format!("Password must be at least {} characters", password_config.min_length),
        });
    }
    if password.len() > password_config.max_length {
        return Err(Error::BadRequest {
            message: format!("Password must be no more than {} characters", password_config.max_length),
        });
    }

    // Hash the password on a blocking thread to avoid blocking async runtime
    let params = password_config.argon2_params();
    let password_hash = tokio::task::spawn_blocking(move || password::hash_string_with_params(&password, Some(params)))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password hashing task: {e}"),
        })??;

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut users = Users::new(&mut tx);

    // Duplicate check; the unique constraint backstops concurrent requests
    if users.get_by_login_id(&login_id).await?.is_some() {
        return Err(Error::Conflict {
            message: "This login ID is already taken".to_string(),
        });
    }

    users
        .create(&UserCreateDBRequest {
            login_id,
            password_hash,
            role,
        })
        .await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new("Registration successful"))))
}

/// Login with login ID and password
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    tag = "auth",
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing input"),
        (status = 401, description = "Invalid credentials"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>, Error> {
    let (Some(login_id), Some(password)) = (request.login_id, request.password) else {
        return Err(Error::BadRequest {
            message: "login_id and password are required".to_string(),
        });
    };

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut users = Users::new(&mut conn);

    // Same message for unknown ID and wrong password
    let user = users.get_by_login_id(&login_id).await?.ok_or_else(|| Error::Unauthenticated {
        message: Some("Invalid login ID or password".to_string()),
    })?;

    // Verify password on a blocking thread to avoid blocking async runtime
    let hash = user.password_hash.clone();
    let is_valid = tokio::task::spawn_blocking(move || password::verify_string(&password, &hash))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password verification task: {e}"),
        })??;

    if !is_valid {
        return Err(Error::Unauthenticated {
            message: Some("Invalid login ID or password".to_string()),
        });
    }

    Ok(Json(LoginResponse {
        user_id: user.id,
        role: user.role,
    }))
}
