use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::{
        MessageResponse,
        notifications::{NotifyRequest, NotifyResponse, RegisterTokenRequest},
    },
    db::handlers::{DeviceTokens, GuardianLinks, Users},
    errors::Error,
    push::PushMessage,
};

/// Register the latest device token for a user
#[utoipa::path(
    post,
    path = "/api/fcm/register-token",
    request_body = RegisterTokenRequest,
    tag = "notifications",
    responses(
        (status = 200, description = "Token registered", body = MessageResponse),
        (status = 400, description = "Missing field or unknown user"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn register_token(
    State(state): State<AppState>,
    Json(request): Json<RegisterTokenRequest>,
) -> Result<Json<MessageResponse>, Error> {
    let (Some(user_id), Some(token)) = (request.user_id, request.fcm_token) else {
        return Err(Error::BadRequest {
            message: "user_id and fcm_token are required".to_string(),
        });
    };

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    // Latest token on the user row, full history in device_tokens
    Users::new(&mut tx).set_fcm_token(user_id, &token).await?;
    DeviceTokens::new(&mut tx).record(user_id, &token).await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(MessageResponse::new("Token registered")))
}

/// Notify every guardian of a tracked user
#[utoipa::path(
    post,
    path = "/api/fcm/notify",
    request_body = NotifyRequest,
    tag = "notifications",
    responses(
        (status = 200, description = "Per-token delivery counts", body = NotifyResponse),
        (status = 400, description = "Missing user_id"),
        (status = 404, description = "No guardian has a usable device token"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn notify(State(state): State<AppState>, Json(request): Json<NotifyRequest>) -> Result<Json<NotifyResponse>, Error> {
    let Some(user_id) = request.user_id else {
        return Err(Error::BadRequest {
            message: "user_id is required".to_string(),
        });
    };

    // Release the connection before going to the network: the pool must not
    // be held across the fan-out.
    let tokens = {
        let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
        GuardianLinks::new(&mut conn).guardian_tokens_of(user_id).await?
    };

    if tokens.is_empty() {
        return Err(Error::NotFound {
            resource: "device tokens".to_string(),
            id: user_id.to_string(),
        });
    }

    let message = PushMessage {
        title: request.title.unwrap_or_else(|| state.config.push.default_title.clone()),
        body: request.body.unwrap_or_default(),
        data: request.data,
    };

    let counts = state.push.send_to_tokens(&tokens, &message).await;

    Ok(Json(NotifyResponse {
        success: counts.success,
        failure: counts.failure,
    }))
}
