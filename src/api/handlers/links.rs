use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::{MessageResponse, links::LinkUserRequest},
    db::handlers::GuardianLinks,
    errors::Error,
};

/// Link a guardian to a tracked user
#[utoipa::path(
    post,
    path = "/api/link-user",
    request_body = LinkUserRequest,
    tag = "links",
    responses(
        (status = 200, description = "Link present (created or already existing)", body = MessageResponse),
        (status = 400, description = "Missing field or unknown user"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn link_user(State(state): State<AppState>, Json(request): Json<LinkUserRequest>) -> Result<Json<MessageResponse>, Error> {
    let (Some(tracked_user_id), Some(guardian_user_id)) = (request.tracked_user_id, request.guardian_user_id) else {
        return Err(Error::BadRequest {
            message: "tracked_user_id and guardian_user_id are required".to_string(),
        });
    };

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut links = GuardianLinks::new(&mut conn);

    // Idempotent: re-linking an existing pair is a success, not a conflict
    links.link(tracked_user_id, guardian_user_id).await?;

    Ok(Json(MessageResponse::new("Link created")))
}
