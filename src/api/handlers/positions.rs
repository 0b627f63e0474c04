use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{
    AppState,
    api::models::{
        MessageResponse,
        positions::{
            HistoryResponse, PositionRecordRequest, PositionResponse, UsersLocationQuery, UsersLocationResponse,
        },
    },
    db::{handlers::LocationEvents, models::events::LocationEventCreateDBRequest},
    errors::Error,
    types::UserId,
};

/// Record one location sample
#[utoipa::path(
    post,
    path = "/api/position",
    request_body = PositionRecordRequest,
    tag = "positions",
    responses(
        (status = 200, description = "Position recorded", body = MessageResponse),
        (status = 400, description = "Missing user or invalid coordinate"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn record_position(
    State(state): State<AppState>,
    Json(request): Json<PositionRecordRequest>,
) -> Result<Json<MessageResponse>, Error> {
    let Some(user_id) = request.user_id else {
        return Err(Error::BadRequest {
            message: "user_id is required".to_string(),
        });
    };

    let latitude = request
        .latitude
        .as_ref()
        .and_then(|c| c.as_finite_f64())
        .ok_or_else(|| Error::BadRequest {
            message: "latitude must be a finite number".to_string(),
        })?;
    let longitude = request
        .longitude
        .as_ref()
        .and_then(|c| c.as_finite_f64())
        .ok_or_else(|| Error::BadRequest {
            message: "longitude must be a finite number".to_string(),
        })?;

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::BadRequest {
            message: "latitude must be within [-90, 90]".to_string(),
        });
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::BadRequest {
            message: "longitude must be within [-180, 180]".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut events = LocationEvents::new(&mut conn);
    events
        .record(&LocationEventCreateDBRequest {
            user_id,
            latitude,
            longitude,
        })
        .await?;

    Ok(Json(MessageResponse::new("Position recorded")))
}

/// Most recent position of a user
#[utoipa::path(
    get,
    path = "/api/position/latest/{user_id}",
    tag = "positions",
    responses(
        (status = 200, description = "Latest recorded position", body = PositionResponse),
        (status = 404, description = "No position recorded"),
    )
)]
#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn latest_position(State(state): State<AppState>, Path(user_id): Path<UserId>) -> Result<Json<PositionResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut events = LocationEvents::new(&mut conn);

    let event = events.latest(user_id).await?.ok_or_else(|| Error::NotFound {
        resource: "location".to_string(),
        id: user_id.to_string(),
    })?;

    Ok(Json(PositionResponse::from(event)))
}

/// Recent position history of a user, newest first
#[utoipa::path(
    get,
    path = "/api/position/history/{user_id}",
    tag = "positions",
    responses(
        (status = 200, description = "Up to 50 most recent positions", body = HistoryResponse),
    )
)]
#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn position_history(State(state): State<AppState>, Path(user_id): Path<UserId>) -> Result<Json<HistoryResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut events = LocationEvents::new(&mut conn);

    let locations: Vec<PositionResponse> = events
        .history(user_id, state.config.limits.history_limit)
        .await?
        .into_iter()
        .map(PositionResponse::from)
        .collect();

    Ok(Json(HistoryResponse {
        count: locations.len(),
        locations,
    }))
}

/// Latest positions across every tracked user linked to a guardian
#[utoipa::path(
    get,
    path = "/api/guardian/{guardian_id}/users-location",
    params(UsersLocationQuery),
    tag = "positions",
    responses(
        (status = 200, description = "Recent positions of linked tracked users", body = UsersLocationResponse),
    )
)]
#[tracing::instrument(skip_all, fields(guardian_id = %guardian_id))]
pub async fn users_location(
    State(state): State<AppState>,
    Path(guardian_id): Path<UserId>,
    Query(query): Query<UsersLocationQuery>,
) -> Result<Json<UsersLocationResponse>, Error> {
    let limits = &state.config.limits;
    let limit = query
        .limit
        .unwrap_or(limits.dashboard_default_limit)
        .clamp(1, limits.dashboard_max_limit);

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut events = LocationEvents::new(&mut conn);

    let data: Vec<_> = events
        .latest_for_guardian(guardian_id, limit)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(UsersLocationResponse { count: data.len(), data }))
}
