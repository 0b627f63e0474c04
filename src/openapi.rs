//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

use crate::api::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health,
        crate::api::handlers::auth::register,
        crate::api::handlers::auth::login,
        crate::api::handlers::links::link_user,
        crate::api::handlers::positions::record_position,
        crate::api::handlers::positions::latest_position,
        crate::api::handlers::positions::position_history,
        crate::api::handlers::positions::users_location,
        crate::api::handlers::notifications::register_token,
        crate::api::handlers::notifications::notify,
        crate::api::handlers::descriptions::generate_description,
    ),
    components(schemas(
        models::MessageResponse,
        models::users::Role,
        models::auth::RegisterRequest,
        models::auth::LoginRequest,
        models::auth::LoginResponse,
        models::links::LinkUserRequest,
        models::positions::Coordinate,
        models::positions::PositionRecordRequest,
        models::positions::PositionResponse,
        models::positions::HistoryResponse,
        models::positions::UsersLocationPoint,
        models::positions::UsersLocationResponse,
        models::notifications::RegisterTokenRequest,
        models::notifications::NotifyRequest,
        models::notifications::NotifyResponse,
        models::descriptions::DescriptionRequest,
        models::descriptions::DescriptionResponse,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Registration and login"),
        (name = "links", description = "Tracked-user/guardian relation"),
        (name = "positions", description = "Location event ingestion and queries"),
        (name = "notifications", description = "Device tokens and guardian fan-out"),
        (name = "descriptions", description = "Image labeling"),
    ),
    info(
        title = "MIDAS API",
        description = "Guardian/ward location tracking and push notification backend"
    )
)]
pub struct ApiDoc;
