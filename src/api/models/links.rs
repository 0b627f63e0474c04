//! API request models for guardian links.

use crate::types::UserId;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LinkUserRequest {
    #[schema(value_type = Option<String>, format = "uuid")]
    pub tracked_user_id: Option<UserId>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub guardian_user_id: Option<UserId>,
}
