//! API request/response models for registration and login.
//!
//! Request fields are optional so that missing fields can be reported as a
//! 400 with a useful message instead of a deserialization rejection; the
//! mobile clients predate strict payloads.

use crate::api::models::users::Role;
use crate::types::UserId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub login_id: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub login_id: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    pub role: Role,
}
