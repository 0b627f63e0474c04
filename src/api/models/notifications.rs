//! API request/response models for push notifications.

use crate::types::UserId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterTokenRequest {
    #[schema(value_type = Option<String>, format = "uuid")]
    pub user_id: Option<UserId>,
    pub fcm_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NotifyRequest {
    /// The tracked user whose guardians should be notified.
    #[schema(value_type = Option<String>, format = "uuid")]
    pub user_id: Option<UserId>,
    pub title: Option<String>,
    pub body: Option<String>,
    /// Optional key/value payload forwarded to the client app.
    pub data: Option<HashMap<String, String>>,
}

/// Per-token delivery counts. Partial failure is surfaced here rather than
/// collapsed into an overall success/failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotifyResponse {
    pub success: usize,
    pub failure: usize,
}
