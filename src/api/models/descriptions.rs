//! API request/response models for image descriptions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DescriptionRequest {
    /// Image bytes as plain base64 or a `data:*;base64,` URL.
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DescriptionResponse {
    pub description: String,
}
