//! Request/response data structures for API communication.

pub mod auth;
pub mod descriptions;
pub mod links;
pub mod notifications;
pub mod positions;
pub mod users;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic success acknowledgement used by write endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
