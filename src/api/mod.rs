//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! - **Authentication** (`/api/register`, `/api/login`): account creation and
//!   credential checks
//! - **Guardian links** (`/api/link-user`): tracked-user/guardian relation
//! - **Positions** (`/api/position*`, `/api/guardian/{id}/users-location`):
//!   location event ingestion and queries
//! - **Notifications** (`/api/fcm/*`, `/api/send-notification`): device token
//!   registration and guardian fan-out
//! - **Descriptions** (`/api/generate-description`): image labeling
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`.
//! API documentation is served at `/api-docs` when the server is running.

pub mod handlers;
pub mod models;
