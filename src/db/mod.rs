//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL.
//! It follows the Repository pattern: each table has a repository struct in
//! [`handlers`] that wraps a `&mut PgConnection`, performs the queries for
//! that entity, and returns records from [`models`].
//!
//! Connections are always acquired per request and released on every exit
//! path; repositories never own a pool. Write paths that need more than one
//! statement (user registration, token registration) run inside a
//! transaction held by the caller.
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations for each entity
//! - [`models`]: Database record structures matching table schemas
//! - [`errors`]: Database-specific error types
//!
//! # Migrations
//!
//! Database migrations are managed by SQLx and located in the `migrations/`
//! directory. The [`crate::migrator`] function provides access to the
//! migrator:
//!
//! ```ignore
//! midas::migrator().run(&pool).await?;
//! ```

pub mod errors;
pub mod handlers;
pub mod models;
