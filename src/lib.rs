//! # midas: Guardian/Ward Location Tracking Backend
//!
//! `midas` is the HTTP backend for the MIDAS location-tracking app. It keeps
//! a registry of users (tracked users and their guardians), an append-only
//! log of location samples reported by tracked devices, and the device
//! tokens needed to push notifications to guardians.
//!
//! ## Overview
//!
//! Tracked devices report coordinates which are appended to the location
//! event log. Guardians are linked to tracked users through an explicit
//! many-to-many relation and query the latest or historical samples of the
//! users linked to them. When something noteworthy happens on a tracked
//! device, the notification endpoint resolves every linked guardian, reads
//! their registered device tokens, and fans a push message out to all of
//! them in one request, reporting per-token success/failure counts.
//!
//! Every endpoint is a single validated query (or a single outbound HTTP
//! call) against shared state; there are no background tasks, schedulers,
//! or retries. A failed translation call degrades inline to untranslated
//! labels; every other external failure is surfaced as the mapped HTTP
//! status.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and uses PostgreSQL for all persistence needs.
//!
//! The **API layer** ([`api`]) exposes the JSON endpoints used by the mobile
//! clients: registration/login, guardian linking, position ingestion and
//! queries, device token registration, notification fan-out, and image
//! description.
//!
//! The **database layer** ([`db`]) uses the repository pattern to abstract
//! data access. Each entity (users, guardian links, device tokens, location
//! events) has a repository that handles queries and mutations over a
//! request-scoped connection.
//!
//! The **outbound services** ([`push`], [`imaging`]) wrap the push delivery,
//! vision, and translation HTTP APIs behind small service objects owned by
//! [`AppState`] and injected into handlers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use midas::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = midas::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     midas::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! The application requires a PostgreSQL database and automatically runs
//! migrations on startup:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
//! midas::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod imaging;
mod openapi;
pub mod push;
pub mod telemetry;
mod types;

#[cfg(test)]
pub mod test_utils;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use bon::Builder;
pub use config::Config;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::imaging::DescriptionService;
use crate::openapi::ApiDoc;
use crate::push::PushService;
pub use types::{EventId, UserId};

/// Application state shared across all request handlers.
///
/// Holds the connection pool, configuration, and the outbound service
/// objects. Handlers receive it via `State`; nothing reads ambient globals.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub push: Arc<PushService>,
    pub describer: Arc<DescriptionService>,
}

/// Get the midas database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Build the application router with all endpoints and middleware.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/register", post(api::handlers::auth::register))
        .route("/login", post(api::handlers::auth::login))
        .route("/link-user", post(api::handlers::links::link_user))
        .route("/position", post(api::handlers::positions::record_position))
        .route("/position/latest/{user_id}", get(api::handlers::positions::latest_position))
        .route("/position/history/{user_id}", get(api::handlers::positions::position_history))
        .route(
            "/guardian/{guardian_id}/users-location",
            get(api::handlers::positions::users_location),
        )
        .route("/fcm/register-token", post(api::handlers::notifications::register_token))
        .route("/fcm/notify", post(api::handlers::notifications::notify))
        // Compatibility alias kept for older mobile clients
        .route("/send-notification", post(api::handlers::notifications::notify))
        .route(
            "/generate-description",
            post(api::handlers::descriptions::generate_description),
        );

    let router = Router::new()
        .route("/health", get(api::handlers::health))
        .nest("/api", api_routes)
        .with_state(state);

    router
        .merge(Scalar::with_url("/api-docs", ApiDoc::openapi()))
        // The mobile clients call from app webviews and local networks
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Main application struct that owns all resources and lifecycle.
///
/// 1. **Create**: [`Application::new`] connects the pool, runs migrations,
///    and builds the router
/// 2. **Serve**: [`Application::serve`] binds a TCP port and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let settings = &config.database.pool;
        let mut options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs));
        if settings.idle_timeout_secs > 0 {
            options = options.idle_timeout(Duration::from_secs(settings.idle_timeout_secs));
        }
        if settings.max_lifetime_secs > 0 {
            options = options.max_lifetime(Duration::from_secs(settings.max_lifetime_secs));
        }

        let pool = options.connect(&config.database.url).await?;
        migrator().run(&pool).await?;

        Ok(Self::with_pool(config, pool))
    }

    /// Build the application around an existing pool (migrations are assumed
    /// to have been applied).
    pub fn with_pool(config: Config, pool: PgPool) -> Self {
        let state = AppState::builder()
            .db(pool.clone())
            .config(config.clone())
            .push(Arc::new(PushService::new(&config.push)))
            .describer(Arc::new(DescriptionService::new(&config.vision, &config.translation)))
            .build();

        let router = build_router(state);

        Self { router, config, pool }
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("MIDAS backend listening on http://{}", bind_addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}
