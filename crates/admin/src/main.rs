//! Patel Yarn House Admin - Back-office API.
//!
//! This binary serves the management API on port 3001, intended to sit on a
//! private network behind the owner's reverse proxy.
//!
//! # Architecture
//!
//! - Axum web framework serving JSON to the admin client
//! - Shared `PostgreSQL` database with the storefront
//! - HTTP Basic auth on every route (argon2-hashed password)
//! - WhatsApp Cloud API for shipped-order notifications
//!
//! # Security
//!
//! This binary holds the admin credentials and the WhatsApp token. It does
//! NOT hold the Razorpay secrets (those live in the storefront binary).

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, middleware::from_fn_with_state, routing::get};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod error;
mod middleware;
mod routes;
mod services;
mod state;

use config::AdminConfig;
use state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = AdminConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "patel_yarn_admin=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    // Build application state
    let state = AppState::new(config.clone(), pool).expect("Failed to initialize application state");

    // Build router; health endpoints stay outside the auth wall
    let app = Router::new()
        .merge(
            routes::routes()
                .layer(from_fn_with_state(state.clone(), middleware::require_basic_auth)),
        )
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("admin listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
