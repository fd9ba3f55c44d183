//! CatHealth Cloud Backend Server
//!
//! Backend for the CatHealth pet-health app: accepts a stool photo, runs the
//! simulated health-risk classification pipeline, and keeps a bounded
//! per-device history of past results.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                   CATHEALTH CLOUD                      │
//! ├────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌─────────────────────────────────┐   │
//! │  │  API     │   │  Analysis Engine                │   │
//! │  │  Gateway │──▶│  Sampler → Assembler → History  │   │
//! │  │  (Axum)  │   │  (in-memory, per device)        │   │
//! │  └──────────┘   └─────────────────────────────────┘   │
//! └────────────────────────────────────────────────────────┘
//! ```

mod config;
mod engine;
mod error;
mod handlers;
mod middleware;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use engine::AnalysisService;
pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "cathealth_cloud=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("CatHealth Cloud Server starting...");
    tracing::info!("History capacity: {} entries per device", config.history_capacity);

    // Wire the analysis engine
    let service = AnalysisService::standard(config.history_capacity)
        .context("Failed to wire analysis engine")?;

    // Build application state
    let state = AppState {
        service: Arc::new(service),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnalysisService>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/analysis/analyze", post(handlers::analysis::analyze))
        .route("/api/v1/analysis/history", get(handlers::analysis::history))
        .route("/api/v1/analysis/history/:id", get(handlers::analysis::history_entry))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
