// src/lib.rs

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod handlers;
pub mod state;
pub mod storage;

use crate::handlers::{add_site, check_status, get_history, health_check, list_sites};
use axum::{
    body::Body,
    http::{HeaderValue, Request as AxumRequest},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::{path::PathBuf, sync::Arc, time::Instant};
use tower_http::cors::CorsLayer;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use state::AppState;

/// Creates the main Axum router for the application.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/sites", get(list_sites).post(add_site))
        .route("/status/:id", get(check_status))
        .route("/history/:id", get(get_history))
        // The client is served from a different origin; mirror its
        // wide-open CORS policy.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Middleware that assigns a request id and wraps each request in a span.
async fn trace_requests(
    mut req: AxumRequest<Body>,
    next: axum::middleware::Next,
) -> impl IntoResponse {
    let request_id = Uuid::new_v4();
    let start_time = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let span = info_span!(
        "request",
        request_id = %request_id,
        http.method = %method,
        url.path = %path,
    );

    req.extensions_mut().insert(request_id);

    async move {
        let mut response = next.run(req).await;
        let elapsed = start_time.elapsed();

        if let Ok(header_value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert("X-Request-ID", header_value);
        }

        info!(
            http.response.duration = ?elapsed,
            http.status_code = response.status().as_u16(),
            "Finished processing request"
        );

        response
    }
    .instrument(span)
    .await
}

/// Main application setup: loads configuration, initializes state, spawns
/// the optional background sweep, and builds the router.
pub async fn run(config_path_override: Option<PathBuf>) -> Result<(Router, AppConfig)> {
    info!("Starting StatusPulse uptime monitoring service...");

    let app_config = setup_configuration(config_path_override)?;
    let app_state = build_application_state(&app_config).await?;

    if app_config.sweep.enabled {
        crate::core::sweep::spawn_sweeper(
            app_state.sites.clone(),
            app_state.status.clone(),
            std::time::Duration::from_secs(app_config.sweep.interval_secs),
        );
    }

    let app = create_router(app_state).layer(axum::middleware::from_fn(trace_requests));

    Ok((app, app_config))
}

/// Loads, validates and logs the application configuration.
fn setup_configuration(config_path_override: Option<PathBuf>) -> Result<AppConfig> {
    let config_path = config_path_override.unwrap_or_else(|| {
        std::env::var("CONFIG_PATH").map_or_else(|_| PathBuf::from("config.yaml"), PathBuf::from)
    });

    let config_path_display = config_path.display().to_string();
    if config_path.exists() {
        info!(config.path = %config_path_display, "Using configuration file");
    } else {
        info!(config.path = %config_path_display, "Optional configuration file not found. Using defaults and environment variables.");
    }

    let app_config = config::load_config(&config_path).map_err(|e| {
        error!(
            config.path = %config_path_display,
            error = ?e,
            "Failed to load or validate configuration. Exiting."
        );
        e
    })?;

    info!(
        server.port = app_config.server.port,
        probe.timeout_ms = app_config.probe.timeout_ms,
        probe.online_policy = ?app_config.probe.online_policy,
        sweep.enabled = app_config.sweep.enabled,
        "Configuration loaded and validated successfully."
    );

    Ok(app_config)
}

/// Creates and initializes the application state, including storage.
async fn build_application_state(app_config: &AppConfig) -> Result<Arc<AppState>> {
    let app_state = AppState::new(app_config).await.map_err(|e| {
        error!(error = ?e, "Failed to initialize application state. Exiting.");
        e
    })?;

    info!("Application state initialized successfully.");
    if app_config.redis_url.is_some() {
        info!("Redis persistence is enabled.");
    } else {
        info!("Running with in-memory storage.");
    }

    Ok(Arc::new(app_state))
}
