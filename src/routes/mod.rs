//! HTTP route handlers and the router that wires them together.
//!
//! - `health`: greeting, liveness/readiness, metrics and version endpoints
//! - `items`: add, list and fetch items
//! - `search`: name substring search
//! - `images`: serving stored images with placeholder fallback

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::middleware;
use crate::state::AppState;

pub mod health;
pub mod images;
pub mod items;
pub mod search;

/// Builds the application router with all middleware applied.
pub fn router(state: AppState) -> anyhow::Result<Router> {
    let cfg = state.config.clone();

    let origin = HeaderValue::from_str(&cfg.cors.front_url)
        .map_err(|e| anyhow::anyhow!("invalid CORS origin {}: {}", cfg.cors.front_url, e))?;
    let cors = CorsLayer::new()
        .allow_origin([origin])
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::DELETE]);

    let app = Router::new()
        .route("/", get(health::root))
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/version", get(health::version))
        .route("/items", get(items::get_items).post(items::add_item))
        .route("/items/{id}", get(items::get_item))
        .route("/search", get(search::search_items))
        .route("/image/{file}", get(images::get_image))
        .with_state(state)
        .layer(DefaultBodyLimit::max(cfg.server.body_limit_bytes))
        .layer(from_fn_with_state(cfg.clone(), middleware::validation::validate_request_middleware))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Ok(app)
}
