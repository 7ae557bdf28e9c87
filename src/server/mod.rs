pub mod routes;

use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// API routes plus the static page as fallback.
pub fn router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/api/validate", post(routes::post_validate))
        .route("/api/plot", post(routes::post_plot))
        .route("/api/status", get(routes::get_status))
        .fallback_service(
            tower_http::services::ServeDir::new(&static_dir)
                .fallback(tower_http::services::ServeFile::new(static_dir.join("index.html"))),
        )
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(state)
}
