pub mod error;
pub mod routes;
pub mod state;

use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};
use tower_http::trace::TraceLayer;
use crate::adapters::http::state::HttpState;

/// Base64 inflates images by a third; leave room for large photos.
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/model", get(routes::model_info))
        .route("/detect/json", post(routes::detect_json))
        .route("/detect/image", post(routes::detect_image))
        // legacy paths
        .route("/api/pose", post(routes::detect_json))
        .route("/api/pose_image", post(routes::detect_image))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
