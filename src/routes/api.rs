use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, audio, generate};
use crate::state::AppState;
use std::sync::Arc;

/// JSON API routes
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate", post(generate::generate_handler))
        .route("/audio/{filename}", get(audio::download_audio))
        .route("/health", get(api::health_check))
        .layer(TraceLayer::new_for_http())
}
