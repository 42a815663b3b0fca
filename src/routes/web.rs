use std::path::Path;
use std::sync::Arc;

use axum::{Router, handler::HandlerWithoutStateExt};
use tower_http::services::{ServeDir, ServeFile};

use crate::handlers::api::not_found;
use crate::state::AppState;

/// The single-page UI at `/` and everything under `static_dir` at `/static`,
/// generated audio included.
pub fn create_web_router(static_dir: &Path) -> Router<Arc<AppState>> {
    let assets = ServeDir::new(static_dir).not_found_service(not_found.into_service());

    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", assets)
}
