pub mod api;
pub mod rate_limit;
pub mod web;

use std::sync::Arc;

use axum::Router;

use crate::handlers::api::not_found;
use crate::state::AppState;

pub use rate_limit::apply_rate_limit;

/// Complete application router: API, UI and static files, with a JSON 404
/// fallback. Cross-cutting layers (CORS, security headers) and
/// [`apply_rate_limit`] are added by the binary.
pub fn create_app_router(state: Arc<AppState>) -> Router {
    let web_routes = web::create_web_router(&state.config.static_dir);

    api::create_api_router()
        .merge(web_routes)
        .fallback(not_found)
        .with_state(state)
}
