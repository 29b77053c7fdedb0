//! Router assembly: routes plus CORS, body limit and request tracing layers.

use crate::config::AppConfig;
use crate::routes::{common_routes, student_routes};
use crate::state::AppState;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application router. Any origin may call the API.
pub fn build_router(state: AppState, config: &AppConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(common_routes(state.clone()))
        .merge(student_routes(state))
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
