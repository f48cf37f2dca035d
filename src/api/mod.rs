//! API handlers for Bibchecker REST endpoints

pub mod entries;
pub mod health;
pub mod input;
pub mod openapi;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Reports
        .route("/refresh", post(entries::refresh))
        .route("/entries", get(entries::list_entries))
        .route("/libraries", get(entries::list_libraries))
        .route("/libraries/grouped", get(entries::list_by_library))
        .route("/failures", get(entries::list_failures))
        // Input file
        .route("/input", get(input::get_input).put(input::save_input))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
