//! API route definitions

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{self, ApiState};

/// Create the API router
pub fn create_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check (GET and POST, both probed by orchestration layers)
        .route("/health", get(handlers::health).post(handlers::health))
        // ====================================================================
        // Service-function endpoints, one per analytics operation
        // ====================================================================
        .route("/shortest-path", post(handlers::shortest_path))
        .route("/centrality", post(handlers::centrality))
        .route("/community-detect", post(handlers::community_detect))
        .route("/transfer-network", post(handlers::transfer_network))
        .route("/temporal-analysis", post(handlers::temporal_analysis))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
