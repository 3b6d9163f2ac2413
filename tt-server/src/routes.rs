use crate::health;
use crate::api::time_entries::aggregate::aggregate_time_entries;
use crate::api::time_entries::time_entries::{
    create_time_entry, delete_time_entry, list_time_entries, update_time_entry,
};
use crate::api::time_entries::update_multiple::update_multiple_time_entries;
use crate::state::AppState;

use axum::{
    Router,
    routing::{get, put},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Time entry endpoints
        .route(
            "/api/v1/organizations/{organization_id}/time-entries",
            get(list_time_entries)
                .post(create_time_entry)
                .patch(update_multiple_time_entries),
        )
        .route(
            "/api/v1/organizations/{organization_id}/time-entries/aggregate",
            get(aggregate_time_entries),
        )
        .route(
            "/api/v1/organizations/{organization_id}/time-entries/{id}",
            put(update_time_entry).delete(delete_time_entry),
        )
        // Add shared state
        .with_state(state)
        // CORS middleware (allow all origins)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
