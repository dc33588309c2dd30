//! Router builder for venue routes

use crate::server::handlers::{
    AppState, add_comment, add_rate, create_venue, delete_venue, get_venue, list_venues,
    replace_venue,
};
use axum::{Json, Router, routing::get, routing::post};
use serde_json::{Value, json};

/// Build the venue routes
///
/// - GET    /restaurants                - List venues matching the query filters
/// - POST   /restaurants                - Create a venue
/// - GET    /restaurants/{id}           - Get a venue
/// - PUT    /restaurants/{id}           - Replace a venue
/// - DELETE /restaurants/{id}           - Delete a venue
/// - POST   /restaurants/{id}/comments  - Append a comment
/// - POST   /restaurants/{id}/rates     - Append a rating
pub fn build_venue_routes(state: AppState) -> Router {
    Router::new()
        .route("/restaurants", get(list_venues).post(create_venue))
        .route(
            "/restaurants/{id}",
            get(get_venue).put(replace_venue).delete(delete_venue),
        )
        .route("/restaurants/{id}/comments", post(add_comment))
        .route("/restaurants/{id}/rates", post(add_rate))
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "restaurants"
    }))
}
