//! HTTP handlers for venue operations
//!
//! Handlers only extract, delegate to [`VenueService`] and serialize. Every
//! failure is returned as a [`VenueError`], which renders the status code and
//! the `{"error": ...}` body.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};

use crate::core::error::VenueError;
use crate::core::filter::VenueQuery;
use crate::core::service::VenueService;
use crate::core::venue::{CommentPayload, RatePayload, Venue, VenuePayload};
use crate::server::extract::{ValidJson, VenueId};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub venues: VenueService,
}

/// List venues matching the query parameters
///
/// GET /restaurants?name=&phone=&email=&minStars=&category=&longitude=&latitude=
pub async fn list_venues(
    State(state): State<AppState>,
    query: Result<Query<VenueQuery>, QueryRejection>,
) -> Result<Json<Vec<Venue>>, VenueError> {
    let Query(query) = query.map_err(|e| VenueError::invalid_parameter("query", e.body_text()))?;
    let venues = state.venues.list(&query).await?;
    Ok(Json(venues))
}

/// Create a venue
///
/// POST /restaurants
pub async fn create_venue(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<VenuePayload>,
) -> Result<(StatusCode, Json<Venue>), VenueError> {
    let venue = state.venues.create(payload).await?;
    Ok((StatusCode::CREATED, Json(venue)))
}

/// Get a venue by id
///
/// GET /restaurants/{id}
pub async fn get_venue(
    State(state): State<AppState>,
    VenueId(id): VenueId,
) -> Result<Json<Venue>, VenueError> {
    Ok(Json(state.venues.get(id).await?))
}

/// Replace a venue as a whole
///
/// PUT /restaurants/{id}
pub async fn replace_venue(
    State(state): State<AppState>,
    VenueId(id): VenueId,
    ValidJson(payload): ValidJson<VenuePayload>,
) -> Result<Json<Venue>, VenueError> {
    Ok(Json(state.venues.replace(id, payload).await?))
}

/// Delete a venue, answering with its last state
///
/// DELETE /restaurants/{id}
pub async fn delete_venue(
    State(state): State<AppState>,
    VenueId(id): VenueId,
) -> Result<Json<Venue>, VenueError> {
    Ok(Json(state.venues.delete(id).await?))
}

/// Append a comment
///
/// POST /restaurants/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    VenueId(id): VenueId,
    ValidJson(payload): ValidJson<CommentPayload>,
) -> Result<Json<Venue>, VenueError> {
    Ok(Json(state.venues.add_comment(id, payload).await?))
}

/// Append a rating
///
/// POST /restaurants/{id}/rates
pub async fn add_rate(
    State(state): State<AppState>,
    VenueId(id): VenueId,
    ValidJson(payload): ValidJson<RatePayload>,
) -> Result<Json<Venue>, VenueError> {
    Ok(Json(state.venues.add_rate(id, payload).await?))
}
