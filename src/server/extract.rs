//! Request extractors that reject with [`VenueError`]
//!
//! Axum's stock extractors answer malformed input with plain-text bodies.
//! These wrappers keep every rejection in the `{"error": ...}` shape.

use crate::core::error::VenueError;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

/// Venue id taken from the `{id}` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VenueId(pub Uuid);

impl<S> FromRequestParts<S> for VenueId
where
    S: Send + Sync,
{
    type Rejection = VenueError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| VenueError::invalid_parameter("id", e.body_text()))?;

        parse_id(&raw).map(VenueId)
    }
}

/// Parse a venue id from its string form
pub fn parse_id(raw: &str) -> Result<Uuid, VenueError> {
    Uuid::parse_str(raw).map_err(|_| VenueError::InvalidId { id: raw.to_string() })
}

/// JSON body that has been deserialized and validated
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_venue(
///     ValidJson(payload): ValidJson<VenuePayload>,
/// ) -> Result<Json<Venue>, VenueError> {
///     // payload parsed and field-validated
/// }
/// ```
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = VenueError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| VenueError::invalid_body(e.body_text()))?;

        payload.validate()?;

        Ok(ValidJson(payload))
    }
}
