//! Typed error handling for the venue service
//!
//! Every failure reaching the request boundary is one of three kinds:
//!
//! - **Validation**: malformed input. Nothing was written. `400`.
//! - **Not-Found**: the targeted venue does not exist. Nothing was written. `404`.
//! - **Store**: the document store failed or rejected the operation. `500`.
//!
//! All of them render as `{"error": "<message>"}`.
//!
//! # Example
//!
//! ```rust,ignore
//! match store.delete(&id).await {
//!     Ok(Some(venue)) => Ok(Json(venue)),
//!     Ok(None) => Err(VenueError::NotFound { id }),
//!     Err(e) => Err(VenueError::from(e)),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The error type surfaced by every venue operation
#[derive(Debug, Error)]
pub enum VenueError {
    /// No venue with this id exists
    #[error("Venue not found: {id}")]
    NotFound { id: Uuid },

    /// A path id that is not a valid identifier
    #[error("Invalid venue id: '{id}'")]
    InvalidId { id: String },

    /// A query or path parameter that cannot be used
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    /// A request body that cannot be parsed or fails field validation
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    /// Store or infrastructure failure
    #[error("Store error: {0}")]
    Store(String),
}

/// Error body written for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl VenueError {
    /// Build a query parameter validation error
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Build a request body validation error
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::InvalidBody {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            VenueError::NotFound { .. } => StatusCode::NOT_FOUND,
            VenueError::InvalidId { .. }
            | VenueError::InvalidParameter { .. }
            | VenueError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            VenueError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this error is caused by client input
    pub fn is_validation(&self) -> bool {
        self.status_code() == StatusCode::BAD_REQUEST
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
        }
    }
}

impl From<anyhow::Error> for VenueError {
    fn from(err: anyhow::Error) -> Self {
        VenueError::Store(format!("{:#}", err))
    }
}

impl From<validator::ValidationErrors> for VenueError {
    fn from(err: validator::ValidationErrors) -> Self {
        VenueError::invalid_body(err.to_string())
    }
}

impl IntoResponse for VenueError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }
        (status, Json(self.to_response())).into_response()
    }
}
