//! JSON error responses for the HTTP API.
//!
//! Every failure is returned as a single-field object, `{"error": "..."}`,
//! with the status code carrying the category. Clients match on the message
//! text, so the fixed messages below are part of the API contract.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use cubesolver_lib::Error as LibError;

/// Message for a solve request without a usable `cubeState`.
pub const ERROR_NO_CUBE_STATE: &str = "No cube state provided";

/// Message for a cube state that fails structural validation.
pub const ERROR_INVALID_CUBE_STATE: &str = "Invalid cube state";

/// Message when the solver produced nothing and no fallback was allowed.
pub const ERROR_NO_SOLUTION: &str = "No solution found";

/// Error response body plus the HTTP status it is sent with.
///
/// # Example
///
/// ```
/// use cubesolver_service_shared::{ApiError, ERROR_INVALID_CUBE_STATE};
///
/// let error = ApiError::bad_request(ERROR_INVALID_CUBE_STATE);
/// assert_eq!(error.status(), 400);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable description of the failure.
    pub error: String,

    #[serde(skip)]
    status: u16,
}

impl ApiError {
    /// Create an error with an explicit status code.
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: status.as_u16(),
        }
    }

    /// Create a 400 Bad Request error.
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    /// Create a 500 Internal Server Error.
    ///
    /// The message is passed to the client verbatim.
    pub fn internal_error(error: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }

    /// 400 for a missing or empty `cubeState`.
    pub fn no_cube_state() -> Self {
        Self::bad_request(ERROR_NO_CUBE_STATE)
    }

    /// 400 for a structurally invalid cube state.
    pub fn invalid_cube_state() -> Self {
        Self::bad_request(ERROR_INVALID_CUBE_STATE)
    }

    /// 400 when no solution could be produced.
    pub fn no_solution() -> Self {
        Self::bad_request(ERROR_NO_SOLUTION)
    }

    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        self.status
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.error, self.status)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Convert library errors to API errors.
///
/// Anything reaching this point is unexpected for the request path, so every
/// variant maps to a 500 carrying the error's own message.
pub fn from_lib_error(error: &LibError) -> ApiError {
    ApiError::internal_error(error.to_string())
}
