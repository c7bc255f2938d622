//! `{"success": true, ...}` envelope for successful responses.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Successful response body: `success: true` followed by the payload's own
/// fields at the top level.
///
/// ```
/// use cubesolver_service_shared::ServiceResponse;
///
/// #[derive(serde::Serialize)]
/// struct Scramble {
///     scramble: Vec<&'static str>,
/// }
///
/// let body = serde_json::to_value(ServiceResponse::new(Scramble { scramble: vec!["R", "U2"] }))
///     .unwrap();
/// assert_eq!(body, serde_json::json!({ "success": true, "scramble": ["R", "U2"] }));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ServiceResponse<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T> ServiceResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
