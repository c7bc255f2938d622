//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use cubesolver_lib::{CubeState, DEFAULT_SCRAMBLE_LENGTH};

use crate::ApiError;

/// Largest scramble a client may request.
pub const MAX_SCRAMBLE_LENGTH: usize = 100;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return an `ApiError` for
/// invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// Returns a boxed `ApiError` to avoid large `Result::Err` variants.
    fn validate(&self) -> Result<(), Box<ApiError>>;
}

/// Body of `POST /api/solve`.
///
/// `cubeState` is kept as raw JSON so that "absent", "empty" and "malformed"
/// can be told apart and mapped to their distinct error messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolveRequest {
    #[serde(rename = "cubeState", default, skip_serializing_if = "Option::is_none")]
    pub cube_state: Option<Value>,
}

impl SolveRequest {
    pub fn new(state: &CubeState) -> Self {
        Self {
            cube_state: serde_json::to_value(state).ok(),
        }
    }

    /// Extract and structurally validate the cube state.
    ///
    /// Null, `{}`, `[]`, `""`, `false` and `0` all count as "not provided".
    /// Any other value that is not a face map of string lists, or that fails
    /// [`CubeState::validate`], is an invalid state.
    pub fn cube_state(&self) -> Result<CubeState, Box<ApiError>> {
        let value = match &self.cube_state {
            Some(value) if !is_blank(value) => value,
            _ => return Err(Box::new(ApiError::no_cube_state())),
        };

        let state: CubeState = serde_json::from_value(value.clone()).map_err(|e| {
            tracing::debug!(error = %e, "cube state has the wrong shape");
            Box::new(ApiError::invalid_cube_state())
        })?;

        if let Err(e) = state.validate() {
            tracing::debug!(reason = %e, "cube state failed validation");
            return Err(Box::new(ApiError::invalid_cube_state()));
        }

        Ok(state)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

impl Validate for SolveRequest {
    fn validate(&self) -> Result<(), Box<ApiError>> {
        self.cube_state().map(|_| ())
    }
}

/// Query string of `GET /api/scramble`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrambleQuery {
    /// Number of moves; defaults to 20.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
}

impl ScrambleQuery {
    /// Requested length, or the default.
    pub fn length(&self) -> usize {
        self.length.unwrap_or(DEFAULT_SCRAMBLE_LENGTH)
    }
}

impl Validate for ScrambleQuery {
    fn validate(&self) -> Result<(), Box<ApiError>> {
        match self.length {
            Some(0) => Err(Box::new(ApiError::bad_request(
                "The 'length' parameter must be at least 1",
            ))),
            Some(n) if n > MAX_SCRAMBLE_LENGTH => Err(Box::new(ApiError::bad_request(format!(
                "The 'length' parameter cannot exceed {MAX_SCRAMBLE_LENGTH}"
            )))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: Value) -> SolveRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_cube_state() {
        let err = request(json!({})).validate().unwrap_err();
        assert_eq!(err.error, "No cube state provided");
    }

    #[test]
    fn test_blank_cube_state_values() {
        for blank in [json!(null), json!({}), json!([]), json!(""), json!(false), json!(0)] {
            let err = request(json!({ "cubeState": blank.clone() }))
                .validate()
                .unwrap_err();
            assert_eq!(err.error, "No cube state provided", "value {blank}");
        }
    }

    #[test]
    fn test_wrong_shape_is_invalid() {
        for bad in [json!("UUU"), json!([1, 2]), json!({ "U": "WWWWWWWWW" })] {
            let err = request(json!({ "cubeState": bad })).validate().unwrap_err();
            assert_eq!(err.error, "Invalid cube state");
        }
    }

    #[test]
    fn test_short_face_is_invalid() {
        let mut state = CubeState::solved();
        state.set_face(cubesolver_lib::Face::U, vec!["W"; 8]);
        let err = SolveRequest::new(&state).validate().unwrap_err();
        assert_eq!(err.error, "Invalid cube state");
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn test_solved_state_is_accepted() {
        let state = SolveRequest::new(&CubeState::solved()).cube_state().unwrap();
        assert!(state.is_canonical_solved());
    }

    #[test]
    fn test_scramble_query_defaults() {
        let query: ScrambleQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.length(), 20);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_scramble_query_bounds() {
        let zero = ScrambleQuery { length: Some(0) };
        assert!(zero.validate().unwrap_err().error.contains("at least 1"));

        let huge = ScrambleQuery { length: Some(101) };
        assert!(huge.validate().unwrap_err().error.contains("exceed 100"));

        let ok = ScrambleQuery { length: Some(100) };
        assert!(ok.validate().is_ok());
    }
}
