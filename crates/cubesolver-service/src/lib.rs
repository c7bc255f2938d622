//! Rubik's Cube solve and scramble HTTP service.
//!
//! # Endpoints
//!
//! - `POST /api/solve` - Solve a cube state: `{"cubeState": {"U": [...], ...}}`
//! - `GET /api/scramble` - Generate a scramble (`?length=N`, default 20)
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//!
//! The router is built by [`router`] so tests can drive it without binding a
//! socket.

use std::any::Any;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};
use tracing::{error, info, warn};

use cubesolver_lib::{generate_scramble, Move, SolutionSource};
use cubesolver_service_shared::{
    extract_or_generate_request_id, from_lib_error, health_live, health_ready, metrics_handler,
    record_scramble_generated, record_solve_completed, record_solve_failed, ApiError, AppState,
    ScrambleQuery, ServiceResponse, SolveFailure, SolveRequest, TelemetryLayer, Validate,
    ERROR_NO_CUBE_STATE,
};

/// Solve response returned to the caller.
#[derive(Debug, Serialize)]
pub struct SolveResponse {
    /// Move tokens to apply, in order.
    pub solution: Vec<Move>,
    /// Number of moves in `solution`.
    pub moves: usize,
    /// Where the moves came from; `random_fallback` is not a real solution.
    pub source: SolutionSource,
}

/// Scramble response returned to the caller.
#[derive(Debug, Serialize)]
pub struct ScrambleResponse {
    /// Move tokens, no two consecutive on the same face.
    pub scramble: Vec<Move>,
}

/// HTTP response - either success or a JSON error.
#[derive(Debug)]
enum Response<T> {
    Success(ServiceResponse<T>),
    Error(ApiError),
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            Response::Error(error) => error.into_response(),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/solve", post(solve_handler))
        .route("/api/scramble", get(scramble_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TelemetryLayer)
        .with_state(state)
}

/// Turn a handler panic into a 500 with the panic message.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> axum::response::Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "internal error".to_string()
    };
    error!(error = %message, "handler panicked");
    ApiError::internal_error(message).into_response()
}

/// Handle POST /api/solve requests.
async fn solve_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SolveRequest>, JsonRejection>,
) -> Response<SolveResponse> {
    let request_id = extract_or_generate_request_id(&headers);

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(request_id = %request_id, error = %rejection, "unreadable solve body");
            record_solve_failed(SolveFailure::BadBody);
            return Response::Error(ApiError::bad_request(rejection.body_text()));
        }
    };

    let cube_state = match request.cube_state() {
        Ok(cube_state) => cube_state,
        Err(error) => {
            let reason = if error.error == ERROR_NO_CUBE_STATE {
                SolveFailure::MissingState
            } else {
                SolveFailure::InvalidState
            };
            info!(request_id = %request_id, reason = reason.as_str(), "rejecting solve request");
            record_solve_failed(reason);
            return Response::Error(*error);
        }
    };

    let solver = state.solver_arc();
    let outcome = tokio::task::spawn_blocking(move || solver.solve(&cube_state)).await;

    let solution = match outcome {
        Ok(Ok(Some(solution))) => solution,
        Ok(Ok(None)) => {
            info!(request_id = %request_id, "no solution found");
            record_solve_failed(SolveFailure::NoSolution);
            return Response::Error(ApiError::no_solution());
        }
        Ok(Err(e)) => {
            error!(request_id = %request_id, error = %e, "solve failed");
            record_solve_failed(SolveFailure::Internal);
            return Response::Error(from_lib_error(&e));
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "solve task failed");
            record_solve_failed(SolveFailure::Internal);
            return Response::Error(ApiError::internal_error(e.to_string()));
        }
    };

    record_solve_completed(solution.source, solution.move_count());

    if solution.is_fallback() {
        warn!(
            request_id = %request_id,
            moves = solution.move_count(),
            "returning placeholder moves from the random fallback"
        );
    } else {
        info!(
            request_id = %request_id,
            moves = solution.move_count(),
            source = %solution.source,
            "solve completed"
        );
    }

    let moves = solution.move_count();
    Response::Success(ServiceResponse::new(SolveResponse {
        solution: solution.moves,
        moves,
        source: solution.source,
    }))
}

/// Handle GET /api/scramble requests.
async fn scramble_handler(
    headers: HeaderMap,
    query: Result<Query<ScrambleQuery>, QueryRejection>,
) -> Response<ScrambleResponse> {
    let request_id = extract_or_generate_request_id(&headers);

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return Response::Error(ApiError::bad_request(rejection.body_text()));
        }
    };

    if let Err(error) = query.validate() {
        return Response::Error(*error);
    }

    let scramble = generate_scramble(query.length());
    record_scramble_generated(scramble.len());
    info!(request_id = %request_id, length = scramble.len(), "scramble generated");

    Response::Success(ServiceResponse::new(ScrambleResponse { scramble }))
}
