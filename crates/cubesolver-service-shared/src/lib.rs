//! Shared infrastructure for the cube solver HTTP service.
//!
//! This crate provides the HTTP glue around `cubesolver-lib`:
//!
//! - [`AppState`]: The configured solve orchestrator, shared across handlers
//! - [`ServiceConfig`]: Environment-driven port and solver settings
//! - [`health_live`] / [`health_ready`]: Liveness/readiness handlers
//! - [`ApiError`]: `{"error": "..."}` responses with fixed client messages
//! - [`ServiceResponse`]: `{"success": true, ...}` wrapper for successful responses
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request ID tagging and HTTP metrics layer
//! - Request types with validation for each endpoint
//!
//! # Architecture
//!
//! Handlers stay thin; all cube logic lives in `cubesolver-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse request JSON                                       │
//! │  - Validate parameters                                      │
//! │  - Call cubesolver-lib APIs                                 │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides canned solver backends for handler
//! testing. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

pub mod config;
mod error;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ServiceConfig, SolverConfig, DEFAULT_PORT};
pub use error::{
    from_lib_error, ApiError, ERROR_INVALID_CUBE_STATE, ERROR_NO_CUBE_STATE, ERROR_NO_SOLUTION,
};
pub use health::{health_live, health_ready, Condition, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_scramble_generated, record_solve_completed,
    record_solve_failed, MetricsConfig, MetricsError, SolveFailure,
};
pub use middleware::{
    extract_or_generate_request_id, RequestId, TelemetryLayer, REQUEST_ID_HEADER,
};
pub use request::{ScrambleQuery, SolveRequest, Validate, MAX_SCRAMBLE_LENGTH};
pub use response::ServiceResponse;
pub use state::AppState;
