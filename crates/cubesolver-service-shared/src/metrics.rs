//! Prometheus metrics for the cube solver service.
//!
//! The recorder is installed once per process by [`init_metrics`]. Until then
//! every `record_*` helper is a no-op, which keeps handler tests free of any
//! global setup.
//!
//! Exported series:
//!
//! | name                              | kind      | labels                   |
//! |-----------------------------------|-----------|--------------------------|
//! | `http_requests_total`             | counter   | method, route, status    |
//! | `http_request_duration_seconds`   | histogram | method, route            |
//! | `cubesolver_solves_total`         | counter   | source                   |
//! | `cubesolver_solution_moves`       | histogram | source                   |
//! | `cubesolver_solves_failed_total`  | counter   | reason                   |
//! | `cubesolver_scrambles_total`      | counter   |                          |
//! | `cubesolver_scramble_length`      | histogram |                          |

use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use thiserror::Error;

use cubesolver_lib::SolutionSource;

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Whether to install the Prometheus recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    /// Read `METRICS_ENABLED` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`. Only an explicit "false" or "0"
    /// disables metrics.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let enabled = lookup("METRICS_ENABLED")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0"))
            .unwrap_or(true);
        Self { enabled }
    }
}

/// Reasons [`init_metrics`] can decline to install a recorder.
#[derive(Debug, Clone, Error)]
pub enum MetricsError {
    #[error("metrics are disabled")]
    Disabled,
    #[error("metrics recorder already initialized")]
    AlreadyInitialized,
    #[error("failed to install metrics recorder: {0}")]
    InstallFailed(String),
}

/// Install the global Prometheus recorder.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// `GET /metrics`: Prometheus exposition text.
///
/// Answers 503 when no recorder has been installed.
pub async fn metrics_handler() -> impl IntoResponse {
    match PROMETHEUS_HANDLE.get() {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
            handle.render(),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
            "# metrics not initialized\n".to_string(),
        ),
    }
}

/// Why a solve request ended without moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveFailure {
    /// Body was not readable JSON.
    BadBody,
    /// `cubeState` absent or empty.
    MissingState,
    /// `cubeState` failed structural validation.
    InvalidState,
    /// Solver failed and the fallback is off.
    NoSolution,
    /// Conversion error or a crashed solve task.
    Internal,
}

impl SolveFailure {
    pub fn as_str(self) -> &'static str {
        match self {
            SolveFailure::BadBody => "bad_body",
            SolveFailure::MissingState => "missing_state",
            SolveFailure::InvalidState => "invalid_state",
            SolveFailure::NoSolution => "no_solution",
            SolveFailure::Internal => "internal_error",
        }
    }
}

/// Record one finished HTTP request.
pub fn record_http_request(method: &str, route: &'static str, status: u16, elapsed: Duration) {
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "route" => route,
        "status" => status_class(status)
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route
    )
    .record(elapsed.as_secs_f64());
}

/// Record a solve that produced an answer, placeholder or not.
pub fn record_solve_completed(source: SolutionSource, moves: usize) {
    metrics::counter!("cubesolver_solves_total", "source" => source.as_str()).increment(1);
    metrics::histogram!("cubesolver_solution_moves", "source" => source.as_str())
        .record(moves as f64);
}

/// Record a solve request that ended in an error response.
pub fn record_solve_failed(reason: SolveFailure) {
    metrics::counter!("cubesolver_solves_failed_total", "reason" => reason.as_str()).increment(1);
}

pub fn record_scramble_generated(length: usize) {
    metrics::counter!("cubesolver_scrambles_total").increment(1);
    metrics::histogram!("cubesolver_scramble_length").record(length as f64);
}

fn status_class(status: u16) -> &'static str {
    match status {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_metrics_enabled_unless_switched_off() {
        assert!(MetricsConfig::from_lookup(lookup(&[])).enabled);
        assert!(MetricsConfig::from_lookup(lookup(&[("METRICS_ENABLED", "yes")])).enabled);
        assert!(!MetricsConfig::from_lookup(lookup(&[("METRICS_ENABLED", "FALSE")])).enabled);
        assert!(!MetricsConfig::from_lookup(lookup(&[("METRICS_ENABLED", "0")])).enabled);
    }

    #[test]
    fn test_init_metrics_disabled() {
        let config = MetricsConfig { enabled: false };
        assert!(matches!(init_metrics(&config), Err(MetricsError::Disabled)));
    }

    #[test]
    fn test_failure_labels() {
        assert_eq!(SolveFailure::MissingState.as_str(), "missing_state");
        assert_eq!(SolveFailure::NoSolution.as_str(), "no_solution");
        assert_eq!(SolveFailure::Internal.as_str(), "internal_error");
    }

    #[test]
    fn test_status_class() {
        assert_eq!(status_class(200), "2xx");
        assert_eq!(status_class(404), "4xx");
        assert_eq!(status_class(503), "5xx");
        assert_eq!(status_class(42), "other");
    }

    #[test]
    fn test_recording_without_recorder_is_a_no_op() {
        record_http_request("POST", "/api/solve", 200, Duration::from_millis(3));
        record_solve_completed(SolutionSource::External, 21);
        record_solve_completed(SolutionSource::AlreadySolved, 0);
        record_solve_failed(SolveFailure::InvalidState);
        record_scramble_generated(20);
    }
}
