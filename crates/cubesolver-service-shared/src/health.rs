//! Liveness and readiness probes.
//!
//! Both probes always answer 200: the service can respond to every request
//! even without an external solver. Readiness reports `degraded` when no
//! solver is configured, since every unsolved cube then gets placeholder
//! moves or "No solution found".

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;

use cubesolver_lib::FallbackPolicy;

use crate::AppState;

const SERVICE: &str = "cubesolver";
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Ok,
    Degraded,
}

/// Probe response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: Condition,
    pub service: &'static str,
    pub version: &'static str,
    /// Backend name; readiness only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_enabled: Option<bool>,
}

impl HealthStatus {
    pub fn alive() -> Self {
        Self {
            status: Condition::Ok,
            service: SERVICE,
            version: VERSION,
            solver: None,
            fallback_enabled: None,
        }
    }

    pub fn ready(solver: &str, available: bool, fallback: FallbackPolicy) -> Self {
        let status = if available {
            Condition::Ok
        } else {
            Condition::Degraded
        };
        Self {
            status,
            solver: Some(solver.to_string()),
            fallback_enabled: Some(fallback.is_enabled()),
            ..Self::alive()
        }
    }
}

/// `GET /health/live`
pub async fn health_live() -> impl IntoResponse {
    Json(HealthStatus::alive())
}

/// `GET /health/ready`
pub async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthStatus::ready(
        state.backend_name(),
        state.solver_available(),
        state.solver().fallback_policy(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SolverConfig;
    use cubesolver_lib::UnavailableSolver;

    #[test]
    fn test_liveness_body_is_minimal() {
        let body = serde_json::to_value(HealthStatus::alive()).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "cubesolver");
        assert!(body.get("solver").is_none());
        assert!(body.get("fallback_enabled").is_none());
    }

    #[test]
    fn test_ready_with_external_solver() {
        let status = HealthStatus::ready("kociemba", true, FallbackPolicy::Enabled);
        assert_eq!(status.status, Condition::Ok);
        assert_eq!(status.solver.as_deref(), Some("kociemba"));
        assert_eq!(status.fallback_enabled, Some(true));
    }

    #[tokio::test]
    async fn test_ready_without_solver_is_degraded() {
        let state = AppState::with_backend(UnavailableSolver, FallbackPolicy::Disabled);
        let response = health_ready(State(state)).await.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::OK);

        let status = HealthStatus::ready("unavailable", false, FallbackPolicy::Disabled);
        let body = serde_json::to_value(status).unwrap();
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["fallback_enabled"], false);
    }

    #[test]
    fn test_solver_named_unavailable_is_still_ready() {
        let config = SolverConfig {
            command: Some("unavailable".to_string()),
            ..SolverConfig::default()
        };
        let state = AppState::from_config(&config);
        assert_eq!(state.backend_name(), "unavailable");

        let status = HealthStatus::ready(
            state.backend_name(),
            state.solver_available(),
            state.solver().fallback_policy(),
        );
        assert_eq!(status.status, Condition::Ok);
    }
}
