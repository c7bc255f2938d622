//! Application state for the HTTP service.
//!
//! The only thing handlers share is the solve orchestrator, which holds no
//! mutable data. The state exists so the configured solver backend is built
//! once at startup.

use std::sync::Arc;

use cubesolver_lib::{CubeSolver, FaceletSolver, FallbackPolicy};

use crate::config::SolverConfig;

/// Handler state: one orchestrator behind an `Arc`, so clones are cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<CubeSolver>,
}

impl AppState {
    /// Build state around an already constructed orchestrator.
    pub fn new(solver: CubeSolver) -> Self {
        Self {
            inner: Arc::new(solver),
        }
    }

    /// Build state from solver configuration.
    pub fn from_config(config: &SolverConfig) -> Self {
        let solver = config.build_solver();
        tracing::info!(
            backend = solver.backend().name(),
            fallback = ?solver.fallback_policy(),
            "solver configured"
        );
        Self::new(solver)
    }

    /// Build state from any backend, boxing it.
    pub fn with_backend(backend: impl FaceletSolver + 'static, fallback: FallbackPolicy) -> Self {
        let backend: Box<dyn FaceletSolver> = Box::new(backend);
        Self::new(CubeSolver::new(backend, fallback))
    }

    /// Access the solve orchestrator.
    pub fn solver(&self) -> &CubeSolver {
        &self.inner
    }

    /// Shared handle to the orchestrator, for moving into blocking tasks.
    pub fn solver_arc(&self) -> Arc<CubeSolver> {
        Arc::clone(&self.inner)
    }

    /// Whether a real external solver is behind the orchestrator.
    pub fn solver_available(&self) -> bool {
        self.inner.backend().is_available()
    }

    /// Name of the configured solver backend.
    pub fn backend_name(&self) -> &str {
        self.inner.backend().name()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("backend", &self.backend_name())
            .field("available", &self.solver_available())
            .field("fallback", &self.inner.fallback_policy())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubesolver_lib::UnavailableSolver;

    #[test]
    fn test_app_state_with_backend() {
        let state = AppState::with_backend(UnavailableSolver, FallbackPolicy::Enabled);
        assert_eq!(state.backend_name(), "unavailable");
        assert!(!state.solver_available());
        assert!(state.solver().fallback_policy().is_enabled());
    }

    #[test]
    fn test_app_state_clone_shares_solver() {
        let state1 = AppState::with_backend(UnavailableSolver, FallbackPolicy::Disabled);
        let state2 = state1.clone();
        assert!(Arc::ptr_eq(&state1.solver_arc(), &state2.solver_arc()));
    }

    #[test]
    fn test_app_state_debug() {
        let state = AppState::from_config(&SolverConfig::default());
        let debug = format!("{:?}", state);

        assert!(debug.contains("AppState"));
        assert!(debug.contains("backend"));
        assert!(debug.contains("Enabled"));
    }
}
