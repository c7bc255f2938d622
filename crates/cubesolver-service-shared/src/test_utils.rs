//! Test utilities for handler testing.
//!
//! Provides canned solver backends and app states so handler tests do not
//! depend on an external solver being installed.

use cubesolver_lib::{Error, FaceletSolver, FaceletString, FallbackPolicy, Result};

use crate::state::AppState;

/// Backend that answers every request with the same move text.
#[derive(Debug, Clone)]
pub struct CannedSolver {
    reply: String,
}

impl CannedSolver {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl FaceletSolver for CannedSolver {
    fn name(&self) -> &str {
        "canned"
    }

    fn solve(&self, _facelets: &FaceletString) -> Result<String> {
        Ok(self.reply.clone())
    }
}

/// Backend that always fails with a solver error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingSolver;

impl FaceletSolver for FailingSolver {
    fn name(&self) -> &str {
        "failing"
    }

    fn solve(&self, _facelets: &FaceletString) -> Result<String> {
        Err(Error::Solver {
            solver: self.name().to_string(),
            message: "simulated failure".to_string(),
        })
    }
}

/// State whose backend always returns `reply`.
pub fn canned_state(reply: &str) -> AppState {
    AppState::with_backend(CannedSolver::new(reply), FallbackPolicy::Disabled)
}

/// State whose backend always fails, with the given fallback policy.
pub fn failing_state(fallback: FallbackPolicy) -> AppState {
    AppState::with_backend(FailingSolver, fallback)
}
